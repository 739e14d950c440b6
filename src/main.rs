use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use reddit_persona::cli::commands::{config, generate};

#[derive(Parser)]
#[command(name = "reddit-persona")]
#[command(
    version,
    about = "Build a cited user persona from a Reddit user's posts and comments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug-level logs on stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a user's activity and write their persona
    Generate {
        #[arg(long, short, help = "Reddit profile URL (prompted for when omitted)")]
        url: Option<String>,
        #[arg(long, help = "LLM provider (ollama, openai)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, short, help = "Output directory for persona files")]
        output: Option<PathBuf>,
    },

    /// Inspect or create configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the merged configuration
    Show {
        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = config::SHOW_FORMATS.to_vec())]
        format: String,
    },
    /// Print where configuration is read from
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Write the per-user file instead of ./reddit-persona.toml")]
        global: bool,
        #[arg(long, help = "Replace an existing file")]
        force: bool,
    },
}

impl Commands {
    fn run(self, quiet: bool) -> anyhow::Result<()> {
        match self {
            Commands::Generate {
                url,
                provider,
                model,
                output,
            } => generate::run(generate::GenerateOptions {
                url,
                provider,
                model,
                output,
                quiet,
            })?,
            Commands::Config { action } => match action {
                ConfigAction::Show { format } => config::show(&format)?,
                ConfigAction::Path => config::path()?,
                ConfigAction::Init { global, force } => config::init(global, force)?,
            },
        }
        Ok(())
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        eprintln!();
        eprintln!("{} {}", style("reddit-persona crashed:").red().bold(), message);
        if let Some(loc) = info.location() {
            eprintln!("{}", style(format!("  at {}:{}", loc.file(), loc.line())).dim());
        }

        // RUST_BACKTRACE=1 still prints through the previous hook
        previous(info);
    }));
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    install_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command.run(cli.quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
