//! Generated Text Parser
//!
//! Line scanner that turns free-form model output into [`PersonaSections`].
//!
//! ## Rules (per line)
//! - A line starting with a section marker switches section; it is not content
//! - Blank lines, and anything before the first marker, are ignored
//! - A line containing `Citation:` sets the pending citation
//! - A `*` line consumes the pending citation; without one it is dropped
//! - Summary keeps narrative lines (not starting with `*`) verbatim
//! - Personality keeps `User Quote:` lines verbatim, with no citation suffix

use super::sections::{PersonaSections, Section, cite};

const CITATION_MARKER: &str = "Citation:";
const QUOTE_MARKER: &str = "User Quote:";

/// Scanner state threaded through the lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ParseState {
    section: Option<Section>,
    citation: Option<String>,
}

/// Parse generated text into persona sections.
///
/// Entries outside the summary end with a citation suffix, except bare
/// `User Quote:` lines in the personality section, which are kept as written.
pub fn parse_sections(generated: &str) -> PersonaSections {
    let (sections, _) = generated.lines().fold(
        (PersonaSections::default(), ParseState::default()),
        |(mut sections, state), line| {
            let state = step(&mut sections, state, line);
            (sections, state)
        },
    );
    sections
}

fn step(sections: &mut PersonaSections, state: ParseState, line: &str) -> ParseState {
    if let Some(section) = Section::from_marker_line(line) {
        return ParseState {
            section: Some(section),
            ..state
        };
    }

    let Some(section) = state.section else {
        return state;
    };
    if line.trim().is_empty() {
        return state;
    }

    if let Some((_, rest)) = line.split_once(CITATION_MARKER) {
        let citation = rest.trim();
        return ParseState {
            citation: (!citation.is_empty()).then(|| citation.to_string()),
            ..state
        };
    }

    let starred = line.starts_with('*');
    if starred && let Some(citation) = state.citation.as_deref() {
        let entry = if section.requires_citation() {
            cite(line, citation)
        } else {
            line.to_string()
        };
        sections.push(section, entry);
        return ParseState {
            citation: None,
            ..state
        };
    }

    match section {
        Section::Summary if !starred => sections.push(section, line),
        Section::Personality if line.contains(QUOTE_MARKER) => sections.push(section, line),
        _ => {}
    }
    state
}
