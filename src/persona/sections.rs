//! Persona Sections
//!
//! The six ordered sections of a persona document and their markers.

use serde::Serialize;

/// Persona document section, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Behavior,
    Frustrations,
    Motivations,
    Goals,
    Personality,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Summary,
        Self::Behavior,
        Self::Frustrations,
        Self::Motivations,
        Self::Goals,
        Self::Personality,
    ];

    /// Header line that opens the section
    pub fn marker(self) -> &'static str {
        match self {
            Self::Summary => "**Summary:**",
            Self::Behavior => "**Behavior & Habits:**",
            Self::Frustrations => "**Frustrations:**",
            Self::Motivations => "**Motivations:**",
            Self::Goals => "**Goals & Needs:**",
            Self::Personality => "**Personality:**",
        }
    }

    /// Section whose marker starts `line`, if any
    pub fn from_marker_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| line.starts_with(section.marker()))
    }

    /// Whether entries in this section must carry a citation
    pub fn requires_citation(self) -> bool {
        !matches!(self, Self::Summary)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Behavior => write!(f, "behavior"),
            Self::Frustrations => write!(f, "frustrations"),
            Self::Motivations => write!(f, "motivations"),
            Self::Goals => write!(f, "goals"),
            Self::Personality => write!(f, "personality"),
        }
    }
}

/// Append the citation suffix to a claim line
pub fn cite(claim: &str, citation: &str) -> String {
    format!("{}  * Citation: {}", claim, citation)
}

/// Section contents, one formatted line per entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonaSections {
    pub summary: Vec<String>,
    pub behavior: Vec<String>,
    pub frustrations: Vec<String>,
    pub motivations: Vec<String>,
    pub goals: Vec<String>,
    pub personality: Vec<String>,
}

impl PersonaSections {
    pub fn entries(&self, section: Section) -> &[String] {
        match section {
            Section::Summary => &self.summary,
            Section::Behavior => &self.behavior,
            Section::Frustrations => &self.frustrations,
            Section::Motivations => &self.motivations,
            Section::Goals => &self.goals,
            Section::Personality => &self.personality,
        }
    }

    fn entries_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Summary => &mut self.summary,
            Section::Behavior => &mut self.behavior,
            Section::Frustrations => &mut self.frustrations,
            Section::Motivations => &mut self.motivations,
            Section::Goals => &mut self.goals,
            Section::Personality => &mut self.personality,
        }
    }

    pub fn push(&mut self, section: Section, entry: impl Into<String>) {
        self.entries_mut(section).push(entry.into());
    }

    /// True if no section has any entry
    pub fn is_empty(&self) -> bool {
        Section::ALL
            .into_iter()
            .all(|section| self.entries(section).is_empty())
    }

    /// Each section under its marker, separated by blank lines.
    ///
    /// No newline follows the last entry.
    pub fn render(&self) -> String {
        Section::ALL
            .into_iter()
            .map(|section| format!("{}\n{}", section.marker(), self.entries(section).join("\n")))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_marker_line() {
        assert_eq!(
            Section::from_marker_line("**Behavior & Habits:**"),
            Some(Section::Behavior)
        );
        assert_eq!(
            Section::from_marker_line("**Goals & Needs:** trailing text"),
            Some(Section::Goals)
        );
        assert_eq!(Section::from_marker_line(" **Summary:**"), None);
        assert_eq!(Section::from_marker_line("**Behavior:**"), None);
    }

    #[test]
    fn test_cite() {
        assert_eq!(
            cite("* Plays a lot", "https://www.reddit.com/r/x/"),
            "* Plays a lot  * Citation: https://www.reddit.com/r/x/"
        );
    }

    #[test]
    fn test_render_layout() {
        let mut sections = PersonaSections::default();
        sections.push(Section::Summary, "* Summary line");
        sections.push(Section::Personality, "* Trait  * Citation: u");
        sections.push(Section::Personality, "* Another  * Citation: v");

        assert_eq!(
            sections.render(),
            "**Summary:**\n* Summary line\n\n\
             **Behavior & Habits:**\n\n\n\
             **Frustrations:**\n\n\n\
             **Motivations:**\n\n\n\
             **Goals & Needs:**\n\n\n\
             **Personality:**\n* Trait  * Citation: u\n* Another  * Citation: v"
        );
    }

    #[test]
    fn test_is_empty() {
        let mut sections = PersonaSections::default();
        assert!(sections.is_empty());
        sections.push(Section::Goals, "* Goal  * Citation: x");
        assert!(!sections.is_empty());
        assert_eq!(sections.entries(Section::Goals).len(), 1);
    }
}
