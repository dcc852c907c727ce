//! Publication type enumeration shared with the catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document class of a dataset's publication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationType {
    #[default]
    None,
    AnnotationCollection,
    Book,
    BookSection,
    ConferencePaper,
    DataManagementPlan,
    JournalArticle,
    Patent,
    Preprint,
    ProjectDeliverable,
    ProjectMilestone,
    Proposal,
    Report,
    SoftwareDocumentation,
    TaxonomicTreatment,
    TechnicalNote,
    Thesis,
    WorkingPaper,
    Other,
}

impl PublicationType {
    pub const ALL: [PublicationType; 19] = [
        PublicationType::None,
        PublicationType::AnnotationCollection,
        PublicationType::Book,
        PublicationType::BookSection,
        PublicationType::ConferencePaper,
        PublicationType::DataManagementPlan,
        PublicationType::JournalArticle,
        PublicationType::Patent,
        PublicationType::Preprint,
        PublicationType::ProjectDeliverable,
        PublicationType::ProjectMilestone,
        PublicationType::Proposal,
        PublicationType::Report,
        PublicationType::SoftwareDocumentation,
        PublicationType::TaxonomicTreatment,
        PublicationType::TechnicalNote,
        PublicationType::Thesis,
        PublicationType::WorkingPaper,
        PublicationType::Other,
    ];

    /// Value used by the upstream deposition service (e.g. `article`)
    pub fn value(&self) -> &'static str {
        match self {
            PublicationType::None => "none",
            PublicationType::AnnotationCollection => "annotationcollection",
            PublicationType::Book => "book",
            PublicationType::BookSection => "section",
            PublicationType::ConferencePaper => "conferencepaper",
            PublicationType::DataManagementPlan => "datamanagementplan",
            PublicationType::JournalArticle => "article",
            PublicationType::Patent => "patent",
            PublicationType::Preprint => "preprint",
            PublicationType::ProjectDeliverable => "deliverable",
            PublicationType::ProjectMilestone => "milestone",
            PublicationType::Proposal => "proposal",
            PublicationType::Report => "report",
            PublicationType::SoftwareDocumentation => "softwaredocumentation",
            PublicationType::TaxonomicTreatment => "taxonomictreatment",
            PublicationType::TechnicalNote => "technicalnote",
            PublicationType::Thesis => "thesis",
            PublicationType::WorkingPaper => "workingpaper",
            PublicationType::Other => "other",
        }
    }

    /// Enum name as stored in the catalog tables (e.g. `JOURNAL_ARTICLE`)
    pub fn name(&self) -> &'static str {
        match self {
            PublicationType::None => "NONE",
            PublicationType::AnnotationCollection => "ANNOTATION_COLLECTION",
            PublicationType::Book => "BOOK",
            PublicationType::BookSection => "BOOK_SECTION",
            PublicationType::ConferencePaper => "CONFERENCE_PAPER",
            PublicationType::DataManagementPlan => "DATA_MANAGEMENT_PLAN",
            PublicationType::JournalArticle => "JOURNAL_ARTICLE",
            PublicationType::Patent => "PATENT",
            PublicationType::Preprint => "PREPRINT",
            PublicationType::ProjectDeliverable => "PROJECT_DELIVERABLE",
            PublicationType::ProjectMilestone => "PROJECT_MILESTONE",
            PublicationType::Proposal => "PROPOSAL",
            PublicationType::Report => "REPORT",
            PublicationType::SoftwareDocumentation => "SOFTWARE_DOCUMENTATION",
            PublicationType::TaxonomicTreatment => "TAXONOMIC_TREATMENT",
            PublicationType::TechnicalNote => "TECHNICAL_NOTE",
            PublicationType::Thesis => "THESIS",
            PublicationType::WorkingPaper => "WORKING_PAPER",
            PublicationType::Other => "OTHER",
        }
    }

    /// Human readable label, e.g. `Journal Article`
    pub fn label(&self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(|c| c.to_lowercase()))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown publication type string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown publication type: {0}")]
pub struct UnknownPublicationType(pub String);

impl FromStr for PublicationType {
    type Err = UnknownPublicationType;

    /// Accepts either the stored value (`article`) or the enum name
    /// (`JOURNAL_ARTICLE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|pt| pt.value() == s)
            .or_else(|| Self::ALL.iter().find(|pt| pt.name() == s))
            .copied()
            .ok_or_else(|| UnknownPublicationType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_and_name() {
        assert_eq!("article".parse::<PublicationType>(), Ok(PublicationType::JournalArticle));
        assert_eq!("JOURNAL_ARTICLE".parse::<PublicationType>(), Ok(PublicationType::JournalArticle));
        assert_eq!(" report ".parse::<PublicationType>(), Ok(PublicationType::Report));
        assert!("pamphlet".parse::<PublicationType>().is_err());
    }

    #[test]
    fn test_every_type_round_trips_through_name() {
        for pt in PublicationType::ALL {
            assert_eq!(pt.name().parse::<PublicationType>(), Ok(pt));
            assert_eq!(pt.value().parse::<PublicationType>(), Ok(pt));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(PublicationType::JournalArticle.label(), "Journal Article");
        assert_eq!(PublicationType::Report.label(), "Report");
        assert_eq!(PublicationType::DataManagementPlan.label(), "Data Management Plan");
    }
}
