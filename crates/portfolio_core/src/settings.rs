use std::time::Duration;

use crate::{NavigatorSettings, RevealConfig, SectionRegistry};

/// Reveal group declared by a section: its id, how many children animate,
/// and how.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealGroupSpec {
    pub id: String,
    pub children: usize,
    pub config: RevealConfig,
}

impl RevealGroupSpec {
    pub fn new(id: impl Into<String>, children: usize, config: RevealConfig) -> Self {
        Self {
            id: id.into(),
            children,
            config,
        }
    }
}

/// Static file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    pub href: String,
    pub file_name: String,
}

/// Everything fixed at page composition time.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub sections: SectionRegistry,
    pub navigator: NavigatorSettings,
    pub reveal_groups: Vec<RevealGroupSpec>,
    pub cv: AssetLink,
}

impl Default for SiteSettings {
    fn default() -> Self {
        let fast = Duration::from_millis(100);
        let slow = Duration::from_millis(200);
        Self {
            sections: SectionRegistry::portfolio(),
            navigator: NavigatorSettings::default(),
            reveal_groups: vec![
                RevealGroupSpec::new("home", 4, RevealConfig::intro()),
                RevealGroupSpec::new("skills", 5, RevealConfig::section(fast)),
                RevealGroupSpec::new("experience", 4, RevealConfig::section(slow)),
                RevealGroupSpec::new("projects", 6, RevealConfig::section(slow)),
                RevealGroupSpec::new("goals", 6, RevealConfig::section(slow)),
                RevealGroupSpec::new("contact", 6, RevealConfig::section(fast)),
            ],
            cv: AssetLink {
                href: "/resume.pdf".to_string(),
                file_name: "resume.pdf".to_string(),
            },
        }
    }
}
