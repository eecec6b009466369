use thiserror::Error;

/// Page sections in visual order.
pub const PORTFOLIO_SECTIONS: [&str; 6] = [
    "home",
    "skills",
    "experience",
    "projects",
    "goals",
    "contact",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: String,
    pub dom_order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("section at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate section id {0:?}")]
    DuplicateId(String),
    #[error("a page needs at least one section")]
    NoSections,
}

/// Ordered, immutable list of the page's sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    pub fn new<I, S>(ids: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sections: Vec<SectionDescriptor> = Vec::new();
        for (dom_order, id) in ids.into_iter().enumerate() {
            let id = id.into();
            if id.trim().is_empty() {
                return Err(RegistryError::EmptyId(dom_order));
            }
            if sections.iter().any(|section| section.id == id) {
                return Err(RegistryError::DuplicateId(id));
            }
            sections.push(SectionDescriptor { id, dom_order });
        }
        if sections.is_empty() {
            return Err(RegistryError::NoSections);
        }
        Ok(Self { sections })
    }

    /// The fixed section list of the portfolio page.
    pub fn portfolio() -> Self {
        let sections = PORTFOLIO_SECTIONS
            .iter()
            .enumerate()
            .map(|(dom_order, id)| SectionDescriptor {
                id: (*id).to_string(),
                dom_order,
            })
            .collect();
        Self { sections }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|section| section.id == id)
    }

    /// First section in visual order; the initial active section.
    pub fn first(&self) -> &SectionDescriptor {
        // Construction guarantees at least one section.
        &self.sections[0]
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::portfolio()
    }
}
