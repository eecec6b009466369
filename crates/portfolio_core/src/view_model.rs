use crate::{ChildFrame, ContactFields, RevealPhase, SubmissionStatus};

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq)]
pub struct PageViewModel {
    pub header: HeaderView,
    pub reveals: Vec<RevealGroupView>,
    pub contact: ContactView,
    pub dirty: bool,
}

impl PageViewModel {
    pub fn reveal(&self, id: &str) -> Option<&RevealGroupView> {
        self.reveals.iter().find(|group| group.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub nav_items: Vec<NavItemView>,
    pub active_section: String,
    /// Raw scroll progress in `[0, 1]`.
    pub progress_ratio: f64,
    /// Spring-smoothed progress bar scale.
    pub progress_bar: f64,
    /// Header switched to its opaque backdrop style.
    pub backdrop: bool,
    pub menu_open: bool,
    pub navigating_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub section_id: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealGroupView {
    pub id: String,
    pub phase: RevealPhase,
    pub children: Vec<ChildFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub fields: ContactFields,
    pub status: SubmissionStatus,
    pub status_message: String,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}
