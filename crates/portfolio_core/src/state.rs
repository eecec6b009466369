use crate::frame::FrameScheduler;
use crate::view_model::{
    ContactView, HeaderView, NavItemView, PageViewModel, RevealGroupView, SEND_LABEL,
    SENDING_LABEL,
};
use crate::{
    ContactForm, MobileMenuState, Navigator, RevealGroup, ScrollState, ScrollTracker,
    SiteSettings,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    settings: SiteSettings,
    mounted: bool,
    now_ms: u64,
    frames: FrameScheduler,
    scroll: ScrollTracker,
    navigator: Navigator,
    menu: MobileMenuState,
    reveals: Vec<RevealGroup>,
    contact: ContactForm,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(SiteSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SiteSettings) -> Self {
        let scroll = ScrollTracker::new(&settings.sections.first().id);
        let navigator = Navigator::new(settings.navigator);
        let reveals = settings
            .reveal_groups
            .iter()
            .map(|spec| RevealGroup::new(spec.id.clone(), spec.children, spec.config))
            .collect();
        Self {
            settings,
            mounted: false,
            now_ms: 0,
            frames: FrameScheduler::default(),
            scroll,
            navigator,
            menu: MobileMenuState::default(),
            reveals,
            contact: ContactForm::new(),
            dirty: false,
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn scroll_state(&self) -> &ScrollState {
        self.scroll.state()
    }

    pub fn scroll_tracker(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn menu(&self) -> MobileMenuState {
        self.menu
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn reveal(&self, id: &str) -> Option<&RevealGroup> {
        self.reveals.iter().find(|group| group.id() == id)
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames.delivered()
    }

    pub fn view(&self) -> PageViewModel {
        let scroll = self.scroll.state();
        let nav_items = self
            .settings
            .sections
            .ids()
            .map(|id| NavItemView {
                section_id: id.to_string(),
                label: capitalize(id),
                active: id == scroll.active_section_id,
            })
            .collect();
        let header = HeaderView {
            nav_items,
            active_section: scroll.active_section_id.clone(),
            progress_ratio: scroll.progress_ratio,
            progress_bar: self.scroll.smoothed_progress(),
            backdrop: scroll.is_past_threshold,
            menu_open: self.menu.is_open,
            navigating_to: self.navigator.pending_target().map(ToOwned::to_owned),
        };
        let reveals = self
            .reveals
            .iter()
            .map(|group| RevealGroupView {
                id: group.id().to_string(),
                phase: group.phase(),
                children: group.frames(self.now_ms),
            })
            .collect();
        let contact = ContactView {
            fields: self.contact.fields().clone(),
            status: self.contact.status(),
            status_message: self.contact.status_message().to_string(),
            submit_enabled: !self.contact.is_submitting(),
            submit_label: if self.contact.is_submitting() {
                SENDING_LABEL
            } else {
                SEND_LABEL
            },
        };
        PageViewModel {
            header,
            reveals,
            contact,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Moves the clock forward; timestamps never go back.
    pub(crate) fn advance_clock(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub(crate) fn frames_mut(&mut self) -> &mut FrameScheduler {
        &mut self.frames
    }

    pub(crate) fn scroll_mut(&mut self) -> &mut ScrollTracker {
        &mut self.scroll
    }

    pub(crate) fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub(crate) fn menu_mut(&mut self) -> &mut MobileMenuState {
        &mut self.menu
    }

    pub(crate) fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub(crate) fn reveals_mut(&mut self) -> &mut [RevealGroup] {
        &mut self.reveals
    }

    pub(crate) fn reveals(&self) -> &[RevealGroup] {
        &self.reveals
    }

    /// Split borrow for navigation, which reads the registry while updating
    /// the navigator and the menu together.
    pub(crate) fn navigation_parts(
        &mut self,
    ) -> (&mut Navigator, &mut MobileMenuState, &SiteSettings) {
        (&mut self.navigator, &mut self.menu, &self.settings)
    }

    /// Split borrow for frame handling.
    pub(crate) fn frame_parts(
        &mut self,
    ) -> (&mut ScrollTracker, &mut Navigator, &SiteSettings) {
        (&mut self.scroll, &mut self.navigator, &self.settings)
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
