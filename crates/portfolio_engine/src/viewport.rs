//! Page geometry seam and a deterministic in-memory page.

use std::time::Duration;

use portfolio_core::{Rect, ScrollSample, SectionMeasurement, SectionRegistry, SmoothScroll};
use serde::{Deserialize, Serialize};
use site_logging::{site_debug, site_info};

/// What the state machine needs from a rendered page.
pub trait Viewport {
    fn viewport_height(&self) -> f64;
    /// Geometry for one animation frame.
    fn sample(&self, sections: &SectionRegistry) -> ScrollSample;
    /// Reads a section's position; `None` when it is not in the page.
    fn measure(&self, section_id: &str) -> Option<SectionMeasurement>;
    /// Viewport-relative rect of a reveal group's container.
    fn container_rect(&self, group: &str) -> Option<Rect>;
    fn smooth_scroll_to(&mut self, top: f64, now_ms: u64);
    fn set_menu_open(&mut self, open: bool, now_ms: u64);
    fn set_scroll_listener(&mut self, enabled: bool);
    fn observe(&mut self, group: &str, root_margin_px: f64);
    fn unobserve(&mut self, group: &str);
    fn download(&mut self, href: &str, file_name: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub height: f64,
}

/// Static page dimensions, in px unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub viewport_height: f64,
    /// Fixed header height; sections scroll to just below it.
    pub header_height: f64,
    /// Height of the mobile menu when fully open. It sits in the document
    /// flow above the sections, so opening it pushes them down.
    pub menu_height: f64,
    pub menu_collapse_ms: u64,
    #[serde(default = "default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
    #[serde(default)]
    pub footer_height: f64,
    pub sections: Vec<SectionBox>,
}

fn default_smooth_scroll_ms() -> u64 {
    600
}

impl Default for PageLayout {
    fn default() -> Self {
        let sections = [
            ("home", 900.0),
            ("skills", 1100.0),
            ("experience", 1400.0),
            ("projects", 1600.0),
            ("goals", 900.0),
            ("contact", 1000.0),
        ]
        .into_iter()
        .map(|(id, height)| SectionBox {
            id: id.to_string(),
            height,
        })
        .collect();
        Self {
            viewport_height: 800.0,
            header_height: 80.0,
            menu_height: 320.0,
            menu_collapse_ms: 300,
            smooth_scroll_ms: default_smooth_scroll_ms(),
            footer_height: 300.0,
            sections,
        }
    }
}

impl PageLayout {
    pub fn menu_collapse(&self) -> Duration {
        Duration::from_millis(self.menu_collapse_ms)
    }
}

/// Linear height animation of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MenuMotion {
    from: f64,
    to: f64,
    started_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct Observation {
    group: String,
    root_margin_px: f64,
}

/// What changed on the page since the previous [`LayoutViewport::advance`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewportEvents {
    /// A scroll listener is attached and the offset moved.
    pub scrolled: bool,
    /// Observed groups whose container is inside the observer band.
    pub intersections: Vec<(String, Rect)>,
    /// The smooth scroll finished or was interrupted by a user scroll.
    pub scroll_ended: bool,
}

/// Page laid out from a [`PageLayout`] and driven by a caller-supplied clock.
#[derive(Debug, Clone)]
pub struct LayoutViewport {
    layout: PageLayout,
    now_ms: u64,
    scroll_y: f64,
    reported_scroll_y: f64,
    menu: MenuMotion,
    scroll_animation: Option<(SmoothScroll, u64)>,
    scroll_ended: bool,
    listening: bool,
    observed: Vec<Observation>,
    downloads: Vec<(String, String)>,
}

impl LayoutViewport {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            now_ms: 0,
            scroll_y: 0.0,
            reported_scroll_y: 0.0,
            menu: MenuMotion {
                from: 0.0,
                to: 0.0,
                started_ms: 0,
            },
            scroll_animation: None,
            scroll_ended: false,
            listening: false,
            observed: Vec::new(),
            downloads: Vec::new(),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_observing(&self, group: &str) -> bool {
        self.observed.iter().any(|o| o.group == group)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_animation.is_some()
    }

    pub fn downloads(&self) -> &[(String, String)] {
        &self.downloads
    }

    /// Current in-flow height of the mobile menu.
    pub fn menu_height(&self) -> f64 {
        let duration = self.layout.menu_collapse_ms;
        let elapsed = self.now_ms.saturating_sub(self.menu.started_ms);
        if duration == 0 || elapsed >= duration {
            return self.menu.to;
        }
        let t = elapsed as f64 / duration as f64;
        self.menu.from + (self.menu.to - self.menu.from) * t
    }

    pub fn document_height(&self) -> f64 {
        self.menu_height()
            + self.layout.sections.iter().map(|s| s.height).sum::<f64>()
            + self.layout.footer_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.layout.viewport_height).max(0.0)
    }

    /// Scroll performed by the user; interrupts a programmatic scroll.
    pub fn user_scroll_to(&mut self, y: f64) {
        if self.scroll_animation.take().is_some() {
            site_debug!("user scroll interrupted smooth scroll");
            self.scroll_ended = true;
        }
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Moves the clock to `now_ms` and reports what the page would notify.
    pub fn advance(&mut self, now_ms: u64) -> ViewportEvents {
        self.now_ms = self.now_ms.max(now_ms);
        if let Some((animation, started_ms)) = self.scroll_animation {
            let elapsed = Duration::from_millis(self.now_ms.saturating_sub(started_ms));
            self.scroll_y = animation.position_at(elapsed);
            if animation.is_finished(elapsed) {
                self.scroll_animation = None;
                self.scroll_ended = true;
            }
        }
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());

        let scrolled =
            self.listening && (self.scroll_y - self.reported_scroll_y).abs() > f64::EPSILON;
        self.reported_scroll_y = self.scroll_y;

        let viewport_height = self.layout.viewport_height;
        let intersections = self
            .observed
            .iter()
            .filter_map(|o| {
                let rect = self.container_rect(&o.group)?;
                rect.intersects_band(o.root_margin_px, viewport_height - o.root_margin_px)
                    .then(|| (o.group.clone(), rect))
            })
            .collect();

        ViewportEvents {
            scrolled,
            intersections,
            scroll_ended: std::mem::take(&mut self.scroll_ended),
        }
    }

    fn section_document_top(&self, id: &str) -> Option<f64> {
        let mut top = self.menu_height();
        for section in &self.layout.sections {
            if section.id == id {
                return Some(top);
            }
            top += section.height;
        }
        None
    }

    fn section_rect(&self, id: &str) -> Option<Rect> {
        let top = self.section_document_top(id)?;
        let height = self
            .layout
            .sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.height)?;
        Some(Rect::new(top - self.scroll_y, top + height - self.scroll_y))
    }
}

impl Viewport for LayoutViewport {
    fn viewport_height(&self) -> f64 {
        self.layout.viewport_height
    }

    fn sample(&self, sections: &SectionRegistry) -> ScrollSample {
        ScrollSample {
            scroll_y: self.scroll_y,
            viewport_height: self.layout.viewport_height,
            document_height: self.document_height(),
            sections: sections
                .ids()
                .map(|id| (id.to_string(), self.section_rect(id)))
                .collect(),
        }
    }

    fn measure(&self, section_id: &str) -> Option<SectionMeasurement> {
        self.section_rect(section_id).map(|rect| SectionMeasurement {
            rect_top: rect.top,
            scroll_y: self.scroll_y,
        })
    }

    fn container_rect(&self, group: &str) -> Option<Rect> {
        self.section_rect(group)
    }

    fn smooth_scroll_to(&mut self, top: f64, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let to = top.clamp(0.0, self.max_scroll());
        let duration = Duration::from_millis(self.layout.smooth_scroll_ms);
        site_info!("smooth scroll {:.1} -> {:.1}", self.scroll_y, to);
        let animation = SmoothScroll::new(self.scroll_y, to, duration);
        self.scroll_animation = Some((animation, self.now_ms));
        // A replaced scroll does not end the navigation that replaced it.
        self.scroll_ended = false;
    }

    fn set_menu_open(&mut self, open: bool, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let to = if open { self.layout.menu_height } else { 0.0 };
        if (self.menu.to - to).abs() <= f64::EPSILON {
            return;
        }
        self.menu = MenuMotion {
            from: self.menu_height(),
            to,
            started_ms: self.now_ms,
        };
    }

    fn set_scroll_listener(&mut self, enabled: bool) {
        self.listening = enabled;
        self.reported_scroll_y = self.scroll_y;
    }

    fn observe(&mut self, group: &str, root_margin_px: f64) {
        if !self.is_observing(group) {
            self.observed.push(Observation {
                group: group.to_string(),
                root_margin_px,
            });
        }
    }

    fn unobserve(&mut self, group: &str) {
        self.observed.retain(|o| o.group != group);
    }

    fn download(&mut self, href: &str, file_name: &str) {
        site_info!("saving {} as {}", href, file_name);
        self.downloads.push((href.to_string(), file_name.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutViewport, PageLayout, Viewport};

    #[test]
    fn menu_height_animates_over_collapse() {
        let mut viewport = LayoutViewport::new(PageLayout::default());
        viewport.set_menu_open(true, 0);
        viewport.advance(150);
        assert_eq!(viewport.menu_height(), 160.0);
        viewport.advance(300);
        assert_eq!(viewport.menu_height(), 320.0);
        viewport.set_menu_open(false, 1000);
        viewport.advance(1300);
        assert_eq!(viewport.menu_height(), 0.0);
    }

    #[test]
    fn scroll_end_is_reported_once_when_finished_or_interrupted() {
        let mut viewport = LayoutViewport::new(PageLayout::default());
        viewport.smooth_scroll_to(1000.0, 0);
        assert!(!viewport.advance(300).scroll_ended);
        assert!(viewport.advance(600).scroll_ended);
        assert_eq!(viewport.scroll_y(), 1000.0);
        assert!(!viewport.advance(616).scroll_ended);

        viewport.smooth_scroll_to(3000.0, 700);
        viewport.advance(800);
        viewport.user_scroll_to(200.0);
        assert!(!viewport.is_scrolling());
        let events = viewport.advance(816);
        assert!(events.scroll_ended);
        assert_eq!(viewport.scroll_y(), 200.0);

        // Scrolling by hand with no animation running ends nothing.
        viewport.user_scroll_to(50.0);
        assert!(!viewport.advance(832).scroll_ended);
    }

    #[test]
    fn intersections_respect_root_margin() {
        let mut viewport = LayoutViewport::new(PageLayout::default());
        viewport.observe("skills", 100.0);
        // skills spans 900..2000; band is 100..700.
        assert!(viewport.advance(0).intersections.is_empty());
        viewport.user_scroll_to(250.0);
        let events = viewport.advance(16);
        assert_eq!(events.intersections.len(), 1);
        assert_eq!(events.intersections[0].0, "skills");
        viewport.unobserve("skills");
        assert!(viewport.advance(32).intersections.is_empty());
    }
}
