//! Scroll tracking: progress ratio, active section and header backdrop.

use site_logging::site_debug;

use crate::geometry::Rect;
use crate::sections::SectionRegistry;
use crate::spring::{SpringConfig, SpringValue};

/// Distance from the viewport top, in px, of the line deciding the active section.
pub const ACTIVATION_LINE_PX: f64 = 100.0;
/// Scroll offset, in px, past which the header switches to its backdrop style.
pub const BACKDROP_THRESHOLD_PX: f64 = 50.0;
/// Spring smoothing the header progress bar.
pub const PROGRESS_SPRING: SpringConfig = SpringConfig::new(100.0, 30.0).with_rest_delta(0.001);

/// Geometry read from the page on one animation frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    /// Viewport-relative rect per section id; `None` while a section is not mounted.
    pub sections: Vec<(String, Option<Rect>)>,
}

impl ScrollSample {
    pub fn rect_of(&self, section_id: &str) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(id, _)| id == section_id)
            .and_then(|(_, rect)| *rect)
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub progress_ratio: f64,
    pub active_section_id: String,
    pub is_past_threshold: bool,
}

/// `scroll_y / (document_height - viewport_height)` clamped to `[0, 1]`;
/// 0 when the document does not scroll.
pub fn progress_ratio(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// First section, in visual order, crossing the activation line. Unmounted
/// sections are skipped.
pub fn find_active_section<'a>(
    registry: &'a SectionRegistry,
    sample: &ScrollSample,
) -> Option<&'a str> {
    registry
        .ids()
        .find(|id| sample.rect_of(id).is_some_and(|rect| rect.spans_line(ACTIVATION_LINE_PX)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// The derived scroll state or the smoothed progress changed.
    pub changed: bool,
    /// The progress bar is still moving and needs another frame.
    pub needs_frame: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTracker {
    state: ScrollState,
    active: bool,
    scroll_y: f64,
    progress_bar: SpringValue,
}

impl ScrollTracker {
    pub fn new(initial_section: &str) -> Self {
        Self {
            state: ScrollState {
                progress_ratio: 0.0,
                active_section_id: initial_section.to_string(),
                is_past_threshold: false,
            },
            active: false,
            scroll_y: 0.0,
            progress_bar: SpringValue::new(PROGRESS_SPRING, 0.0),
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last sampled scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Progress bar position after spring smoothing.
    pub fn smoothed_progress(&self) -> f64 {
        self.progress_bar.position()
    }

    /// Starts listening. Returns false when already listening.
    pub fn activate(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// Stops listening. Returns false when not listening.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Recomputes the scroll state from a frame's sample and advances the
    /// progress bar spring by `elapsed_ms`.
    pub fn on_frame(
        &mut self,
        registry: &SectionRegistry,
        sample: &ScrollSample,
        elapsed_ms: u64,
    ) -> FrameOutcome {
        if !self.active {
            return FrameOutcome::default();
        }

        let active_section_id = match find_active_section(registry, sample) {
            Some(id) => id.to_string(),
            None => self.state.active_section_id.clone(),
        };
        let next = ScrollState {
            progress_ratio: progress_ratio(
                sample.scroll_y,
                sample.document_height,
                sample.viewport_height,
            ),
            active_section_id,
            is_past_threshold: sample.scroll_y > BACKDROP_THRESHOLD_PX,
        };
        self.scroll_y = sample.scroll_y;

        let mut changed = false;
        if next != self.state {
            if next.active_section_id != self.state.active_section_id {
                site_debug!(
                    "active section {} -> {}",
                    self.state.active_section_id,
                    next.active_section_id
                );
            }
            self.state = next;
            changed = true;
        }

        let before = self.progress_bar.position();
        self.progress_bar.set_target(self.state.progress_ratio);
        self.progress_bar.advance(elapsed_ms as f64 / 1000.0);
        changed |= self.progress_bar.position() != before;

        FrameOutcome {
            changed,
            needs_frame: !self.progress_bar.is_at_rest(),
        }
    }
}
