//! Smooth scroll-to-section navigation and its sequencing with the mobile menu.

use std::time::Duration;

use site_logging::{site_debug, site_info};

use crate::sections::SectionRegistry;
use crate::Effect;

/// Scroll positions within this many px of the target count as arrived.
const ARRIVAL_TOLERANCE_PX: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_section_id: String,
    pub originated_from_collapsed_menu: bool,
}

impl NavigationRequest {
    /// Click on a desktop header link (or any in-page link).
    pub fn from_header(section_id: impl Into<String>) -> Self {
        Self {
            target_section_id: section_id.into(),
            originated_from_collapsed_menu: false,
        }
    }

    /// Click inside the collapsible mobile menu.
    pub fn from_menu(section_id: impl Into<String>) -> Self {
        Self {
            target_section_id: section_id.into(),
            originated_from_collapsed_menu: true,
        }
    }
}

/// Layout facts the navigator depends on. Both mirror values declared by the
/// header: its rendered height and its menu's collapse animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorSettings {
    pub header_offset_px: f64,
    pub menu_collapse: Duration,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            header_offset_px: 80.0,
            menu_collapse: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MobileMenuState {
    pub is_open: bool,
}

impl MobileMenuState {
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Closes the menu; returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.is_open, false)
    }
}

/// Section position read from the laid-out page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMeasurement {
    /// Section top relative to the viewport.
    pub rect_top: f64,
    /// Page scroll offset at the time of the read.
    pub scroll_y: f64,
}

/// Document offset to scroll to so the section sits just below the fixed header.
pub fn scroll_target(measurement: SectionMeasurement, header_offset_px: f64) -> f64 {
    (measurement.rect_top + measurement.scroll_y - header_offset_px).max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    /// Menu closed; waiting for its collapse to finish before reading layout.
    Settling { request: NavigationRequest, generation: u64 },
    /// Layout read requested from the host.
    Measuring { request: NavigationRequest, generation: u64 },
    /// Smooth scroll handed to the host.
    Scrolling { request: NavigationRequest, target_y: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    settings: NavigatorSettings,
    phase: Phase,
    generation: u64,
}

impl Navigator {
    pub fn new(settings: NavigatorSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Section currently being navigated to, if any.
    pub fn pending_target(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Settling { request, .. }
            | Phase::Measuring { request, .. }
            | Phase::Scrolling { request, .. } => Some(request.target_section_id.as_str()),
        }
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    /// Target offset of the programmatic scroll in flight.
    pub fn scroll_in_flight(&self) -> Option<f64> {
        match self.phase {
            Phase::Scrolling { target_y, .. } => Some(target_y),
            _ => None,
        }
    }

    /// Starts a navigation. An open menu is closed first and the layout is
    /// only read once its collapse has finished. A request arriving while a
    /// collapse is still settling replaces the pending one and restarts the
    /// wait, so at most one deferred task exists.
    pub fn navigate(
        &mut self,
        request: NavigationRequest,
        menu: &mut MobileMenuState,
        registry: &SectionRegistry,
    ) -> Vec<Effect> {
        if !registry.contains(&request.target_section_id) {
            site_debug!("navigation to unknown section {} ignored", request.target_section_id);
            return Vec::new();
        }

        self.generation += 1;
        let generation = self.generation;
        let closed_menu = request.originated_from_collapsed_menu && menu.close();

        if closed_menu || self.is_settling() {
            site_info!(
                "navigate {} after menu collapse ({} ms)",
                request.target_section_id,
                self.settings.menu_collapse.as_millis()
            );
            self.phase = Phase::Settling {
                request,
                generation,
            };
            return vec![Effect::ScheduleSettle {
                generation,
                delay: self.settings.menu_collapse,
            }];
        }

        site_info!("navigate {}", request.target_section_id);
        let section_id = request.target_section_id.clone();
        self.phase = Phase::Measuring {
            request,
            generation,
        };
        vec![Effect::MeasureSection {
            section_id,
            generation,
        }]
    }

    /// The deferred settle task fired. Stale generations are ignored.
    pub fn on_settle_elapsed(&mut self, generation: u64) -> Vec<Effect> {
        match &self.phase {
            Phase::Settling {
                request,
                generation: pending,
            } if *pending == generation => {
                let request = request.clone();
                let section_id = request.target_section_id.clone();
                self.phase = Phase::Measuring {
                    request,
                    generation,
                };
                vec![Effect::MeasureSection {
                    section_id,
                    generation,
                }]
            }
            _ => {
                site_debug!("stale settle generation {} ignored", generation);
                Vec::new()
            }
        }
    }

    /// The host answered a layout read. A missing section ends the
    /// navigation silently.
    pub fn on_measured(
        &mut self,
        generation: u64,
        measurement: Option<SectionMeasurement>,
    ) -> Vec<Effect> {
        let request = match &self.phase {
            Phase::Measuring {
                request,
                generation: pending,
            } if *pending == generation => request.clone(),
            _ => return Vec::new(),
        };

        let Some(measurement) = measurement else {
            site_debug!("section {} not mounted; navigation dropped", request.target_section_id);
            self.phase = Phase::Idle;
            return Vec::new();
        };

        let target_y = scroll_target(measurement, self.settings.header_offset_px);
        self.phase = Phase::Scrolling { request, target_y };
        vec![Effect::SmoothScrollTo { top: target_y }]
    }

    /// Observes a sampled scroll offset; ends the navigation once the page
    /// has arrived at the target (or as close as the document allows).
    /// Returns true when this sample settled the navigation.
    pub fn on_scroll_sample(&mut self, scroll_y: f64, max_scroll: f64) -> bool {
        let Phase::Scrolling { request, target_y } = &self.phase else {
            return false;
        };
        let reachable = target_y.min(max_scroll);
        if (scroll_y - reachable).abs() > ARRIVAL_TOLERANCE_PX {
            return false;
        }
        site_debug!("arrived at {} (y={:.0})", request.target_section_id, scroll_y);
        self.phase = Phase::Idle;
        true
    }

    /// The host's smooth scroll stopped, either at its destination or
    /// interrupted by a user scroll. Discards the request either way.
    /// Returns true when a navigation was in flight.
    pub fn on_scroll_ended(&mut self) -> bool {
        let Phase::Scrolling { request, target_y } = &self.phase else {
            return false;
        };
        site_debug!(
            "scroll to {} ended (target y={:.0})",
            request.target_section_id,
            target_y
        );
        self.phase = Phase::Idle;
        true
    }

    /// Abandons any navigation, e.g. on unmount. Returns the effects needed
    /// to drop a pending deferred task.
    pub fn cancel(&mut self) -> Vec<Effect> {
        let was_settling = self.is_settling();
        self.phase = Phase::Idle;
        if was_settling {
            vec![Effect::CancelSettle]
        } else {
            Vec::new()
        }
    }
}

/// Monotonic ease-in-out scroll between two offsets, as performed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn position_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        };
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{scroll_target, SectionMeasurement, SmoothScroll};

    #[test]
    fn target_subtracts_header_and_clamps_at_top() {
        let measurement = SectionMeasurement {
            rect_top: 500.0,
            scroll_y: 1200.0,
        };
        assert_eq!(scroll_target(measurement, 80.0), 1620.0);

        let near_top = SectionMeasurement {
            rect_top: 20.0,
            scroll_y: 10.0,
        };
        assert_eq!(scroll_target(near_top, 80.0), 0.0);
    }

    #[test]
    fn smooth_scroll_is_monotonic_without_overshoot() {
        for (from, to) in [(0.0, 2400.0), (1800.0, 300.0)] {
            let scroll = SmoothScroll::new(from, to, Duration::from_millis(500));
            let positions: Vec<f64> = (0..=60)
                .map(|i| scroll.position_at(Duration::from_millis(i * 10)))
                .collect();
            let ascending = to > from;
            assert!(positions.windows(2).all(|w| if ascending {
                w[1] >= w[0]
            } else {
                w[1] <= w[0]
            }));
            let (low, high) = if ascending { (from, to) } else { (to, from) };
            assert!(positions.iter().all(|p| *p >= low && *p <= high));
            assert_eq!(*positions.last().unwrap(), to);
        }
    }
}
