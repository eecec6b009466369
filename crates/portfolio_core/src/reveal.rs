//! One-shot "reveal on first viewport entry" animation groups.

use std::time::Duration;

use site_logging::site_debug;

use crate::geometry::Rect;
use crate::spring::SpringConfig;

/// Negative root margin: a group triggers once it is this far inside the viewport.
pub const REVEAL_ROOT_MARGIN_PX: f64 = 100.0;
/// Distance hidden children sit below their resting place.
pub const REVEAL_OFFSET_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTrigger {
    /// Reveal as soon as the page mounts.
    OnMount,
    /// Reveal on the first viewport intersection.
    OnViewportEntry,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    pub trigger: RevealTrigger,
    pub root_margin_px: f64,
    /// Delay before the first child starts.
    pub delay_children: Duration,
    /// Delay between consecutive children.
    pub stagger: Duration,
    pub spring: SpringConfig,
    pub offset_px: f64,
}

impl RevealConfig {
    /// Content section revealed on scroll.
    pub fn section(stagger: Duration) -> Self {
        Self {
            trigger: RevealTrigger::OnViewportEntry,
            root_margin_px: REVEAL_ROOT_MARGIN_PX,
            delay_children: Duration::ZERO,
            stagger,
            spring: SpringConfig::new(100.0, 12.0),
            offset_px: REVEAL_OFFSET_PX,
        }
    }

    /// Intro hero, revealed on mount.
    pub fn intro() -> Self {
        Self {
            trigger: RevealTrigger::OnMount,
            root_margin_px: 0.0,
            delay_children: Duration::from_millis(300),
            stagger: Duration::from_millis(150),
            spring: SpringConfig::new(150.0, 12.0),
            offset_px: 50.0,
        }
    }
}

/// Hidden → Visible only; Visible is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    #[default]
    Hidden,
    Visible { revealed_at_ms: u64 },
}

/// Animated properties of one child at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildFrame {
    pub opacity: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealGroup {
    id: String,
    children: usize,
    config: RevealConfig,
    phase: RevealPhase,
}

impl RevealGroup {
    pub fn new(id: impl Into<String>, children: usize, config: RevealConfig) -> Self {
        Self {
            id: id.into(),
            children,
            config,
            phase: RevealPhase::Hidden,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> usize {
        self.children
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, RevealPhase::Visible { .. })
    }

    /// Whether the container lies within the viewport shrunk by the root margin.
    pub fn is_in_trigger_band(&self, container: Rect, viewport_height: f64) -> bool {
        let margin = self.config.root_margin_px;
        container.intersects_band(margin, viewport_height - margin)
    }

    /// Feeds an intersection observation. Returns true only for the single
    /// Hidden → Visible transition.
    pub fn observe(&mut self, container: Rect, viewport_height: f64, now_ms: u64) -> bool {
        if self.is_visible() || !self.is_in_trigger_band(container, viewport_height) {
            return false;
        }
        self.reveal(now_ms)
    }

    /// Reveals unconditionally (mount-triggered groups). Returns false when
    /// already visible.
    pub fn reveal(&mut self, now_ms: u64) -> bool {
        if self.is_visible() {
            return false;
        }
        site_debug!("reveal {} ({} children)", self.id, self.children);
        self.phase = RevealPhase::Visible {
            revealed_at_ms: now_ms,
        };
        true
    }

    /// Start delay of child `index` relative to the reveal.
    pub fn child_delay(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.config.delay_children + self.config.stagger.saturating_mul(index)
    }

    pub fn child_frame(&self, index: usize, now_ms: u64) -> ChildFrame {
        let hidden = ChildFrame {
            opacity: 0.0,
            translate_y: self.config.offset_px,
        };
        let RevealPhase::Visible { revealed_at_ms } = self.phase else {
            return hidden;
        };
        let t = self.child_elapsed_secs(index, revealed_at_ms, now_ms);
        if t <= 0.0 {
            return hidden;
        }
        let progress = self.config.spring.progress(t);
        ChildFrame {
            opacity: progress.clamp(0.0, 1.0),
            translate_y: self.config.offset_px * (1.0 - progress),
        }
    }

    pub fn frames(&self, now_ms: u64) -> Vec<ChildFrame> {
        (0..self.children)
            .map(|index| self.child_frame(index, now_ms))
            .collect()
    }

    /// True once every child has come to rest. Hidden groups are not animating.
    pub fn is_settled(&self, now_ms: u64) -> bool {
        match self.phase {
            RevealPhase::Hidden => true,
            RevealPhase::Visible { revealed_at_ms } => {
                let last = self.children.saturating_sub(1);
                let t = self.child_elapsed_secs(last, revealed_at_ms, now_ms);
                self.children == 0 || self.config.spring.is_settled_at(t)
            }
        }
    }

    fn child_elapsed_secs(&self, index: usize, revealed_at_ms: u64, now_ms: u64) -> f64 {
        let since_reveal = now_ms.saturating_sub(revealed_at_ms) as f64 / 1000.0;
        since_reveal - self.child_delay(index).as_secs_f64()
    }
}
