use std::time::Duration;

use crate::{DispatchStage, RelayPayload, SubmissionId};

/// Work the host performs on behalf of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start delivering scroll/resize events.
    SubscribeScroll,
    /// Stop delivering scroll/resize events.
    UnsubscribeScroll,
    /// Deliver one `Msg::AnimationFrame` with a fresh sample.
    RequestAnimationFrame,
    /// Start reporting intersections of a reveal group's container.
    ObserveReveal { group: String, root_margin_px: f64 },
    /// Stop reporting intersections of a reveal group's container.
    UnobserveReveal { group: String },
    /// Deliver `Msg::SettleElapsed` after `delay`, replacing any pending settle.
    ScheduleSettle { generation: u64, delay: Duration },
    /// Drop the pending settle, if any.
    CancelSettle,
    /// Read a section's position and answer with `Msg::SectionMeasured`.
    MeasureSection { section_id: String, generation: u64 },
    /// Smoothly scroll the page to a document offset.
    SmoothScrollTo { top: f64 },
    /// Send one relay message and answer with `Msg::RelayDispatchFinished`.
    DispatchRelay {
        submission: SubmissionId,
        stage: DispatchStage,
        payload: RelayPayload,
    },
    /// Save a static asset under a suggested file name.
    DownloadAsset { href: String, file_name: String },
}
