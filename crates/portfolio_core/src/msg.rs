use crate::{
    ContactField, DispatchOutcome, DispatchStage, NavigationRequest, Rect, ScrollSample,
    SectionMeasurement, SubmissionId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page shell mounted; listeners and observers may be attached.
    PageMounted { now_ms: u64 },
    /// Page shell is going away; listeners must be released.
    PageUnmounted,
    /// The page scrolled or the viewport was resized.
    ScrollEvent,
    /// Requested animation frame, with the page geometry at that moment.
    AnimationFrame { now_ms: u64, sample: ScrollSample },
    /// User tapped the mobile menu button.
    MenuToggled,
    /// User clicked a navigation link.
    NavigationRequested(NavigationRequest),
    /// The deferred menu-collapse wait finished.
    SettleElapsed { generation: u64 },
    /// Answer to `Effect::MeasureSection`; `None` when the section is not mounted.
    SectionMeasured {
        generation: u64,
        measurement: Option<SectionMeasurement>,
    },
    /// An observed reveal container intersected the viewport.
    RevealIntersection {
        group: String,
        container: Rect,
        viewport_height: f64,
        now_ms: u64,
    },
    /// User edited a contact form field.
    ContactFieldEdited { field: ContactField, value: String },
    /// User pressed the submit control.
    ContactSubmitted,
    /// Answer to `Effect::DispatchRelay`.
    RelayDispatchFinished {
        submission: SubmissionId,
        stage: DispatchStage,
        outcome: DispatchOutcome,
    },
    /// User clicked the CV download button.
    DownloadCvClicked,
    /// The smooth scroll started by `Effect::SmoothScrollTo` stopped, at its
    /// destination or because the user scrolled.
    SmoothScrollEnded,
}
