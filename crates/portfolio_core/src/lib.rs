//! Portfolio core: pure state machine for scroll tracking, section
//! navigation, reveal animations and the contact form.
mod contact;
mod effect;
mod frame;
mod geometry;
mod msg;
mod navigation;
mod reveal;
mod scroll;
mod sections;
mod settings;
mod spring;
mod state;
mod update;
mod view_model;

pub use contact::{
    is_plausible_email, validate, ContactField, ContactFields, ContactForm, Dispatch,
    DispatchOutcome, DispatchStage, RelayPayload, SubmissionId, SubmissionStatus,
    ValidationError, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use effect::Effect;
pub use frame::FrameScheduler;
pub use geometry::Rect;
pub use msg::Msg;
pub use navigation::{
    scroll_target, MobileMenuState, NavigationRequest, Navigator, NavigatorSettings,
    SectionMeasurement, SmoothScroll,
};
pub use reveal::{
    ChildFrame, RevealConfig, RevealGroup, RevealPhase, RevealTrigger, REVEAL_OFFSET_PX,
    REVEAL_ROOT_MARGIN_PX,
};
pub use scroll::{
    find_active_section, progress_ratio, FrameOutcome, ScrollSample, ScrollState,
    ScrollTracker, ACTIVATION_LINE_PX, BACKDROP_THRESHOLD_PX, PROGRESS_SPRING,
};
pub use sections::{RegistryError, SectionDescriptor, SectionRegistry, PORTFOLIO_SECTIONS};
pub use settings::{AssetLink, RevealGroupSpec, SiteSettings};
pub use spring::{SpringConfig, SpringValue};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    ContactView, HeaderView, NavItemView, PageViewModel, RevealGroupView, SENDING_LABEL,
    SEND_LABEL,
};
