//! Contact form state, validation and the two-stage relay submission.

use site_logging::{site_info, site_warn};
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

/// First problem found with the form; its `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your message")]
    MissingMessage,
}

/// Checks the fields in display order and stops at the first failure.
pub fn validate(fields: &ContactFields) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if fields.email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_plausible_email(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if fields.message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

/// Shape check `local@domain.tld`: no whitespace, exactly one `@`, a
/// non-empty local part and a domain holding a `.` with text on both sides.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

/// The two relay dispatches of a submission, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchStage {
    ApplicantAcknowledgment,
    AdministratorNotification,
}

impl DispatchStage {
    pub fn next(self) -> Option<Self> {
        match self {
            DispatchStage::ApplicantAcknowledgment => {
                Some(DispatchStage::AdministratorNotification)
            }
            DispatchStage::AdministratorNotification => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DispatchStage::ApplicantAcknowledgment => "applicant acknowledgment",
            DispatchStage::AdministratorNotification => "administrator notification",
        }
    }
}

/// Field payload handed to the relay; identical for both stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPayload {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

impl From<&ContactFields> for RelayPayload {
    fn from(fields: &ContactFields) -> Self {
        Self {
            from_name: fields.name.clone(),
            from_email: fields.email.clone(),
            message: fields.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed { reason: String },
}

/// A relay dispatch the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub submission: SubmissionId,
    pub stage: DispatchStage,
    pub payload: RelayPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    submission: SubmissionId,
    stage: DispatchStage,
    payload: RelayPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    fields: ContactFields,
    status: SubmissionStatus,
    status_message: String,
    submitting: bool,
    in_flight: Option<InFlight>,
    last_submission: SubmissionId,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while a submission is in progress; the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Applies a field edit. The status line is left as it is.
    pub fn edit(&mut self, field: ContactField, value: String) {
        self.fields.set(field, value);
    }

    /// Validates and, when valid, starts the first dispatch. Ignored while
    /// a submission is already in progress.
    pub fn submit(&mut self) -> Option<Dispatch> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.status = SubmissionStatus::Validating;

        if let Err(err) = validate(&self.fields) {
            self.finish(SubmissionStatus::Failed, err.to_string());
            return None;
        }

        self.last_submission += 1;
        let dispatch = Dispatch {
            submission: self.last_submission,
            stage: DispatchStage::ApplicantAcknowledgment,
            payload: RelayPayload::from(&self.fields),
        };
        site_info!("submission {} sending", dispatch.submission);
        self.status = SubmissionStatus::Sending;
        self.status_message.clear();
        self.in_flight = Some(InFlight {
            submission: dispatch.submission,
            stage: dispatch.stage,
            payload: dispatch.payload.clone(),
        });
        Some(dispatch)
    }

    /// Records a dispatch result and returns the next dispatch, if any.
    /// Results for anything but the dispatch in flight are ignored.
    pub fn on_dispatch_finished(
        &mut self,
        submission: SubmissionId,
        stage: DispatchStage,
        outcome: DispatchOutcome,
    ) -> Option<Dispatch> {
        let in_flight = self
            .in_flight
            .as_ref()
            .filter(|flight| flight.submission == submission && flight.stage == stage)?;

        match outcome {
            DispatchOutcome::Delivered => match stage.next() {
                Some(next) => {
                    let dispatch = Dispatch {
                        submission,
                        stage: next,
                        payload: in_flight.payload.clone(),
                    };
                    self.in_flight = Some(InFlight {
                        submission,
                        stage: next,
                        payload: dispatch.payload.clone(),
                    });
                    Some(dispatch)
                }
                None => {
                    site_info!("submission {} delivered", submission);
                    self.in_flight = None;
                    self.fields = ContactFields::default();
                    self.finish(SubmissionStatus::Succeeded, SUCCESS_MESSAGE.to_string());
                    None
                }
            },
            DispatchOutcome::Failed { reason } => {
                site_warn!(
                    "submission {} failed at {}: {}",
                    submission,
                    stage.label(),
                    reason
                );
                self.in_flight = None;
                self.finish(SubmissionStatus::Failed, FAILURE_MESSAGE.to_string());
                None
            }
        }
    }

    fn finish(&mut self, status: SubmissionStatus, message: String) {
        self.status = status;
        self.status_message = message;
        self.submitting = false;
    }
}
