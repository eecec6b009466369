use std::fmt;

use portfolio_core::{DispatchStage, SubmissionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DispatchFinished {
        submission: SubmissionId,
        stage: DispatchStage,
        result: Result<(), RelayError>,
    },
    SettleElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RelayError {
    pub kind: RelayFailureKind,
    pub message: String,
}

impl RelayError {
    pub(crate) fn new(kind: RelayFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFailureKind {
    NotConfigured,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for RelayFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayFailureKind::NotConfigured => write!(f, "relay not configured"),
            RelayFailureKind::InvalidRequest => write!(f, "invalid request"),
            RelayFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            RelayFailureKind::Timeout => write!(f, "timeout"),
            RelayFailureKind::Network => write!(f, "network error"),
        }
    }
}
