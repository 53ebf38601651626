use std::fmt;

use crate::errors::FailureReason;

/// Where the current translation job stands
///
/// ```text
/// Idle ──submit──> Submitting ──response──> Succeeded
///                      │                        │
///                      └──failure──> Failed     │
///                                      │        │
///            Submitting <──submit──────┴────────┘
/// ```
///
/// Selecting a new document while no request is in flight returns a terminal
/// state to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet, or a new document was selected
    #[default]
    Idle,
    /// One request is in flight
    Submitting,
    /// The last request produced a result set
    Succeeded,
    /// The last request failed
    Failed(FailureReason),
}

impl SubmissionState {
    /// Whether a request is in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Whether the last attempt has completed, either way
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    /// Failure reason, if the last attempt failed
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}
