//! Read-only access to fleet datasets.

use thiserror::Error;

use crate::fleet::{Fleet, FleetError};

/// Errors returned by [`FleetSource::load_fleet`].
///
/// `Unavailable` points at the data pipeline; `Malformed` and `Invalid` at
/// the data itself. None of them is a solver failure.
#[derive(Debug, Error)]
pub enum FleetSourceError {
    /// The backing dataset is missing or unreadable.
    #[error("fleet dataset is unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause.
        reason: String,
        /// Underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// A record could not be interpreted.
    #[error("fleet dataset is malformed: {reason}")]
    Malformed {
        /// Human-readable cause.
        reason: String,
        /// Underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// The records were read but do not describe a valid fleet.
    #[error("fleet dataset is invalid: {0}")]
    Invalid(#[from] FleetError),
}

impl FleetSourceError {
    /// Dataset missing, without an underlying error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            source: None,
        }
    }

    /// Malformed record, without an underlying error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
            source: None,
        }
    }

    /// Whether the dataset could not be reached at all.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Supplies the roster for a planning run.
///
/// Implementations must be `Send + Sync` so a single source can back
/// concurrent planning requests.
pub trait FleetSource: Send + Sync {
    /// Load the current fleet snapshot.
    fn load_fleet(&self) -> Result<Fleet, FleetSourceError>;
}
