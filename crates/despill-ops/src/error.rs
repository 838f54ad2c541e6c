//! Error types for despill operations.

use thiserror::Error;

/// Error type for despill operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Parameter value outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in presets
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// An input image lacks a channel the pipeline reads.
    #[error("{input} image has {got} channels, needs at least {expected}")]
    ChannelMismatch {
        /// Which input (source, limit, color, respill)
        input: &'static str,
        /// Required channel count
        expected: u32,
        /// Actual channel count
        got: u32,
    },

    /// Optional inputs handed to the driver differ from the ones the
    /// setup was resolved for.
    #[error("connected inputs mismatch: {0}")]
    InputMismatch(String),

    /// Worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),

    /// Preset could not be read, parsed or written.
    #[error("preset error: {0}")]
    Preset(String),

    /// Error from despill-core.
    #[error(transparent)]
    Core(#[from] despill_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidParameter`] error.
    #[inline]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for despill operations.
pub type OpsResult<T> = Result<T, OpsError>;
