// src/ui/error.rs
//! Error types for the widget system

use thiserror_no_std::Error;

/// Error types for widget operations
#[derive(Debug, Error)]
pub enum UiError {
    /// A color had the wrong number of channels
    #[error("Incorrect number of channels in colour: {len} (expected 2 to 4)")]
    InvalidChannelCount {
        /// Channel count that was supplied
        len: usize,
    },

    /// Button label does not fit its fixed-capacity buffer
    #[error("Label too long (max: {max} bytes)")]
    LabelTooLong {
        /// Maximum label length in bytes
        max: usize,
    },

    /// Icon coverage data does not match the declared dimensions
    #[error("Mask data has {actual} values, expected {expected}")]
    MaskSizeMismatch {
        /// Value count implied by width x height
        expected: usize,
        /// Value count that was supplied
        actual: usize,
    },
}

/// Result type for widget operations
pub type UiResult<T> = Result<T, UiError>;
