//! Error types surfaced by the slider core.

use std::fmt::Display;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::slider::RangeViolation;

/// Text could not be parsed as the slider's domain type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{input}` to {target}: {reason}")]
pub struct ConversionError {
    /// The rejected text.
    pub input: String,
    /// Name of the type the text was parsed as.
    pub target: &'static str,
    /// Parser message.
    pub reason: String,
}

impl ConversionError {
    /// Creates a conversion error for `input`.
    pub fn new(input: impl Into<String>, target: &'static str, reason: impl Display) -> Self {
        Self {
            input: input.into(),
            target,
            reason: reason.to_string(),
        }
    }
}

/// Errors produced by slider state operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliderError {
    /// A stored or supplied string is not a valid domain value.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// `min` equals `max`, so positions along the track are undefined.
    #[error("slider domain is empty: min {min} equals max {max}")]
    DegenerateDomain {
        /// Numeric minimum.
        min: Decimal,
        /// Numeric maximum.
        max: Decimal,
    },
    /// A range-slider assignment would cross the other handle.
    #[error(transparent)]
    RangeOrder(#[from] RangeViolation),
}
