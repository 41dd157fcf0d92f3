//! Value-state core for tessera sliders.
//!
//! A slider keeps its handle values and domain bounds as canonical strings
//! produced by a [`Converter`], enforces strict ordering between the two
//! handles of a range slider, and derives the percentage geometry used to
//! draw the track fill.
//!
//! ## Usage
//!
//! ```
//! use tessera_slider::{Assignment, SliderArgs, SliderMode, SliderState};
//!
//! let mut slider = SliderState::numeric(
//!     SliderArgs::default()
//!         .mode(SliderMode::Range)
//!         .value(20)
//!         .upper_value(80),
//! )?;
//! assert_eq!(slider.fill_width()?, 60.0);
//! assert_eq!(slider.fill_offset()?, 20.0);
//!
//! // Crossing the upper handle is dropped and flagged for the UI layer.
//! assert!(matches!(slider.set_value(90)?, Assignment::Rejected(_)));
//! assert_eq!(slider.value()?, Some(20));
//! assert!(slider.take_invalidation());
//! # Ok::<(), tessera_slider::SliderError>(())
//! ```
//!
//! Gesture capture, rendering and accessibility live in the component layer;
//! this crate only owns the values.
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod converter;
pub mod error;
pub mod prop;
pub mod slider;

pub use converter::{Converter, NumberFormat, NumericConverter};
pub use error::{ConversionError, SliderError};
pub use prop::CallbackWith;
pub use slider::{
    Assignment, Bound, RangeViolation, SliderArgs, SliderMode, SliderState, TickMark, check_order,
};
