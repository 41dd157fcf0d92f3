use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::error::SliderError;

use super::SliderMode;

/// Position of `value` along a `min..max` track as a percentage.
///
/// Out-of-domain values clamp to `0..=100`; the result is rounded to two
/// decimal places with ties going to the even digit.
pub(super) fn track_percent(
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<f64, SliderError> {
    if min == max {
        return Err(SliderError::DegenerateDomain { min, max });
    }
    let (value, min, max) = (as_f64(value), as_f64(min), as_f64(max));
    let percent = 100.0 * (value - min) / (max - min);
    Ok(round_percent(percent.clamp(0.0, 100.0)))
}

/// Width of the active track segment.
///
/// A single slider fills from the track origin to `lower`. A range slider
/// fills the span `upper - lower`, measured with the same formula as a
/// position.
pub(super) fn fill_width(
    mode: SliderMode,
    lower: Decimal,
    upper: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<f64, SliderError> {
    match mode {
        SliderMode::Single => track_percent(lower, min, max),
        SliderMode::Range => track_percent(upper.saturating_sub(lower), min, max),
    }
}

/// Start inset of the active track segment.
pub(super) fn fill_offset(
    mode: SliderMode,
    lower: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<f64, SliderError> {
    match mode {
        SliderMode::Single => Ok(0.0),
        SliderMode::Range => track_percent(lower, min, max),
    }
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn round_percent(percent: f64) -> f64 {
    (percent * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(dec!(50), 50.0)]
    #[case(dec!(0), 0.0)]
    #[case(dec!(100), 100.0)]
    #[case(dec!(-20), 0.0)]
    #[case(dec!(250), 100.0)]
    fn position_clamps_to_track(#[case] value: Decimal, #[case] expected: f64) {
        assert_eq!(track_percent(value, dec!(0), dec!(100)), Ok(expected));
    }

    #[test]
    fn position_rounds_to_two_places() {
        assert_eq!(track_percent(dec!(1), dec!(0), dec!(3)), Ok(33.33));
        assert_eq!(track_percent(dec!(2), dec!(0), dec!(3)), Ok(66.67));
    }

    #[test]
    fn position_respects_offset_domain() {
        assert_eq!(track_percent(dec!(15), dec!(10), dec!(20)), Ok(50.0));
        assert_eq!(track_percent(dec!(-5), dec!(-10), dec!(10)), Ok(25.0));
    }

    #[test]
    fn empty_domain_is_reported() {
        assert_eq!(
            track_percent(dec!(5), dec!(5), dec!(5)),
            Err(SliderError::DegenerateDomain {
                min: dec!(5),
                max: dec!(5)
            })
        );
    }

    #[test]
    fn single_fill_starts_at_origin() {
        let (min, max) = (dec!(0), dec!(100));
        assert_eq!(
            fill_width(SliderMode::Single, dec!(50), dec!(0), min, max),
            Ok(50.0)
        );
        assert_eq!(fill_offset(SliderMode::Single, dec!(50), min, max), Ok(0.0));
    }

    #[test]
    fn range_fill_spans_the_handles() {
        let (min, max) = (dec!(0), dec!(100));
        assert_eq!(
            fill_width(SliderMode::Range, dec!(20), dec!(80), min, max),
            Ok(60.0)
        );
        assert_eq!(fill_offset(SliderMode::Range, dec!(20), min, max), Ok(20.0));
    }

    #[test]
    fn range_fill_never_goes_negative() {
        assert_eq!(
            fill_width(SliderMode::Range, dec!(80), dec!(20), dec!(0), dec!(100)),
            Ok(0.0)
        );
    }
}
