use rust_decimal::{Decimal, prelude::ToPrimitive};
use tracing::warn;

use crate::error::SliderError;

use super::geometry::track_percent;

/// Largest number of marks [`tick_marks`] will list.
pub(super) const MAX_TICK_MARKS: usize = 10_000;

/// A discrete stop on the slider track.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark<'a> {
    /// Zero-based index from the `min` end of the track.
    pub index: usize,
    /// Numeric value at this stop, `min + index * step`.
    pub value: Decimal,
    /// Position along the track as a percentage.
    pub position: f64,
    /// Label mapped to this stop by index, if one was supplied.
    pub label: Option<&'a str>,
}

/// Number of stops between `min` and `max`, both ends included.
///
/// A trailing partial interval is dropped rather than rounded up.
pub(super) fn tick_count(min: Decimal, max: Decimal, step: Decimal) -> usize {
    if step <= Decimal::ZERO {
        warn!(%step, "tick marks need a positive step");
        return 0;
    }
    let Some(intervals) = max.checked_sub(min).and_then(|span| span.checked_div(step)) else {
        warn!(%min, %max, %step, "tick mark span is out of range");
        return 0;
    };
    intervals
        .floor()
        .checked_add(Decimal::ONE)
        .and_then(|count| count.to_usize())
        .unwrap_or(0)
}

/// Lists the first `count` stops of the track.
///
/// Counts above [`MAX_TICK_MARKS`] list nothing; the count itself still
/// stands for callers that only need the number.
pub(super) fn tick_marks<'a>(
    count: usize,
    min: Decimal,
    max: Decimal,
    step: Decimal,
    labels: &'a [String],
) -> Result<Vec<TickMark<'a>>, SliderError> {
    if count > MAX_TICK_MARKS {
        warn!(count, limit = MAX_TICK_MARKS, "too many tick marks to list");
        return Ok(Vec::new());
    }
    (0..count)
        .map(|index| {
            let value = Decimal::from(index)
                .checked_mul(step)
                .and_then(|offset| min.checked_add(offset))
                .unwrap_or(max);
            Ok(TickMark {
                index,
                value,
                position: track_percent(value, min, max)?,
                label: labels.get(index).map(String::as_str),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(dec!(0), dec!(10), dec!(2), 6)]
    #[case(dec!(0), dec!(100), dec!(1), 101)]
    #[case(dec!(0), dec!(10), dec!(3), 4)]
    #[case(dec!(0), dec!(1), dec!(0.25), 5)]
    #[case(dec!(-5), dec!(5), dec!(5), 3)]
    fn count_includes_both_ends(
        #[case] min: Decimal,
        #[case] max: Decimal,
        #[case] step: Decimal,
        #[case] expected: usize,
    ) {
        assert_eq!(tick_count(min, max, step), expected);
    }

    #[test]
    fn non_positive_step_has_no_ticks() {
        assert_eq!(tick_count(dec!(0), dec!(10), dec!(0)), 0);
        assert_eq!(tick_count(dec!(0), dec!(10), dec!(-1)), 0);
    }

    #[test]
    fn inverted_domain_has_no_ticks() {
        assert_eq!(tick_count(dec!(10), dec!(0), dec!(2)), 0);
    }

    #[test]
    fn marks_beyond_the_limit_are_not_listed() {
        let max = Decimal::from(i64::MAX);
        let count = tick_count(dec!(0), max, dec!(1));

        assert!(count > MAX_TICK_MARKS);
        let marks = tick_marks(count, dec!(0), max, dec!(1), &[]).unwrap();
        assert!(marks.is_empty());

        let listed = tick_marks(MAX_TICK_MARKS, dec!(0), dec!(10000), dec!(1), &[]);
        assert_eq!(listed.map(|marks| marks.len()), Ok(MAX_TICK_MARKS));
    }

    #[test]
    fn marks_carry_position_and_label() {
        let labels = vec!["low".to_string(), "mid".to_string()];
        let marks = tick_marks(3, dec!(0), dec!(10), dec!(5), &labels).unwrap();

        assert_eq!(
            marks,
            vec![
                TickMark {
                    index: 0,
                    value: dec!(0),
                    position: 0.0,
                    label: Some("low"),
                },
                TickMark {
                    index: 1,
                    value: dec!(5),
                    position: 50.0,
                    label: Some("mid"),
                },
                TickMark {
                    index: 2,
                    value: dec!(10),
                    position: 100.0,
                    label: None,
                },
            ]
        );
    }
}
