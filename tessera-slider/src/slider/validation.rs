use std::fmt;

use rust_decimal::Decimal;

/// One of the two handles of a slider.
///
/// A single-value slider only ever uses [`Bound::Lower`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The `value` handle.
    Lower,
    /// The `upper_value` handle of a range slider.
    Upper,
}

impl Bound {
    /// The handle this one is ordered against.
    pub fn companion(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

/// A range-slider assignment that would cross or meet the other handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeViolation {
    /// The handle that was being assigned.
    pub bound: Bound,
    /// Numeric value of the rejected candidate.
    pub candidate: Decimal,
    /// Numeric value of the other handle at the time of the assignment.
    pub companion: Decimal,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.bound {
            Bound::Lower => "less than",
            Bound::Upper => "greater than",
        };
        write!(
            f,
            "{} value {} must be {relation} {} value {}",
            self.bound,
            self.candidate,
            self.bound.companion(),
            self.companion
        )
    }
}

impl std::error::Error for RangeViolation {}

/// Checks that `candidate` keeps the lower handle strictly below the upper
/// handle when assigned to `bound`.
pub fn check_order(
    bound: Bound,
    candidate: Decimal,
    companion: Decimal,
) -> Result<(), RangeViolation> {
    let ordered = match bound {
        Bound::Lower => candidate < companion,
        Bound::Upper => candidate > companion,
    };
    if ordered {
        Ok(())
    } else {
        Err(RangeViolation {
            bound,
            candidate,
            companion,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(Bound::Lower, dec!(10), dec!(50), true)]
    #[case(Bound::Lower, dec!(50), dec!(50), false)]
    #[case(Bound::Lower, dec!(60), dec!(50), false)]
    #[case(Bound::Upper, dec!(60), dec!(10), true)]
    #[case(Bound::Upper, dec!(10), dec!(10), false)]
    #[case(Bound::Upper, dec!(5), dec!(10), false)]
    fn ordering_is_strict(
        #[case] bound: Bound,
        #[case] candidate: Decimal,
        #[case] companion: Decimal,
        #[case] accepted: bool,
    ) {
        assert_eq!(check_order(bound, candidate, companion).is_ok(), accepted);
    }

    #[test]
    fn comparison_is_numeric_not_textual() {
        // "9" > "10" as strings
        assert!(check_order(Bound::Lower, dec!(9), dec!(10)).is_ok());
        assert!(check_order(Bound::Lower, dec!(1.50), dec!(1.5)).is_err());
    }

    #[test]
    fn violation_describes_both_handles() {
        let violation = check_order(Bound::Lower, dec!(60), dec!(50)).unwrap_err();
        assert_eq!(
            violation.to_string(),
            "lower value 60 must be less than upper value 50"
        );

        let violation = check_order(Bound::Upper, dec!(5), dec!(10)).unwrap_err();
        assert_eq!(
            violation.to_string(),
            "upper value 5 must be greater than lower value 10"
        );
    }
}
