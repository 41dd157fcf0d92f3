//! Conversion between slider domain values and their canonical text form.
//!
//! ## Usage
//!
//! Inject a [`Converter`] into [`crate::SliderState`] to drive a slider over
//! any ordered value type. [`NumericConverter`] covers primitive numbers and
//! [`rust_decimal::Decimal`].

use std::{any::type_name, fmt::Display, marker::PhantomData, str::FromStr};

use rust_decimal::Decimal;

use crate::error::ConversionError;

/// Strategy that maps a domain value to and from its canonical string.
///
/// The slider only ever stores canonical strings. Every typed read goes
/// through [`Converter::get`] and every typed write through
/// [`Converter::set`], so `get(set(v)) == v` must hold for every value the
/// converter accepts.
pub trait Converter<T>: Send + Sync {
    /// Parses a canonical string. `None` and blank text read as an unset value.
    fn get(&self, canonical: Option<&str>) -> Result<Option<T>, ConversionError>;

    /// Serializes a value into its canonical string.
    fn set(&self, value: Option<&T>) -> Option<String>;

    /// Exact numeric value of a canonical string, used for ordering and
    /// geometry.
    fn to_decimal(&self, canonical: &str) -> Result<Decimal, ConversionError>;

    /// Canonicalizes raw caller text by parsing and re-serializing it.
    fn normalize(&self, raw: &str) -> Result<Option<String>, ConversionError> {
        let value = self.get(Some(raw))?;
        Ok(self.set(value.as_ref()))
    }
}

/// Culture-specific number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    decimal_separator: char,
    group_separator: Option<char>,
}

impl NumberFormat {
    /// Culture-invariant format: `.` as decimal separator, no grouping.
    pub const INVARIANT: Self = Self {
        decimal_separator: '.',
        group_separator: None,
    };

    /// Creates a format with the given separators.
    ///
    /// Group separators are accepted on input but never written.
    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }

    /// The decimal separator of this format.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// The accepted digit-group separator, if any.
    pub fn group_separator(&self) -> Option<char> {
        self.group_separator
    }

    fn to_invariant(self, text: &str) -> String {
        text.trim()
            .chars()
            .filter(|c| Some(*c) != self.group_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }

    fn from_invariant(self, text: &str) -> String {
        if self.decimal_separator == '.' {
            return text.to_owned();
        }
        text.chars()
            .map(|c| if c == '.' { self.decimal_separator } else { c })
            .collect()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::INVARIANT
    }
}

/// Converter for any type with a decimal `FromStr`/`Display` pair.
///
/// This covers the primitive integers and floats as well as `Decimal`.
pub struct NumericConverter<T> {
    format: NumberFormat,
    _marker: PhantomData<fn() -> T>,
}

impl<T> NumericConverter<T> {
    /// Creates a converter using the invariant number format.
    pub fn new() -> Self {
        Self::with_format(NumberFormat::INVARIANT)
    }

    /// Creates a converter for the given number format.
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            format,
            _marker: PhantomData,
        }
    }

    /// The number format used for canonical strings.
    pub fn format(&self) -> NumberFormat {
        self.format
    }
}

impl<T> Default for NumericConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NumericConverter<T> {
    fn clone(&self) -> Self {
        Self::with_format(self.format)
    }
}

impl<T> std::fmt::Debug for NumericConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericConverter")
            .field("target", &type_name::<T>())
            .field("format", &self.format)
            .finish()
    }
}

impl<T> Converter<T> for NumericConverter<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    fn get(&self, canonical: Option<&str>) -> Result<Option<T>, ConversionError> {
        let Some(text) = canonical.filter(|text| !text.trim().is_empty()) else {
            return Ok(None);
        };
        self.format
            .to_invariant(text)
            .parse::<T>()
            .map(Some)
            .map_err(|err| ConversionError::new(text, type_name::<T>(), err))
    }

    fn set(&self, value: Option<&T>) -> Option<String> {
        value.map(|value| self.format.from_invariant(&value.to_string()))
    }

    fn to_decimal(&self, canonical: &str) -> Result<Decimal, ConversionError> {
        let invariant = self.format.to_invariant(canonical);
        parse_decimal(&invariant)
            .map_err(|err| ConversionError::new(canonical, type_name::<Decimal>(), err))
    }
}

/// Parses invariant text into a `Decimal`, accepting scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(text).or_else(|err| {
        if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Err(err)
        }
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    const GERMAN: NumberFormat = NumberFormat::new(',', Some('.'));

    #[rstest]
    #[case(0)]
    #[case(-17)]
    #[case(i64::MAX)]
    fn integers_round_trip(#[case] value: i64) {
        let converter = NumericConverter::<i64>::new();
        let canonical = converter.set(Some(&value));
        assert_eq!(converter.get(canonical.as_deref()), Ok(Some(value)));
    }

    #[rstest]
    #[case(0.1)]
    #[case(-2.5)]
    #[case(1e-7)]
    fn floats_round_trip(#[case] value: f64) {
        let converter = NumericConverter::<f64>::new();
        let canonical = converter.set(Some(&value));
        assert_eq!(converter.get(canonical.as_deref()), Ok(Some(value)));
    }

    #[test]
    fn unset_and_blank_read_as_none() {
        let converter = NumericConverter::<i32>::new();
        assert_eq!(converter.get(None), Ok(None));
        assert_eq!(converter.get(Some("  ")), Ok(None));
        assert_eq!(converter.set(None), None);
    }

    #[test]
    fn unparseable_text_is_a_conversion_error() {
        let converter = NumericConverter::<i32>::new();
        let err = converter.get(Some("twelve")).unwrap_err();
        assert_eq!(err.input, "twelve");
        assert_eq!(err.target, "i32");
    }

    #[test]
    fn culture_format_writes_its_decimal_separator() {
        let converter = NumericConverter::<f64>::with_format(GERMAN);
        assert_eq!(converter.set(Some(&12.5)), Some("12,5".to_string()));
        assert_eq!(converter.get(Some("1.234,5")), Ok(Some(1234.5)));
    }

    #[test]
    fn normalize_canonicalizes_raw_text() {
        let converter = NumericConverter::<i32>::new();
        assert_eq!(converter.normalize(" 007 "), Ok(Some("7".to_string())));

        let german = NumericConverter::<f64>::with_format(GERMAN);
        assert_eq!(german.normalize("1.000,50"), Ok(Some("1000,5".to_string())));
    }

    #[test]
    fn to_decimal_is_exact() {
        let converter = NumericConverter::<f64>::new();
        assert_eq!(converter.to_decimal("0.1"), Ok(dec!(0.1)));
        assert_eq!(converter.to_decimal("2.5e3"), Ok(dec!(2500)));

        let german = NumericConverter::<f64>::with_format(GERMAN);
        assert_eq!(german.to_decimal("-3,25"), Ok(dec!(-3.25)));
    }

    #[test]
    fn to_decimal_rejects_non_numbers() {
        let converter = NumericConverter::<f64>::new();
        assert!(converter.to_decimal("NaN").is_err());
    }

    #[test]
    fn decimal_values_keep_their_scale() {
        let converter = NumericConverter::<Decimal>::new();
        assert_eq!(converter.set(Some(&dec!(1.50))), Some("1.50".to_string()));
        assert_eq!(converter.get(Some("1.50")), Ok(Some(dec!(1.50))));
    }
}
