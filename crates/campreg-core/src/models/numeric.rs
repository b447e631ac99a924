//! Tagged numeric value carried by the loosely-typed member fields.
//!
//! The store and the registration form both carry `age`, `camp_fee`,
//! `deposit_paid` and `balance` as text or as JSON numbers. `Numeric` is the
//! single place where that text is parsed and formatted.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Numeric {
    /// No value entered / null on the wire
    #[default]
    Empty,
    Number(f64),
    /// Text that is not a number, kept verbatim
    Invalid(String),
}

impl Numeric {
    /// Parse user or wire text. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Numeric::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Numeric::Number(n),
            _ => Numeric::Invalid(text.to_string()),
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric value, or 0 for empty and invalid values
    pub fn value_or_zero(&self) -> f64 {
        self.number().unwrap_or(0.0)
    }

    /// Integer view used for ages (truncates towards zero)
    pub fn whole(&self) -> Option<i64> {
        self.number().map(|n| n.trunc() as i64)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Numeric::Empty)
    }

    /// Render back to form text. Integral numbers drop the fractional part.
    pub fn format(&self) -> String {
        match self {
            Numeric::Empty => String::new(),
            Numeric::Number(n) => format_number(*n),
            Numeric::Invalid(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Numeric::Number(n)
    }
}

/// Shortest text for a float; `5000.0` becomes `"5000"`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Number(n) => serializer.serialize_f64(*n),
            Numeric::Empty | Numeric::Invalid(_) => serializer.serialize_none(),
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
        Ok(Numeric::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
        Ok(Numeric::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
        Ok(Numeric::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
        Ok(Numeric::parse(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Empty)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Numeric, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Numeric::parse(""), Numeric::Empty);
        assert_eq!(Numeric::parse("   "), Numeric::Empty);
        assert_eq!(Numeric::parse("12.5"), Numeric::Number(12.5));
        assert_eq!(Numeric::parse(" 5000 "), Numeric::Number(5000.0));
        assert_eq!(Numeric::parse("abc"), Numeric::Invalid("abc".to_string()));
        assert_eq!(Numeric::parse("NaN"), Numeric::Invalid("NaN".to_string()));
    }

    #[test]
    fn test_value_or_zero() {
        assert_eq!(Numeric::Empty.value_or_zero(), 0.0);
        assert_eq!(Numeric::Invalid("x".into()).value_or_zero(), 0.0);
        assert_eq!(Numeric::Number(-3.5).value_or_zero(), -3.5);
    }

    #[test]
    fn test_whole_truncates() {
        assert_eq!(Numeric::parse("20.9").whole(), Some(20));
        assert_eq!(Numeric::Empty.whole(), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(Numeric::Number(5000.0).format(), "5000");
        assert_eq!(Numeric::Number(3500.5).format(), "3500.5");
        assert_eq!(Numeric::Number(-200.0).format(), "-200");
        assert_eq!(Numeric::Empty.format(), "");
        assert_eq!(Numeric::Invalid("12a".into()).format(), "12a");
    }

    #[test]
    fn test_deserialize_lenient() {
        let values: Vec<Numeric> =
            serde_json::from_str(r#"[5000, "2000", "", null, 12.5, "n/a"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Numeric::Number(5000.0),
                Numeric::Number(2000.0),
                Numeric::Empty,
                Numeric::Empty,
                Numeric::Number(12.5),
                Numeric::Invalid("n/a".to_string()),
            ]
        );
    }

    #[test]
    fn test_serialize_as_number_or_null() {
        let json = serde_json::to_string(&vec![
            Numeric::Number(3000.0),
            Numeric::Empty,
            Numeric::Invalid("x".into()),
        ])
        .unwrap();
        assert_eq!(json, "[3000.0,null,null]");
    }
}
