//! Loose scalar values and the coercion/defaulting boundary
//!
//! Fields in the cloud datastore are not reliably typed: the same numeric
//! field can hold `1.75`, `"1.75"`, or nothing at all depending on which
//! surface last wrote the record. Every record field that feeds the encoder
//! is therefore held as an optional [`Scalar`] and rendered through the
//! coercion helpers here, which substitute a documented default whenever the
//! stored value is absent, empty, or not a finite number.

use serde::{Deserialize, Serialize};

/// A loosely typed scalar as stored by the datastore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// String value, possibly a stringified number
    Text(String),
}

impl Scalar {
    /// Render this scalar as a numeric output string, if it holds one
    ///
    /// Stringified numbers are passed through verbatim (so `"2.0"` stays
    /// `"2.0"`), native numbers use their shortest decimal rendering, and
    /// anything non-numeric or non-finite yields `None`.
    pub fn as_numeric_string(&self) -> Option<String> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.to_string()),
            Self::Number(_) | Self::Bool(_) => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|_| trimmed.to_string())
            }
        }
    }

}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Coerce an optional numeric field to its output string, falling back to
/// the documented default when the value is absent, empty, or not a finite
/// number
pub fn numeric_or(value: Option<&Scalar>, default: &str) -> String {
    value
        .and_then(Scalar::as_numeric_string)
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(Scalar::Number(1.75)), "1.0", "1.75")]
    #[case(Some(Scalar::Number(60.0)), "0", "60")]
    #[case(Some(Scalar::Text("2.0".to_string())), "1.75", "2.0")]
    #[case(Some(Scalar::Text("  0.5 ".to_string())), "0", "0.5")]
    #[case(Some(Scalar::Text(String::new())), "1.75", "1.75")]
    #[case(Some(Scalar::Text("abc".to_string())), "1.75", "1.75")]
    #[case(Some(Scalar::Number(f64::NAN)), "1.24", "1.24")]
    #[case(Some(Scalar::Number(f64::INFINITY)), "1.24", "1.24")]
    #[case(Some(Scalar::Bool(true)), "0", "0")]
    #[case(None, "190", "190")]
    fn test_numeric_coercion(
        #[case] value: Option<Scalar>,
        #[case] default: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(numeric_or(value.as_ref(), default), expected);
    }

    #[test]
    fn test_zero_is_preserved() {
        // Zero is a configured value, not an absence
        assert_eq!(numeric_or(Some(&Scalar::Number(0.0)), "1"), "0");
        assert_eq!(numeric_or(Some(&Scalar::from("0")), "1"), "0");
    }

    #[test]
    fn test_untagged_deserialization() {
        let number: Scalar = serde_json::from_str("1.75").unwrap();
        assert_eq!(number, Scalar::Number(1.75));

        let text: Scalar = serde_json::from_str("\"1.75\"").unwrap();
        assert_eq!(text, Scalar::Text("1.75".to_string()));

        let flag: Scalar = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Scalar::Bool(true));
    }
}
