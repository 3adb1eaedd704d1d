use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

impl Coordinates {
    /// Returns `None` unless both components are finite numbers.
    #[must_use]
    pub fn new(lat: f64, long: f64) -> Option<Self> {
        (lat.is_finite() && long.is_finite()).then_some(Self { lat, long })
    }

    /// Builds coordinates from two loosely-typed provider values.
    #[must_use]
    pub fn from_values(lat: &serde_json::Value, long: &serde_json::Value) -> Option<Self> {
        Self::new(parse_coordinate(lat)?, parse_coordinate(long)?)
    }
}

/// Parses a provider coordinate that may arrive as a JSON number or as a
/// numeric string. Anything else (including `NaN`/`inf` strings) is `None`.
#[must_use]
pub fn parse_coordinate(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_coordinate(&json!(41.88)), Some(41.88));
        assert_eq!(parse_coordinate(&json!(" -87.63 ")), Some(-87.63));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(parse_coordinate(&json!("north")), None);
        assert_eq!(parse_coordinate(&json!("NaN")), None);
        assert_eq!(parse_coordinate(&json!(null)), None);
        assert_eq!(parse_coordinate(&json!({"lat": 1})), None);
    }

    #[test]
    fn new_rejects_non_finite_components() {
        assert!(Coordinates::new(f64::NAN, 1.0).is_none());
        assert!(Coordinates::new(1.0, f64::INFINITY).is_none());
        assert_eq!(
            Coordinates::new(1.5, 2.5),
            Some(Coordinates { lat: 1.5, long: 2.5 })
        );
    }

    #[test]
    fn from_values_requires_both_components() {
        assert!(Coordinates::from_values(&json!("41.9"), &json!(null)).is_none());
        assert_eq!(
            Coordinates::from_values(&json!("41.9"), &json!(-87.6)),
            Some(Coordinates {
                lat: 41.9,
                long: -87.6
            })
        );
    }
}
