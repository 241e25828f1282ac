//! Confidence value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A detection confidence between 0.0 and 1.0 inclusive.
///
/// Every constructor clamps; a `Confidence` outside the unit interval
/// cannot exist. NaN collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// No support at all.
    pub const ZERO: Self = Self(0.0);

    /// Full support.
    pub const CERTAIN: Self = Self(1.0);

    /// Creates a new Confidence, clamping to the valid range.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Confidence, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "confidence",
                format!("{} is outside [0, 1]", value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns a new confidence shifted by `delta`, clamped.
    pub fn adjusted(&self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Returns true if this confidence is strictly below `threshold`.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }

    /// Returns true if this is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_new_accepts_valid_values() {
        assert_eq!(Confidence::new(0.0).value(), 0.0);
        assert_eq!(Confidence::new(0.5).value(), 0.5);
        assert_eq!(Confidence::new(1.0).value(), 1.0);
    }

    #[test]
    fn confidence_new_clamps_to_unit_interval() {
        assert_eq!(Confidence::new(1.7).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
    }

    #[test]
    fn confidence_new_maps_nan_to_zero() {
        assert_eq!(Confidence::new(f64::NAN), Confidence::ZERO);
    }

    #[test]
    fn confidence_try_new_rejects_out_of_range() {
        assert!(Confidence::try_new(0.3).is_ok());
        assert!(matches!(
            Confidence::try_new(1.01),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn adjusted_clamps_both_ends() {
        assert_eq!(Confidence::new(0.9).adjusted(0.2), Confidence::CERTAIN);
        assert_eq!(Confidence::new(0.05).adjusted(-0.1), Confidence::ZERO);
    }

    #[test]
    fn is_below_is_strict() {
        let c = Confidence::new(0.5);
        assert!(!c.is_below(0.5));
        assert!(c.is_below(0.51));
    }

    #[test]
    fn confidence_displays_two_decimals() {
        assert_eq!(format!("{}", Confidence::new(0.8)), "0.80");
    }

    #[test]
    fn confidence_deserialization_clamps() {
        let c: Confidence = serde_json::from_str("3.5").unwrap();
        assert_eq!(c, Confidence::CERTAIN);
    }

    #[test]
    fn confidence_default_is_zero() {
        assert!(Confidence::default().is_zero());
    }
}
