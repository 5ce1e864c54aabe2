//! pH safety classification used for marker colouring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Safety band of a pH reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyCategory {
    Safe,
    Elevated,
    Unsafe,
    Unknown,
}

impl SafetyCategory {
    /// Marker colour name understood by the map renderer.
    pub fn color(&self) -> &'static str {
        match self {
            SafetyCategory::Safe => "green",
            SafetyCategory::Elevated => "orange",
            SafetyCategory::Unsafe => "red",
            SafetyCategory::Unknown => "gray",
        }
    }
}

impl fmt::Display for SafetyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SafetyCategory::Safe => "SAFE",
            SafetyCategory::Elevated => "ELEVATED",
            SafetyCategory::Unsafe => "UNSAFE",
            SafetyCategory::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Classify a pH reading.
///
/// Both ends of the safe band are closed: 6.5 and 8.5 are `Safe`.
pub fn classify(ph: Option<f64>) -> SafetyCategory {
    let Some(ph) = ph.filter(|v| v.is_finite()) else {
        return SafetyCategory::Unknown;
    };
    if (6.5..=8.5).contains(&ph) {
        SafetyCategory::Safe
    } else if (5.5..6.5).contains(&ph) || (ph > 8.5 && ph <= 9.5) {
        SafetyCategory::Elevated
    } else {
        SafetyCategory::Unsafe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_of_safe_band_are_safe() {
        assert_eq!(classify(Some(6.5)), SafetyCategory::Safe);
        assert_eq!(classify(Some(8.5)), SafetyCategory::Safe);
        assert_eq!(classify(Some(7.2)), SafetyCategory::Safe);
    }

    #[test]
    fn elevated_bands() {
        assert_eq!(classify(Some(6.4999)), SafetyCategory::Elevated);
        assert_eq!(classify(Some(5.5)), SafetyCategory::Elevated);
        assert_eq!(classify(Some(8.5001)), SafetyCategory::Elevated);
        assert_eq!(classify(Some(9.5)), SafetyCategory::Elevated);
    }

    #[test]
    fn unsafe_outside_elevated_bands() {
        assert_eq!(classify(Some(5.4999)), SafetyCategory::Unsafe);
        assert_eq!(classify(Some(9.6)), SafetyCategory::Unsafe);
        assert_eq!(classify(Some(0.0)), SafetyCategory::Unsafe);
        assert_eq!(classify(Some(14.0)), SafetyCategory::Unsafe);
    }

    #[test]
    fn absent_reading_is_unknown() {
        assert_eq!(classify(None), SafetyCategory::Unknown);
        assert_eq!(classify(Some(f64::NAN)), SafetyCategory::Unknown);
    }

    #[test]
    fn colors() {
        assert_eq!(SafetyCategory::Safe.color(), "green");
        assert_eq!(SafetyCategory::Elevated.color(), "orange");
        assert_eq!(SafetyCategory::Unsafe.color(), "red");
        assert_eq!(SafetyCategory::Unknown.color(), "gray");
    }
}
