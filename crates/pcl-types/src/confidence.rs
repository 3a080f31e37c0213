use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A stated probability, validated to lie within the closed interval [0, 1].
///
/// Construction is the only validation point: once a `Confidence` exists it
/// is immutable and never revalidated.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Validate and wrap a raw probability.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeError::ConfidenceOutOfRange { value })
        }
    }

    /// The raw probability.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The probability as a whole percentage, for display.
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.as_percent())
    }
}

/// Accepts the grammar of the interactive prompt: a bare probability
/// (`0.7`), a percentage (`70%`), a fraction (`7/10`), or odds-style
/// phrasing (`1 in 3`).
impl FromStr for Confidence {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let unparsable = || TypeError::UnparsableConfidence(s.to_string());

        if let Some(percent) = raw.strip_suffix('%') {
            let value: f64 = percent.trim().parse().map_err(|_| unparsable())?;
            return Self::new(value / 100.0);
        }

        let fraction = raw.replace(" in ", "/");
        if let Some((numerator, denominator)) = fraction.split_once('/') {
            let n: f64 = numerator.trim().parse().map_err(|_| unparsable())?;
            let d: f64 = denominator.trim().parse().map_err(|_| unparsable())?;
            if d == 0.0 {
                return Err(unparsable());
            }
            return Self::new(n / d);
        }

        let value: f64 = raw.parse().map_err(|_| unparsable())?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert_eq!(Confidence::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Confidence::new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
    }

    #[test]
    fn parses_bare_probability() {
        assert_eq!("0.7".parse::<Confidence>().unwrap().value(), 0.7);
    }

    #[test]
    fn parses_percentage() {
        assert_eq!("70%".parse::<Confidence>().unwrap().value(), 0.7);
        assert_eq!(" 5 %".parse::<Confidence>().unwrap().value(), 0.05);
    }

    #[test]
    fn parses_fraction_and_odds() {
        assert_eq!("7/10".parse::<Confidence>().unwrap().value(), 0.7);
        assert_eq!("1 in 4".parse::<Confidence>().unwrap().value(), 0.25);
    }

    #[test]
    fn rejects_zero_denominator() {
        assert!("1/0".parse::<Confidence>().is_err());
    }

    #[test]
    fn rejects_out_of_range_input() {
        assert!("150%".parse::<Confidence>().is_err());
        assert!("3/2".parse::<Confidence>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let c = Confidence::new(0.25).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "0.25");
    }

    proptest! {
        #[test]
        fn any_in_range_value_is_accepted(value in 0.0f64..=1.0) {
            let c = Confidence::new(value).unwrap();
            prop_assert_eq!(c.value(), value);
        }

        #[test]
        fn display_parse_stays_in_range(value in 0.0f64..=1.0) {
            let c = Confidence::new(value).unwrap();
            let reparsed: Confidence = c.to_string().parse().unwrap();
            prop_assert!((0.0..=1.0).contains(&reparsed.value()));
        }
    }
}
