use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Binary realized outcome of a resolved prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The predicted event happened.
    True,
    /// The predicted event did not happen.
    False,
}

impl Verdict {
    /// The outcome as the binary value used in scoring: `True` → 1, `False` → 0.
    pub fn as_binary(self) -> f64 {
        match self {
            Self::True => 1.0,
            Self::False => 0.0,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
        }
    }
}

impl FromStr for Verdict {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(Self::True),
            "false" | "f" | "no" | "n" | "0" => Ok(Self::False),
            _ => Err(TypeError::UnparsableVerdict(s.to_string())),
        }
    }
}

/// Resolution state of a prediction.
///
/// The resolution timestamp lives inside the `Resolved` variant, so a
/// resolved record always carries its resolution time and an unresolved
/// record structurally cannot. The only legal transition is
/// `Unresolved` → `Resolved`, performed exactly once by the ledger;
/// `Resolved` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Not yet resolved.
    Unresolved,
    /// Resolved to a final verdict at a specific time.
    Resolved {
        verdict: Verdict,
        at: DateTime<Utc>,
    },
}

impl Outcome {
    /// Returns `true` if the prediction has been resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// The final verdict, if resolved.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Resolved { verdict, .. } => Some(*verdict),
            Self::Unresolved => None,
        }
    }

    /// The resolution time, if resolved.
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Resolved { at, .. } => Some(*at),
            Self::Unresolved => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::Resolved { verdict, .. } => write!(f, "{verdict}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn binary_mapping() {
        assert_eq!(Verdict::True.as_binary(), 1.0);
        assert_eq!(Verdict::False.as_binary(), 0.0);
    }

    #[test]
    fn verdict_parsing() {
        assert_eq!("true".parse::<Verdict>().unwrap(), Verdict::True);
        assert_eq!("Y".parse::<Verdict>().unwrap(), Verdict::True);
        assert_eq!("0".parse::<Verdict>().unwrap(), Verdict::False);
        assert!("maybe".parse::<Verdict>().is_err());
    }

    #[test]
    fn resolution_time_exists_iff_resolved() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let resolved = Outcome::Resolved {
            verdict: Verdict::False,
            at,
        };
        assert_eq!(resolved.resolved_at(), Some(at));
        assert_eq!(resolved.verdict(), Some(Verdict::False));
        assert_eq!(Outcome::Unresolved.resolved_at(), None);
        assert_eq!(Outcome::Unresolved.verdict(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let outcome = Outcome::Resolved {
            verdict: Verdict::True,
            at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, parsed);
    }
}
