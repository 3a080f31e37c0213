use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pcl_types::{normalize_tag, Outcome, Prediction, Verdict};

use crate::error::LedgerError;

/// Resolution-state selector for [`Filter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutcomeFilter {
    /// Any resolution state.
    #[default]
    Any,
    /// Only unresolved predictions.
    Unresolved,
    /// Only resolved predictions, either verdict.
    Resolved,
    /// Only predictions resolved true.
    True,
    /// Only predictions resolved false.
    False,
}

impl OutcomeFilter {
    /// Does the given resolution state pass this selector?
    pub fn matches(self, outcome: &Outcome) -> bool {
        match self {
            Self::Any => true,
            Self::Unresolved => !outcome.is_resolved(),
            Self::Resolved => outcome.is_resolved(),
            Self::True => outcome.verdict() == Some(Verdict::True),
            Self::False => outcome.verdict() == Some(Verdict::False),
        }
    }
}

impl FromStr for OutcomeFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "unresolved" | "open" => Ok(Self::Unresolved),
            "resolved" | "solved" => Ok(Self::Resolved),
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            _ => Err(LedgerError::Validation {
                reason: format!(
                    "unknown outcome filter '{s}' (expected any, unresolved, resolved, true, or false)"
                ),
            }),
        }
    }
}

/// Record selection criteria for [`Ledger::list`](crate::Ledger::list).
///
/// The default filter matches every record. `tags` matches any (a record
/// passes if it carries at least one of the listed tags). Time bounds are
/// strict: `created_after` keeps records created strictly after the bound,
/// `created_before` strictly before, and `term_before` keeps records whose
/// term is set and strictly before the bound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub tags: BTreeSet<String>,
    pub outcome: OutcomeFilter,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub term_before: Option<DateTime<Utc>>,
}

impl Filter {
    /// A filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter that matches all resolved predictions, the usual input to
    /// the calibration engine.
    pub fn resolved() -> Self {
        Self {
            outcome: OutcomeFilter::Resolved,
            ..Self::default()
        }
    }

    /// Add a tag to match (normalized). Multiple tags match any.
    pub fn with_tag(mut self, tag: &str) -> Self {
        if let Some(tag) = normalize_tag(tag) {
            self.tags.insert(tag);
        }
        self
    }

    /// Restrict by resolution state.
    pub fn with_outcome(mut self, outcome: OutcomeFilter) -> Self {
        self.outcome = outcome;
        self
    }

    /// Keep records created strictly after the bound.
    pub fn created_after(mut self, bound: DateTime<Utc>) -> Self {
        self.created_after = Some(bound);
        self
    }

    /// Keep records created strictly before the bound.
    pub fn created_before(mut self, bound: DateTime<Utc>) -> Self {
        self.created_before = Some(bound);
        self
    }

    /// Keep records whose term is set and strictly before the bound.
    pub fn term_before(mut self, bound: DateTime<Utc>) -> Self {
        self.term_before = Some(bound);
        self
    }

    /// Does the record pass every criterion?
    pub fn matches(&self, prediction: &Prediction) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| prediction.tags.contains(tag)) {
            return false;
        }
        if !self.outcome.matches(&prediction.outcome) {
            return false;
        }
        if let Some(bound) = self.created_after {
            if prediction.created_at <= bound {
                return false;
            }
        }
        if let Some(bound) = self.created_before {
            if prediction.created_at >= bound {
                return false;
            }
        }
        if let Some(bound) = self.term_before {
            match prediction.term_at {
                Some(term_at) if term_at < bound => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pcl_types::{Confidence, PredictionId};

    use super::*;

    fn record(tags: &[&str], outcome: Outcome) -> Prediction {
        Prediction {
            id: PredictionId::new(),
            statement: "s".into(),
            confidence: Confidence::new(0.5).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            term_at: Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()),
            tags: pcl_types::normalize_tags(tags.iter().copied()),
            proof: String::new(),
            outcome,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(Filter::any().matches(&record(&[], Outcome::Unresolved)));
    }

    #[test]
    fn tags_match_any() {
        let filter = Filter::any().with_tag("weather").with_tag("tech");
        assert!(filter.matches(&record(&["WEATHER"], Outcome::Unresolved)));
        assert!(filter.matches(&record(&["TECH", "OTHER"], Outcome::Unresolved)));
        assert!(!filter.matches(&record(&["SPORTS"], Outcome::Unresolved)));
        assert!(!filter.matches(&record(&[], Outcome::Unresolved)));
    }

    #[test]
    fn tag_matching_is_normalized() {
        let filter = Filter::any().with_tag("  weather ");
        assert!(filter.matches(&record(&["weather"], Outcome::Unresolved)));
    }

    #[test]
    fn outcome_selector() {
        let resolved_true = Outcome::Resolved {
            verdict: Verdict::True,
            at: Utc.with_ymd_and_hms(2025, 9, 2, 0, 0, 0).unwrap(),
        };
        let resolved_false = Outcome::Resolved {
            verdict: Verdict::False,
            at: Utc.with_ymd_and_hms(2025, 9, 2, 0, 0, 0).unwrap(),
        };

        assert!(OutcomeFilter::Any.matches(&Outcome::Unresolved));
        assert!(OutcomeFilter::Unresolved.matches(&Outcome::Unresolved));
        assert!(!OutcomeFilter::Unresolved.matches(&resolved_true));
        assert!(OutcomeFilter::Resolved.matches(&resolved_false));
        assert!(OutcomeFilter::True.matches(&resolved_true));
        assert!(!OutcomeFilter::True.matches(&resolved_false));
        assert!(OutcomeFilter::False.matches(&resolved_false));
    }

    #[test]
    fn outcome_filter_parsing() {
        assert_eq!("any".parse::<OutcomeFilter>().unwrap(), OutcomeFilter::Any);
        assert_eq!(
            "Resolved".parse::<OutcomeFilter>().unwrap(),
            OutcomeFilter::Resolved
        );
        assert!("sideways".parse::<OutcomeFilter>().is_err());
    }

    #[test]
    fn time_bounds_are_strict() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let p = record(&[], Outcome::Unresolved);

        assert!(!Filter::any().created_after(created).matches(&p));
        assert!(!Filter::any().created_before(created).matches(&p));

        let earlier = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        assert!(Filter::any().created_after(earlier).matches(&p));
        assert!(Filter::any().created_before(later).matches(&p));
    }

    #[test]
    fn term_before_excludes_records_without_term() {
        let bound = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut no_term = record(&[], Outcome::Unresolved);
        no_term.term_at = None;

        assert!(Filter::any().term_before(bound).matches(&record(&[], Outcome::Unresolved)));
        assert!(!Filter::any().term_before(bound).matches(&no_term));
    }
}
