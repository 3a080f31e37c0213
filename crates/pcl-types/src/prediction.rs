use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::id::PredictionId;
use crate::outcome::Outcome;

/// A single prediction record.
///
/// `id`, `statement`, `confidence`, `created_at`, and `term_at` are fixed at
/// creation. `tags` and `proof` may change at any time. `outcome` moves from
/// unresolved to resolved exactly once. The ledger is the only writer for
/// all of these; values obtained from it are snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique, never-reused identifier.
    pub id: PredictionId,
    /// The claim being predicted. Non-empty.
    pub statement: String,
    /// Stated probability that the claim comes true.
    pub confidence: Confidence,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Optional earliest resolution time.
    pub term_at: Option<DateTime<Utc>>,
    /// Normalized labels for grouping and filtering.
    pub tags: BTreeSet<String>,
    /// Free-text evidence or link. May be empty.
    pub proof: String,
    /// Resolution state.
    pub outcome: Outcome,
}

impl Prediction {
    /// Lifecycle phase of this record relative to `now`.
    pub fn status(&self, now: DateTime<Utc>) -> Status {
        if self.outcome.is_resolved() {
            return Status::Resolved;
        }
        match self.term_at {
            Some(term_at) if term_at > now => Status::Future,
            _ => Status::Pending,
        }
    }

    /// Days until the term, negative if the term has passed. `None` when no
    /// term is set.
    pub fn days_to_term(&self, now: DateTime<Utc>) -> Option<i64> {
        self.term_at
            .map(|term_at| term_at.signed_duration_since(now).num_days())
    }
}

/// Derived lifecycle phase of a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Unresolved, term still ahead.
    Future,
    /// Unresolved and resolvable now (term reached, or no term).
    Pending,
    /// Terminal: a verdict has been recorded.
    Resolved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future => write!(f, "future"),
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Caller-supplied payload for creating a prediction. The ledger assigns
/// the id and creation time.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionDraft {
    pub statement: String,
    pub confidence: Confidence,
    pub term_at: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
    pub proof: String,
}

impl PredictionDraft {
    /// A minimal draft with no term, tags, or proof.
    pub fn new(statement: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            statement: statement.into(),
            confidence,
            term_at: None,
            tags: BTreeSet::new(),
            proof: String::new(),
        }
    }

    /// Set the earliest resolution time.
    pub fn with_term(mut self, term_at: DateTime<Utc>) -> Self {
        self.term_at = Some(term_at);
        self
    }

    /// Add one tag (normalized).
    pub fn with_tag(mut self, tag: &str) -> Self {
        if let Some(tag) = normalize_tag(tag) {
            self.tags.insert(tag);
        }
        self
    }

    /// Set the proof text.
    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = proof.into();
        self
    }
}

/// Canonical tag form: trimmed and uppercased. Empty input yields `None`.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_uppercase())
    }
}

/// Normalize a collection of raw tags, dropping empties and duplicates.
pub fn normalize_tags<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|tag| normalize_tag(tag.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::outcome::Verdict;

    use super::*;

    fn record(term_at: Option<DateTime<Utc>>) -> Prediction {
        Prediction {
            id: PredictionId::new(),
            statement: "it will rain tomorrow".into(),
            confidence: Confidence::new(0.7).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            term_at,
            tags: BTreeSet::new(),
            proof: String::new(),
            outcome: Outcome::Unresolved,
        }
    }

    #[test]
    fn status_follows_term_and_resolution() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();

        assert_eq!(record(Some(later)).status(now), Status::Future);
        assert_eq!(record(None).status(now), Status::Pending);

        let past = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(record(Some(past)).status(now), Status::Pending);

        let mut resolved = record(Some(later));
        resolved.outcome = Outcome::Resolved {
            verdict: Verdict::True,
            at: now,
        };
        assert_eq!(resolved.status(now), Status::Resolved);
    }

    #[test]
    fn days_to_term() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let term = Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap();
        assert_eq!(record(Some(term)).days_to_term(now), Some(10));
        assert_eq!(record(None).days_to_term(now), None);
    }

    #[test]
    fn tags_are_normalized() {
        let tags = normalize_tags(["  weather ", "Weather", "", "tech"]);
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["TECH".to_string(), "WEATHER".to_string()]
        );
    }

    #[test]
    fn draft_builder() {
        let term = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let draft = PredictionDraft::new("statement", Confidence::new(0.5).unwrap())
            .with_term(term)
            .with_tag("sports")
            .with_proof("https://example.org");
        assert_eq!(draft.term_at, Some(term));
        assert!(draft.tags.contains("SPORTS"));
        assert_eq!(draft.proof, "https://example.org");
    }

    #[test]
    fn serde_roundtrip() {
        let mut p = record(None);
        p.tags = normalize_tags(["a", "b"]);
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(p, parsed);
    }
}
