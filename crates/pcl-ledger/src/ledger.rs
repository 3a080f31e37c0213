use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pcl_types::{normalize_tags, Outcome, Prediction, PredictionDraft, PredictionId, Verdict};

use crate::edit::FieldEdit;
use crate::error::LedgerError;
use crate::filter::Filter;

/// Policy for resolving a prediction before its term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermPolicy {
    /// Resolving before the term fails unless the caller overrides.
    #[default]
    Enforce,
    /// Resolving before the term is always allowed.
    Permissive,
}

/// The prediction collection and its invariants.
///
/// Records are kept in insertion order. The ledger is the only writer:
/// accessors hand out shared references or clones, and every mutation goes
/// through a method that checks the lifecycle rules first. A permitted
/// mutation rebuilds the record as a whole value rather than poking at
/// individual fields.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<Prediction>,
    policy: TermPolicy,
}

impl Ledger {
    /// An empty ledger with the default term policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger with an explicit term policy.
    pub fn with_policy(policy: TermPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Rebuild a ledger from previously persisted records.
    pub fn from_records(records: Vec<Prediction>, policy: TermPolicy) -> Self {
        Self { records, policy }
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Prediction] {
        &self.records
    }

    /// Consume the ledger, yielding the records for persistence.
    pub fn into_records(self) -> Vec<Prediction> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured term policy.
    pub fn policy(&self) -> TermPolicy {
        self.policy
    }

    /// Create a record from a draft. The ledger assigns a fresh id and
    /// `created_at = now`. Fails `Validation` on an empty statement or a
    /// term that is not in the future.
    pub fn add(
        &mut self,
        draft: PredictionDraft,
        now: DateTime<Utc>,
    ) -> Result<&Prediction, LedgerError> {
        let statement = draft.statement.trim().to_string();
        if statement.is_empty() {
            return Err(LedgerError::Validation {
                reason: "statement must not be empty".into(),
            });
        }
        if let Some(term_at) = draft.term_at {
            if term_at <= now {
                return Err(LedgerError::Validation {
                    reason: format!("term {term_at} is not after creation time {now}"),
                });
            }
        }

        let prediction = Prediction {
            id: PredictionId::new(),
            statement,
            confidence: draft.confidence,
            created_at: now,
            term_at: draft.term_at,
            tags: normalize_tags(draft.tags),
            proof: draft.proof,
            outcome: Outcome::Unresolved,
        };
        debug!(id = %prediction.id, confidence = prediction.confidence.value(), "prediction added");
        self.records.push(prediction);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Look up a record by id.
    pub fn get(&self, id: &PredictionId) -> Result<&Prediction, LedgerError> {
        self.records
            .iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Resolve a full id or an unambiguous id prefix to a record id.
    pub fn resolve_id(&self, text: &str) -> Result<PredictionId, LedgerError> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(LedgerError::NotFound(text.to_string()));
        }

        let mut candidates = self
            .records
            .iter()
            .filter(|p| p.id.to_string().starts_with(&needle));
        match (candidates.next(), candidates.next()) {
            (Some(p), None) => Ok(p.id),
            (Some(_), Some(_)) => Err(LedgerError::AmbiguousId(text.to_string())),
            (None, _) => Err(LedgerError::NotFound(text.to_string())),
        }
    }

    /// Lazily iterate the records that pass `filter`, in insertion order.
    /// Calling again restarts the sequence.
    pub fn list<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Prediction> + 'a {
        self.records.iter().filter(move |p| filter.matches(p))
    }

    /// Apply permitted mutations (`tags` and/or `proof`) to a record. The
    /// record is rebuilt as a value; no other field can change.
    pub fn edit(
        &mut self,
        id: &PredictionId,
        edits: &[FieldEdit],
    ) -> Result<&Prediction, LedgerError> {
        let index = self.index_of(id)?;
        let mut updated = self.records[index].clone();
        for edit in edits {
            match edit {
                FieldEdit::Tags(tags) => updated.tags = tags.clone(),
                FieldEdit::Proof(proof) => updated.proof = proof.clone(),
            }
        }
        debug!(id = %id, edits = edits.len(), "prediction edited");
        self.records[index] = updated;
        Ok(&self.records[index])
    }

    /// Resolve a prediction to its final verdict, honoring the term policy.
    ///
    /// This is the only write path for the resolution state: the verdict
    /// and the resolution time are set together, and a resolved record can
    /// never be resolved again.
    pub fn solve(
        &mut self,
        id: &PredictionId,
        verdict: Verdict,
        now: DateTime<Utc>,
    ) -> Result<&Prediction, LedgerError> {
        self.solve_inner(id, verdict, now, false)
    }

    /// Resolve a prediction before its term, overriding an `Enforce`
    /// policy for this one call.
    pub fn solve_overriding_term(
        &mut self,
        id: &PredictionId,
        verdict: Verdict,
        now: DateTime<Utc>,
    ) -> Result<&Prediction, LedgerError> {
        self.solve_inner(id, verdict, now, true)
    }

    fn solve_inner(
        &mut self,
        id: &PredictionId,
        verdict: Verdict,
        now: DateTime<Utc>,
        override_term: bool,
    ) -> Result<&Prediction, LedgerError> {
        let index = self.index_of(id)?;
        let record = &self.records[index];

        if record.outcome.is_resolved() {
            return Err(LedgerError::AlreadyResolved { id: *id });
        }
        if now < record.created_at {
            return Err(LedgerError::Validation {
                reason: format!(
                    "resolution time {now} precedes creation time {}",
                    record.created_at
                ),
            });
        }
        if let Some(term_at) = record.term_at {
            if now < term_at && self.policy == TermPolicy::Enforce && !override_term {
                return Err(LedgerError::PrematureResolution { id: *id, term_at });
            }
        }

        let mut updated = self.records[index].clone();
        updated.outcome = Outcome::Resolved { verdict, at: now };
        debug!(id = %id, verdict = %verdict, "prediction resolved");
        self.records[index] = updated;
        Ok(&self.records[index])
    }

    /// Remove a record unconditionally. Its id is never reissued.
    pub fn delete(&mut self, id: &PredictionId) -> Result<Prediction, LedgerError> {
        let index = self.index_of(id)?;
        let removed = self.records.remove(index);
        debug!(id = %removed.id, "prediction deleted");
        Ok(removed)
    }

    fn index_of(&self, id: &PredictionId) -> Result<usize, LedgerError> {
        self.records
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }
}
