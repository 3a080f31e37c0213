use serde::Serialize;

/// Result of one scoring pass.
///
/// `brier` is `None` when nothing was scored: the mean of an empty set is
/// undefined, and reporting it as such keeps an empty ledger from looking
/// perfectly calibrated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalibrationReport {
    /// Number of predictions scored.
    pub count: usize,
    /// How many of them resolved true.
    pub resolved_true: usize,
    /// How many of them resolved false.
    pub resolved_false: usize,
    /// Mean squared error between stated confidence and realized outcome.
    pub brier: Option<f64>,
    /// Fixed-width confidence buckets for calibration-curve analysis.
    pub buckets: Vec<ReliabilityBucket>,
}

impl CalibrationReport {
    /// Returns `true` if nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// One confidence interval of the reliability breakdown.
///
/// Comparing `mean_confidence` against `observed_frequency` per bucket
/// shows where stated confidence runs hot or cold. Both are `None` for a
/// bucket no prediction fell into.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReliabilityBucket {
    /// Inclusive lower bound of the bucket.
    pub lower: f64,
    /// Upper bound; exclusive except for the last bucket, which includes 1.0.
    pub upper: f64,
    /// Number of predictions whose confidence fell in this bucket.
    pub count: usize,
    /// Mean stated confidence of those predictions.
    pub mean_confidence: Option<f64>,
    /// Fraction of those predictions that resolved true.
    pub observed_frequency: Option<f64>,
}
