use pcl_types::{Outcome, Prediction, Verdict};

use crate::error::ScoreError;
use crate::report::{CalibrationReport, ReliabilityBucket};

/// Number of equal-width confidence buckets in the reliability breakdown.
pub const BUCKET_COUNT: usize = 10;

/// Score a set of resolved predictions.
///
/// Fails with [`ScoreError::UnresolvedInput`] on the first unresolved
/// record; filtering to resolved-only is the caller's responsibility. The
/// result is a pure function of the input set: the mean and the bucket
/// contents do not depend on iteration order.
pub fn score<'a, I>(predictions: I) -> Result<CalibrationReport, ScoreError>
where
    I: IntoIterator<Item = &'a Prediction>,
{
    let mut count = 0usize;
    let mut resolved_true = 0usize;
    let mut squared_error_sum = 0.0f64;
    let mut buckets = BucketAccumulator::new();

    for prediction in predictions {
        let verdict = match prediction.outcome {
            Outcome::Resolved { verdict, .. } => verdict,
            Outcome::Unresolved => {
                return Err(ScoreError::UnresolvedInput { id: prediction.id });
            }
        };

        let confidence = prediction.confidence.value();
        let y = verdict.as_binary();
        squared_error_sum += (confidence - y).powi(2);
        if verdict == Verdict::True {
            resolved_true += 1;
        }
        buckets.observe(confidence, y);
        count += 1;
    }

    let brier = if count == 0 {
        None
    } else {
        Some(squared_error_sum / count as f64)
    };

    Ok(CalibrationReport {
        count,
        resolved_true,
        resolved_false: count - resolved_true,
        brier,
        buckets: buckets.finish(),
    })
}

/// Running sums per confidence bucket: `[0, 0.1), [0.1, 0.2), ...,
/// [0.9, 1.0]`. Confidence 1.0 lands in the last bucket.
struct BucketAccumulator {
    counts: [usize; BUCKET_COUNT],
    confidence_sums: [f64; BUCKET_COUNT],
    outcome_sums: [f64; BUCKET_COUNT],
}

impl BucketAccumulator {
    fn new() -> Self {
        Self {
            counts: [0; BUCKET_COUNT],
            confidence_sums: [0.0; BUCKET_COUNT],
            outcome_sums: [0.0; BUCKET_COUNT],
        }
    }

    fn observe(&mut self, confidence: f64, y: f64) {
        let index = ((confidence * BUCKET_COUNT as f64) as usize).min(BUCKET_COUNT - 1);
        self.counts[index] += 1;
        self.confidence_sums[index] += confidence;
        self.outcome_sums[index] += y;
    }

    fn finish(self) -> Vec<ReliabilityBucket> {
        (0..BUCKET_COUNT)
            .map(|index| {
                let width = 1.0 / BUCKET_COUNT as f64;
                let count = self.counts[index];
                let mean = |sum: f64| (count > 0).then(|| sum / count as f64);
                ReliabilityBucket {
                    lower: index as f64 * width,
                    upper: (index + 1) as f64 * width,
                    count,
                    mean_confidence: mean(self.confidence_sums[index]),
                    observed_frequency: mean(self.outcome_sums[index]),
                }
            })
            .collect()
    }
}
