use pcl_types::PredictionId;

/// Errors produced by the calibration engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("prediction {id} is unresolved and cannot be scored")]
    UnresolvedInput { id: PredictionId },
}
