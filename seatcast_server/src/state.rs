use seatcast::errors::ModelError;
use seatcast::{ElectionRecord, ModelKind, TrainedModel};

/// The service's entire read-only state: the cleaned table and the model
/// fitted over it. Built once before the listener starts and shared behind
/// an `Arc`; nothing mutates it afterwards, so handlers need no locking.
pub struct AppState {
    pub records: Vec<ElectionRecord>,
    pub model: TrainedModel,
}

impl AppState {
    pub fn build(records: Vec<ElectionRecord>, kind: ModelKind) -> Result<Self, ModelError> {
        let model = TrainedModel::train(&records, kind)?;
        Ok(AppState { records, model })
    }
}
