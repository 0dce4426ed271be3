//! JSON endpoints.
//!
//! Each axum handler is a thin shell over a pure envelope builder, so the
//! response shapes (field names included, for caller compatibility) are
//! testable without binding a socket.

use axum::extract::{Path, State};
use axum::Json;
use seatcast::request::PredictRequest;
use seatcast::stats::{self, WinRateMethod};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ServerError;
use crate::state::AppState;

pub async fn api_parties(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(parties_envelope(&state))
}

pub async fn api_party(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ServerError> {
    party_envelope(&state, &name).map(Json)
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Value>, ServerError> {
    predict_envelope(&state, &request).map(Json)
}

pub async fn api_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(stats_envelope(&state))
}

/// All parties except `Independent`, strongest current standing first.
pub fn parties_envelope(state: &AppState) -> Value {
    let mut parties: Vec<_> = stats::list_parties(&state.records)
        .into_iter()
        .filter(|name| name != "Independent")
        .filter_map(|name| {
            stats::party_info(&state.records, &name, WinRateMethod::RecencyWeighted)
        })
        .collect();
    parties.sort_by(|a, b| b.current_mla_strength.cmp(&a.current_mla_strength));

    json!({ "success": true, "parties": parties })
}

pub fn party_envelope(state: &AppState, name: &str) -> Result<Value, ServerError> {
    match stats::party_info(&state.records, name, WinRateMethod::RecencyWeighted) {
        Some(info) => Ok(json!({ "success": true, "party": info })),
        None => Err(ServerError::NotFound(format!("Party \"{}\" not found", name))),
    }
}

/// Validates, predicts for the coming cycle and attaches the party's info
/// block. Validation failures never reach the model.
pub fn predict_envelope(
    state: &AppState,
    request: &PredictRequest,
) -> Result<Value, ServerError> {
    let validated = request.validate().map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let prediction = state
        .model
        .predict(&validated.party_name, &validated.standing)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    let party_info =
        stats::party_info(&state.records, &validated.party_name, WinRateMethod::RecencyWeighted);

    Ok(json!({
        "success": true,
        "prediction": prediction.outcome,
        "win_probability": prediction.win_probability,
        "party_name": validated.party_name,
        "party": validated.party_name,
        "party_info": party_info,
    }))
}

pub fn stats_envelope(state: &AppState) -> Value {
    let stats = stats::dataset_stats(&state.records);
    json!({
        "success": true,
        "total_records": stats.total_records,
        "unique_parties": stats.unique_parties,
        "years": stats.years,
        "party_wins": stats.party_wins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatcast::{CandidateType, ElectionRecord, ModelKind};
    use serde_json::json;

    fn record(year: i32, party: &str, mla: u32, alliance: u32, winner: bool) -> ElectionRecord {
        ElectionRecord {
            year,
            party: party.to_string(),
            mla_strength: mla,
            alliance_mla_strength: alliance,
            past_rs_wins: if winner { 5 } else { 1 },
            candidate_type: CandidateType::Incumbent,
            winner,
        }
    }

    fn test_state() -> AppState {
        let mut records = Vec::new();
        for year in (2008..2025).step_by(2) {
            records.push(record(year, "BJP", 120, 200, true));
            records.push(record(year, "INC", 45, 95, false));
            records.push(record(year, "Independent", 5, 5, false));
        }
        AppState::build(records, ModelKind::Forest).expect("training must succeed")
    }

    #[test]
    fn test_predict_envelope_success_shape() {
        let state = test_state();
        let request: PredictRequest = serde_json::from_value(json!({
            "party_name": "BJP",
            "mla_strength": 132,
            "alliance_mla_strength": 203,
            "past_rs_wins": 5,
            "candidate_type": "incumbent"
        }))
        .unwrap();

        let envelope = predict_envelope(&state, &request).unwrap();
        assert_eq!(envelope["success"], json!(true));
        let prediction = envelope["prediction"].as_u64().unwrap();
        assert!(prediction == 0 || prediction == 1);
        let probability = envelope["win_probability"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&probability));
        assert_eq!(envelope["party_name"], json!("BJP"));
        assert_eq!(envelope["party"], json!("BJP"));
        assert!(envelope["party_info"].is_object());
    }

    #[test]
    fn test_predict_envelope_missing_field_names_it() {
        let state = test_state();
        let request: PredictRequest = serde_json::from_value(json!({
            "mla_strength": 132,
            "alliance_mla_strength": 203,
            "past_rs_wins": 5,
            "candidate_type": "incumbent"
        }))
        .unwrap();

        let err = predict_envelope(&state, &request).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
        assert!(err.to_string().contains("party_name"), "got: {}", err);
    }

    #[test]
    fn test_predict_envelope_unknown_party_has_null_info() {
        let state = test_state();
        let request: PredictRequest = serde_json::from_value(json!({
            "party_name": "AAP",
            "mla_strength": 10,
            "alliance_mla_strength": 20,
            "past_rs_wins": 0,
            "candidate_type": "new"
        }))
        .unwrap();

        let envelope = predict_envelope(&state, &request).unwrap();
        assert_eq!(envelope["success"], json!(true));
        assert!(envelope["party_info"].is_null());
    }

    #[test]
    fn test_parties_envelope_skips_independent_and_sorts() {
        let state = test_state();
        let envelope = parties_envelope(&state);
        let parties = envelope["parties"].as_array().unwrap();
        assert_eq!(parties.len(), 2);
        assert_eq!(parties[0]["party_name"], json!("BJP"), "strongest first");
        assert!(parties.iter().all(|p| p["party_name"] != json!("Independent")));
    }

    #[test]
    fn test_party_envelope_not_found() {
        let state = test_state();
        let err = party_envelope(&state, "AAP").unwrap_err();
        assert!(matches!(err, ServerError::NotFound(_)));
        assert_eq!(err.to_string(), "Party \"AAP\" not found");
    }

    #[test]
    fn test_stats_envelope_fields() {
        let state = test_state();
        let envelope = stats_envelope(&state);
        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["total_records"].as_u64().unwrap(), 27);
        assert!(envelope["unique_parties"].as_array().unwrap().contains(&json!("BJP")));
        assert_eq!(envelope["years"].as_array().unwrap().len(), 9);
        assert_eq!(envelope["party_wins"]["BJP"].as_u64().unwrap(), 9);
    }
}
