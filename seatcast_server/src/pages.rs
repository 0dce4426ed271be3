//! Minimal rendered HTML pages. These mirror the JSON endpoints for a
//! browser; the API under `/api` and `/predict` is the real surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use seatcast::stats::{self, WinRateMethod};
use std::sync::Arc;

use crate::state::AppState;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body><nav><a href=\"/\">Home</a> | <a href=\"/parties\">Parties</a> | \
         <a href=\"/about\">About</a></nav>\n{body}\n</body></html>"
    ))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let body = format!(
        "<h1>Rajya Sabha Seat Forecast</h1>\
         <p>Model: {:?}, held-out accuracy {:.2}%.</p>\
         <p>POST a JSON body with <code>party_name, mla_strength, \
         alliance_mla_strength, past_rs_wins, candidate_type</code> to \
         <code>/predict</code>.</p>",
        state.model.kind(),
        state.model.accuracy() * 100.0
    );
    page("Seat Forecast", &body)
}

pub async fn parties_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut rows = String::new();
    for name in stats::list_parties(&state.records) {
        if name == "Independent" {
            continue;
        }
        if let Some(info) = stats::party_info(&state.records, &name, WinRateMethod::RecencyWeighted)
        {
            rows.push_str(&format!(
                "<tr><td>{} <a href=\"/party/{}\">{}</a></td><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
                info.icon,
                info.party_name,
                info.party_name,
                info.current_mla_strength,
                info.current_alliance_strength,
                info.win_rate
            ));
        }
    }
    let body = format!(
        "<h1>Parties</h1><table border=\"1\">\
         <tr><th>Party</th><th>MLAs</th><th>Alliance MLAs</th><th>Win rate</th></tr>{rows}</table>"
    );
    page("Parties", &body)
}

pub async fn party_page(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let info = stats::party_info(&state.records, &name, WinRateMethod::RecencyWeighted)
        .ok_or((StatusCode::NOT_FOUND, format!("Party '{}' not found", name)))?;

    let mut rows = String::new();
    for entry in &info.historical_data {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.year,
            entry.mla_strength,
            entry.alliance_mla_strength,
            entry.past_rs_wins,
            if entry.winner == 1 { "won" } else { "-" }
        ));
    }
    let body = format!(
        "<h1>{} {}</h1><p>{}</p>\
         <p>Current strength: {} MLAs ({} with alliance). \
         Recency-weighted win rate: {:.1}%.</p>\
         <table border=\"1\"><tr><th>Year</th><th>MLAs</th><th>Alliance</th>\
         <th>Past RS wins</th><th>Result</th></tr>{}</table>",
        info.icon,
        info.party_name,
        info.description,
        info.current_mla_strength,
        info.current_alliance_strength,
        info.win_rate,
        rows
    );
    Ok(page(&info.party_name, &body))
}

pub async fn about() -> Html<String> {
    page(
        "About",
        "<h1>About</h1>\
         <p>A small decision-support tool: historical Maharashtra assembly \
         and Rajya Sabha election records fit a classifier that predicts \
         whether a party wins the next upper-house seat. Recent elections \
         weigh more than old ones (0.85 per year of age).</p>",
    )
}
