// BSD 3-Clause License
//
// Copyright (c) 2025, Seatcast Contributors
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Descriptive statistics over the cleaned table: per-party summaries and
//! whole-dataset counts. Pure reads; nothing here touches the model.

use crate::data::ElectionRecord;
use crate::features::RECENCY_DECAY;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a historical win rate is aggregated.
///
/// `Plain` is the share of contested years won. `RecencyWeighted` applies
/// the same per-year decay the model trains under, so decades-old dominance
/// fades the way it does in the classifier; it is the variant the server
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinRateMethod {
    Plain,
    #[default]
    RecencyWeighted,
}

/// One line of a party's history, newest first in `PartyInfo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEntry {
    pub year: i32,
    pub mla_strength: u32,
    pub alliance_mla_strength: u32,
    pub past_rs_wins: u32,
    pub winner: u8,
}

/// A party's current standing and history as served to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyInfo {
    pub party_name: String,
    pub icon: String,
    pub description: String,
    pub current_mla_strength: u32,
    pub current_alliance_strength: u32,
    pub total_rs_wins: u32,
    pub win_rate: f64,
    pub historical_data: Vec<HistoricalEntry>,
}

/// Display icon for a canonical party name; pre-split faction labels keep
/// their own entries for callers still holding old names.
pub fn party_icon(name: &str) -> &'static str {
    match name {
        "BJP" => "🟠",
        "INC" => "🔵",
        "NCP" | "NCP(Ajit)" => "🟢",
        "NCP(Sharad)" => "🫐",
        "SS" | "SS(Shinde)" | "Shiv Sena" => "🟡",
        "SS(UBT)" => "🔥",
        "Independent" => "⚪",
        _ => "🏛️",
    }
}

pub fn party_description(name: &str) -> String {
    match name {
        "BJP" => "Bharatiya Janata Party - Leading party in Mahayuti alliance".to_string(),
        "INC" => "Indian National Congress - Part of MVA alliance".to_string(),
        "NCP" => "Nationalist Congress Party - Regional party".to_string(),
        "NCP(Ajit)" => "NCP (Ajit Pawar faction) - Part of Mahayuti alliance".to_string(),
        "NCP(Sharad)" => "NCP (Sharad Pawar faction) - Part of MVA alliance".to_string(),
        "SS" | "Shiv Sena" => "Shiv Sena - Maharashtra regional party".to_string(),
        "SS(Shinde)" => "Shiv Sena (Eknath Shinde) - Part of Mahayuti alliance".to_string(),
        "SS(UBT)" => "Shiv Sena (UBT / Uddhav Thackeray) - Part of MVA alliance".to_string(),
        "Independent" => "Independent Candidates".to_string(),
        other => format!("{} - Political Party", other),
    }
}

/// Win rate over a party's rows, as a percentage rounded to one decimal.
///
/// The weighted variant decays each row by `0.85^(party's latest year −
/// row year)`, mirroring the training objective.
pub fn win_rate(rows: &[&ElectionRecord], method: WinRateMethod) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let rate = match method {
        WinRateMethod::Plain => {
            let wins = rows.iter().filter(|r| r.winner).count();
            wins as f64 / rows.len() as f64 * 100.0
        }
        WinRateMethod::RecencyWeighted => {
            let max_year = rows.iter().map(|r| r.year).max().unwrap_or(0);
            let mut weighted_wins = 0.0;
            let mut total_weight = 0.0;
            for row in rows {
                let weight = RECENCY_DECAY.powi(max_year - row.year);
                total_weight += weight;
                if row.winner {
                    weighted_wins += weight;
                }
            }
            if total_weight > 0.0 { weighted_wins / total_weight * 100.0 } else { 0.0 }
        }
    };
    (rate * 10.0).round() / 10.0
}

/// Summarizes one party, or `None` when the table has no rows for it.
pub fn party_info(
    records: &[ElectionRecord],
    party_name: &str,
    method: WinRateMethod,
) -> Option<PartyInfo> {
    let mut rows: Vec<&ElectionRecord> =
        records.iter().filter(|r| r.party == party_name).collect();
    if rows.is_empty() {
        return None;
    }
    rows.sort_by(|a, b| b.year.cmp(&a.year));
    let latest = rows[0];

    let historical_data = rows
        .iter()
        .map(|r| HistoricalEntry {
            year: r.year,
            mla_strength: r.mla_strength,
            alliance_mla_strength: r.alliance_mla_strength,
            past_rs_wins: r.past_rs_wins,
            winner: u8::from(r.winner),
        })
        .collect();

    Some(PartyInfo {
        party_name: party_name.to_string(),
        icon: party_icon(party_name).to_string(),
        description: party_description(party_name),
        current_mla_strength: latest.mla_strength,
        current_alliance_strength: latest.alliance_mla_strength,
        total_rs_wins: latest.past_rs_wins,
        win_rate: win_rate(&rows, method),
        historical_data,
    })
}

/// Distinct party names in first-appearance order.
pub fn list_parties(records: &[ElectionRecord]) -> Vec<String> {
    let mut parties = Vec::new();
    for record in records {
        if !parties.contains(&record.party) {
            parties.push(record.party.clone());
        }
    }
    parties
}

/// Whole-dataset counts for the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_records: usize,
    pub unique_parties: Vec<String>,
    pub years: Vec<i32>,
    pub party_wins: BTreeMap<String, u32>,
}

pub fn dataset_stats(records: &[ElectionRecord]) -> DatasetStats {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut party_wins = BTreeMap::new();
    for record in records.iter().filter(|r| r.winner) {
        *party_wins.entry(record.party.clone()).or_insert(0) += 1;
    }

    DatasetStats {
        total_records: records.len(),
        unique_parties: list_parties(records),
        years,
        party_wins,
    }
}
