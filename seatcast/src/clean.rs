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

//! One-shot normalization of raw election rows into the canonical table.
//!
//! The passes run in a fixed order: exact-duplicate removal, party-name
//! canonicalization, first-row-wins collapse per (year, party), candidate
//! type mapping, winner recomputation, and a deterministic sort. The
//! recomputed `winner` flag ignores whatever the raw rows claimed.

use crate::data::{CandidateType, ElectionRecord, RawRecord};
use crate::errors::CleanError;
use log::{debug, info};
use std::collections::HashSet;

/// Collapses known faction and spelling variants to canonical party names.
/// Unlisted names pass through unchanged.
pub fn canonical_party(name: &str) -> &str {
    match name {
        "INC(I)" => "INC",
        "Shiv Sena (UBT)" | "Shiv Sena (Shinde)" | "Shiv Sena" => "SS",
        "NCP (Ajit)" | "NCP (SP)" => "NCP",
        other => other,
    }
}

/// Runs the full cleaning pipeline over raw input rows.
///
/// Fails on the first candidate-type value outside the closed
/// new/incumbent/mixed vocabulary; everything else is a total function of
/// the input.
pub fn clean_records(raw: Vec<RawRecord>) -> Result<Vec<ElectionRecord>, CleanError> {
    let input_len = raw.len();

    // Exact duplicates first, then variant names are collapsed, which can
    // create new (year, party) collisions; those keep the first row seen.
    let mut seen_rows: HashSet<RawRecord> = HashSet::new();
    let mut seen_keys: HashSet<(i32, String)> = HashSet::new();
    let mut records = Vec::new();

    for mut row in raw {
        if !seen_rows.insert(row.clone()) {
            continue;
        }
        row.party = canonical_party(&row.party).to_string();
        if !seen_keys.insert((row.year, row.party.clone())) {
            debug!("dropping repeated row for {} in {}", row.party, row.year);
            continue;
        }

        let candidate_type = CandidateType::parse(&row.candidate_type).ok_or_else(|| {
            CleanError::UnknownCandidateType {
                value: row.candidate_type.clone(),
                party: row.party.clone(),
                year: row.year,
            }
        })?;

        records.push(ElectionRecord {
            year: row.year,
            party: row.party,
            mla_strength: row.mla_strength,
            alliance_mla_strength: row.alliance_mla_strength,
            past_rs_wins: row.past_rs_wins,
            candidate_type,
            winner: false,
        });
    }

    // Year ascending, strength descending; party name breaks strength ties
    // so the table (and the winner pick below) is reproducible.
    records.sort_by(|a, b| {
        a.year
            .cmp(&b.year)
            .then(b.mla_strength.cmp(&a.mla_strength))
            .then(a.party.cmp(&b.party))
    });
    recompute_winners(&mut records);

    info!("cleaned {} raw rows into {} records", input_len, records.len());
    Ok(records)
}

/// Resets every `winner` flag, then marks the strongest row of each year.
/// The strict `>` comparison means the first row in sorted order wins when
/// two parties share the maximum strength.
fn recompute_winners(records: &mut [ElectionRecord]) {
    for record in records.iter_mut() {
        record.winner = false;
    }

    let years: HashSet<i32> = records.iter().map(|r| r.year).collect();
    for year in years {
        let mut best: Option<usize> = None;
        for (i, record) in records.iter().enumerate() {
            if record.year != year {
                continue;
            }
            match best {
                Some(b) if records[b].mla_strength >= record.mla_strength => {}
                _ => best = Some(i),
            }
        }
        if let Some(i) = best {
            records[i].winner = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(year: i32, party: &str, mla: u32, alliance: u32, wins: u32, ct: &str) -> RawRecord {
        RawRecord {
            year,
            party: party.to_string(),
            mla_strength: mla,
            alliance_mla_strength: alliance,
            past_rs_wins: wins,
            candidate_type: ct.to_string(),
            winner: None,
        }
    }

    #[test]
    fn test_exact_duplicates_dropped() {
        let rows = vec![
            raw(2024, "BJP", 132, 237, 8, "incumbent"),
            raw(2024, "BJP", 132, 237, 8, "incumbent"),
        ];
        let cleaned = clean_records(rows).unwrap();
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn test_faction_variants_collapse_to_first_row() {
        let rows = vec![
            raw(2024, "Shiv Sena (Shinde)", 57, 237, 3, "incumbent"),
            raw(2024, "Shiv Sena (UBT)", 20, 46, 3, "new"),
        ];
        let cleaned = clean_records(rows).unwrap();
        assert_eq!(cleaned.len(), 1, "both variants map to SS, first row kept");
        assert_eq!(cleaned[0].party, "SS");
        assert_eq!(cleaned[0].mla_strength, 57);
        assert_eq!(cleaned[0].candidate_type, CandidateType::Incumbent);
    }

    #[test]
    fn test_unknown_candidate_type_fails() {
        let rows = vec![raw(2024, "BJP", 132, 237, 8, "rookie")];
        let err = clean_records(rows).unwrap_err();
        assert!(err.to_string().contains("rookie"), "error names the value: {}", err);
    }

    #[test]
    fn test_exactly_one_winner_per_year_max_strength() {
        let rows = vec![
            raw(2019, "INC", 44, 98, 2, "new"),
            raw(2019, "BJP", 105, 161, 6, "incumbent"),
            raw(2024, "BJP", 132, 237, 8, "incumbent"),
            raw(2024, "INC", 16, 46, 2, "mixed"),
        ];
        let cleaned = clean_records(rows).unwrap();
        for year in [2019, 2024] {
            let in_year: Vec<_> = cleaned.iter().filter(|r| r.year == year).collect();
            let winners: Vec<_> = in_year.iter().filter(|r| r.winner).collect();
            assert_eq!(winners.len(), 1, "exactly one winner in {}", year);
            let max = in_year.iter().map(|r| r.mla_strength).max().unwrap();
            assert_eq!(winners[0].mla_strength, max);
        }
    }

    #[test]
    fn test_raw_winner_claims_ignored() {
        let mut weak = raw(2024, "INC", 16, 46, 2, "mixed");
        weak.winner = Some(1);
        let rows = vec![weak, raw(2024, "BJP", 132, 237, 8, "incumbent")];
        let cleaned = clean_records(rows).unwrap();
        let winner = cleaned.iter().find(|r| r.winner).unwrap();
        assert_eq!(winner.party, "BJP");
    }

    #[test]
    fn test_strength_tie_first_sorted_row_wins() {
        let rows = vec![
            raw(2020, "NCP", 54, 154, 4, "mixed"),
            raw(2020, "BJP", 54, 154, 6, "incumbent"),
        ];
        let cleaned = clean_records(rows).unwrap();
        let winners: Vec<_> = cleaned.iter().filter(|r| r.winner).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].party, "BJP", "ties resolve to the first row in sorted order");
    }

    #[test]
    fn test_sorted_year_asc_strength_desc() {
        let rows = vec![
            raw(2024, "INC", 16, 46, 2, "mixed"),
            raw(2019, "BJP", 105, 161, 6, "incumbent"),
            raw(2024, "BJP", 132, 237, 8, "incumbent"),
        ];
        let cleaned = clean_records(rows).unwrap();
        let keys: Vec<(i32, u32)> = cleaned.iter().map(|r| (r.year, r.mla_strength)).collect();
        assert_eq!(keys, vec![(2019, 105), (2024, 132), (2024, 16)]);
    }
}
