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

//! Feature construction shared by training and prediction.
//!
//! Training rows and ad-hoc prediction rows go through the same
//! `feature_row` layout and the same fitted `PartyEncoder`; any divergence
//! between the two paths silently corrupts predictions, so there is exactly
//! one place that knows the column order.

use crate::data::ElectionRecord;
use log::warn;
use ndarray::{Array1, Array2};

/// Seats in the modeled state assembly.
pub const ASSEMBLY_SEATS: f64 = 288.0;

/// Seats needed for an assembly majority; alliances at or above this line
/// dominate upper-house outcomes.
pub const MAJORITY_SEATS: f64 = 145.0;

/// Per-year exponential decay applied to older elections.
pub const RECENCY_DECAY: f64 = 0.85;

/// The election cycle predictions are made for.
pub const TARGET_YEAR: i32 = 2027;

/// Number of columns produced by `feature_row`.
pub const FEATURE_COUNT: usize = 9;

/// A party's current standing as supplied by a prediction request.
/// `candidate_code` is already validated/mapped by the request layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub mla_strength: f64,
    pub alliance_mla_strength: f64,
    pub past_rs_wins: f64,
    pub candidate_code: f64,
}

/// A fitted enumeration of the party names seen during training.
///
/// Codes are dense indexes into the lexicographically sorted vocabulary,
/// so the same table always yields the same encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyEncoder {
    classes: Vec<String>,
}

impl PartyEncoder {
    /// Fits the enumeration over the distinct party names in `records`.
    pub fn fit(records: &[ElectionRecord]) -> Self {
        let mut classes: Vec<String> = records.iter().map(|r| r.party.clone()).collect();
        classes.sort();
        classes.dedup();
        PartyEncoder { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The code for a known party name.
    pub fn transform(&self, name: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(name)).ok()
    }

    /// The code for a party name, substituting the first enumerated party
    /// for names never seen in training. A crude stand-in rather than a
    /// principled unknown category, kept for output compatibility.
    pub fn transform_or_first(&self, name: &str) -> usize {
        match self.transform(name) {
            Some(code) => code,
            None => {
                warn!("unknown party '{}', substituting '{}'", name, self.classes[0]);
                0
            }
        }
    }
}

pub fn has_majority(alliance_mla_strength: f64) -> f64 {
    if alliance_mla_strength >= MAJORITY_SEATS {
        1.0
    } else {
        0.0
    }
}

/// Builds one feature row. Column order is fixed:
/// year, party code, MLA strength, alliance strength, past RS wins,
/// candidate code, majority flag, MLA share, alliance share.
pub fn feature_row(year: f64, party_code: f64, standing: &Standing) -> [f64; FEATURE_COUNT] {
    [
        year,
        party_code,
        standing.mla_strength,
        standing.alliance_mla_strength,
        standing.past_rs_wins,
        standing.candidate_code,
        has_majority(standing.alliance_mla_strength),
        standing.mla_strength / ASSEMBLY_SEATS,
        standing.alliance_mla_strength / ASSEMBLY_SEATS,
    ]
}

/// Builds the training matrix and winner labels for the cleaned table,
/// using the same row layout as prediction.
pub fn design_matrix(
    records: &[ElectionRecord],
    encoder: &PartyEncoder,
) -> (Array2<f64>, Array1<f64>) {
    let mut data = Vec::with_capacity(records.len() * FEATURE_COUNT);
    let mut labels = Vec::with_capacity(records.len());
    for record in records {
        let standing = Standing {
            mla_strength: f64::from(record.mla_strength),
            alliance_mla_strength: f64::from(record.alliance_mla_strength),
            past_rs_wins: f64::from(record.past_rs_wins),
            candidate_code: f64::from(record.candidate_type.code()),
        };
        let code = encoder.transform_or_first(&record.party);
        data.extend_from_slice(&feature_row(f64::from(record.year), code as f64, &standing));
        labels.push(if record.winner { 1.0 } else { 0.0 });
    }
    let x = Array2::from_shape_vec((records.len(), FEATURE_COUNT), data)
        .expect("row layout has a fixed width");
    (x, Array1::from_vec(labels))
}

/// Per-sample weights `RECENCY_DECAY ^ (max_year - year)`. The most recent
/// year always weighs 1.0; a half-century-old row weighs effectively zero.
pub fn recency_weights(years: &[i32]) -> Array1<f64> {
    let max_year = years.iter().copied().max().unwrap_or(0);
    Array1::from_iter(years.iter().map(|&y| RECENCY_DECAY.powi(max_year - y)))
}
