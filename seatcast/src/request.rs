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

//! Validation of prediction requests.
//!
//! Every check here runs before any model is touched. Field values arrive
//! as loose JSON (numbers, numeric strings, candidate-type tokens), so the
//! body is mirrored as `Option<Value>` fields and validated in one pass:
//! missing/empty fields first, then numeric bounds, then the candidate
//! type.

use crate::errors::RequestError;
use crate::features::Standing;
use serde::Deserialize;
use serde_json::Value;

/// The JSON body of a prediction request, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub party_name: Option<Value>,
    #[serde(default)]
    pub mla_strength: Option<Value>,
    #[serde(default)]
    pub alliance_mla_strength: Option<Value>,
    #[serde(default)]
    pub past_rs_wins: Option<Value>,
    #[serde(default)]
    pub candidate_type: Option<Value>,
}

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub party_name: String,
    pub standing: Standing,
}

fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn parse_number(value: &Value) -> Result<f64, RequestError> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or(RequestError::NonNumeric)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| RequestError::NonNumeric)?,
        _ => return Err(RequestError::NonNumeric),
    };
    if !number.is_finite() {
        return Err(RequestError::NonNumeric);
    }
    Ok(number)
}

/// Maps a candidate-type token to its code. Numbers (and numeric strings)
/// pass through verbatim, without range checking; unrecognized text fails.
pub fn parse_candidate_type(value: &Value) -> Result<f64, RequestError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            RequestError::InvalidCandidateType(value.to_string())
        }),
        Value::String(s) => {
            let token = s.trim().to_lowercase();
            if let Some(code) = candidate_code_for_token(&token) {
                return Ok(code);
            }
            token
                .parse::<f64>()
                .map_err(|_| RequestError::InvalidCandidateType(s.clone()))
        }
        other => Err(RequestError::InvalidCandidateType(other.to_string())),
    }
}

fn candidate_code_for_token(token: &str) -> Option<f64> {
    match token {
        "new" | "first-time" | "firsttime" | "fresh" => Some(0.0),
        "incumbent" | "experienced" | "experience" | "senior" | "veteran" | "returning" => {
            Some(1.0)
        }
        "mixed" | "both" => Some(2.0),
        _ => None,
    }
}

impl PredictRequest {
    /// Runs the full validation ladder and yields the party name plus a
    /// `Standing` ready for feature construction.
    pub fn validate(&self) -> Result<ValidatedRequest, RequestError> {
        let fields: [(&str, &Option<Value>); 5] = [
            ("party_name", &self.party_name),
            ("mla_strength", &self.mla_strength),
            ("alliance_mla_strength", &self.alliance_mla_strength),
            ("past_rs_wins", &self.past_rs_wins),
            ("candidate_type", &self.candidate_type),
        ];
        let missing: Vec<&str> =
            fields.iter().filter(|(_, v)| is_missing(v)).map(|(name, _)| *name).collect();
        if !missing.is_empty() {
            return Err(RequestError::MissingFields(missing.join(", ")));
        }

        // The missing pass above guarantees each field is present.
        let mla_strength = parse_number(self.mla_strength.as_ref().unwrap_or(&Value::Null))?;
        let alliance_mla_strength =
            parse_number(self.alliance_mla_strength.as_ref().unwrap_or(&Value::Null))?;
        let past_rs_wins = parse_number(self.past_rs_wins.as_ref().unwrap_or(&Value::Null))?;
        let candidate_code =
            parse_candidate_type(self.candidate_type.as_ref().unwrap_or(&Value::Null))?;

        if mla_strength < 0.0 || alliance_mla_strength < 0.0 || past_rs_wins < 0.0 {
            return Err(RequestError::NegativeValue);
        }

        let party_name = match self.party_name.as_ref() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => unreachable!("missing pass rejects absent party_name"),
        };

        Ok(ValidatedRequest {
            party_name,
            standing: Standing {
                mla_strength,
                alliance_mla_strength,
                past_rs_wins,
                candidate_code,
            },
        })
    }
}
