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

pub mod csv;

pub use csv::{load_raw_records, write_records, CsvLoader};

use serde::{Deserialize, Serialize};

/// Experience category of the candidate a party fields for the seat.
///
/// The integer codes are part of the on-disk table format and of the
/// prediction API, so the mapping is fixed: `New = 0`, `Incumbent = 1`,
/// `Mixed = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateType {
    New,
    Incumbent,
    Mixed,
}

impl CandidateType {
    pub fn code(self) -> u8 {
        match self {
            CandidateType::New => 0,
            CandidateType::Incumbent => 1,
            CandidateType::Mixed => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CandidateType::New),
            1 => Some(CandidateType::Incumbent),
            2 => Some(CandidateType::Mixed),
            _ => None,
        }
    }

    /// Parses the cleaner's input vocabulary: `new`, `incumbent`, `mixed`
    /// (case-insensitive). The wider synonym table lives with the
    /// prediction-request validation, not here.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "new" => Some(CandidateType::New),
            "incumbent" => Some(CandidateType::Incumbent),
            "mixed" => Some(CandidateType::Mixed),
            _ => None,
        }
    }
}

mod candidate_code {
    use super::CandidateType;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &CandidateType, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(value.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CandidateType, D::Error> {
        let code = u8::deserialize(d)?;
        CandidateType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown candidate type code {}", code)))
    }
}

mod winner_flag {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(d)? != 0)
    }
}

/// One cleaned row per (year, party).
///
/// Produced once by the data cleaner and immutable afterwards. The CSV
/// representation keeps `candidate_type` as its integer code and `winner`
/// as `0`/`1`.
///
/// Invariant: within a year exactly one record carries `winner = true`,
/// and it is the record with the maximum `mla_strength` of that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub year: i32,
    pub party: String,
    pub mla_strength: u32,
    pub alliance_mla_strength: u32,
    pub past_rs_wins: u32,
    #[serde(with = "candidate_code")]
    pub candidate_type: CandidateType,
    #[serde(with = "winner_flag")]
    pub winner: bool,
}

/// An uncleaned input row as the cleaner receives it: the party name may be
/// a faction or spelling variant, `candidate_type` is free text and the
/// `winner` column may be absent (it is recomputed anyway).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawRecord {
    pub year: i32,
    pub party: String,
    pub mla_strength: u32,
    pub alliance_mla_strength: u32,
    pub past_rs_wins: u32,
    pub candidate_type: String,
    #[serde(default)]
    pub winner: Option<u8>,
}

/// A trait for loading the cleaned election table from a file.
///
/// Implementors parse one file format into `Vec<ElectionRecord>` and define
/// their own error type. The table is small (at most a few hundred rows),
/// so loading is a one-shot read into memory.
pub trait DatasetLoader {
    /// Loads all records from the file at `path`.
    fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<ElectionRecord>, Self::Error>;

    /// The error type returned by `load`.
    type Error: std::error::Error + 'static;
}

/// Loads the election table using a specified `DatasetLoader` implementation.
pub fn load_data<T: DatasetLoader, P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<ElectionRecord>, T::Error> {
    T::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_type_codes_round_trip() {
        for ct in [CandidateType::New, CandidateType::Incumbent, CandidateType::Mixed] {
            assert_eq!(CandidateType::from_code(ct.code()), Some(ct));
        }
        assert_eq!(CandidateType::from_code(3), None);
    }

    #[test]
    fn test_candidate_type_parse_vocabulary() {
        assert_eq!(CandidateType::parse("new"), Some(CandidateType::New));
        assert_eq!(CandidateType::parse(" Incumbent "), Some(CandidateType::Incumbent));
        assert_eq!(CandidateType::parse("MIXED"), Some(CandidateType::Mixed));
        assert_eq!(CandidateType::parse("veteran"), None, "synonyms belong to request parsing");
    }
}
