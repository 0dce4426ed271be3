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

use crate::data::{CandidateType, DatasetLoader, ElectionRecord, RawRecord};
use crate::errors::{CsvError, DataError};
use log::warn;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Loader for the cleaned election table
/// (`year,party,mla_strength,alliance_mla_strength,past_rs_wins,candidate_type,winner`).
pub struct CsvLoader;

// Wire row for the cleaned table; converted field by field so parse errors
// carry the row number.
#[derive(Debug, Deserialize)]
struct CleanRow {
    year: i32,
    party: String,
    mla_strength: u32,
    alliance_mla_strength: u32,
    past_rs_wins: u32,
    candidate_type: u8,
    winner: u8,
}

impl DatasetLoader for CsvLoader {
    fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ElectionRecord>, DataError> {
        let file = File::open(path.as_ref()).map_err(CsvError::FileOpen)?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<CleanRow>().enumerate() {
            let row = result.map_err(CsvError::CsvParse)?;
            let candidate_type = CandidateType::from_code(row.candidate_type)
                .ok_or(CsvError::UnknownCandidateCode { code: row.candidate_type, row: i + 1 })?;
            if row.alliance_mla_strength < row.mla_strength {
                warn!(
                    "row {}: alliance strength {} below party strength {} for {} in {}",
                    i + 1,
                    row.alliance_mla_strength,
                    row.mla_strength,
                    row.party,
                    row.year
                );
            }
            records.push(ElectionRecord {
                year: row.year,
                party: row.party,
                mla_strength: row.mla_strength,
                alliance_mla_strength: row.alliance_mla_strength,
                past_rs_wins: row.past_rs_wins,
                candidate_type,
                winner: row.winner != 0,
            });
        }

        if records.is_empty() {
            return Err(CsvError::EmptyFile.into());
        }
        Ok(records)
    }

    type Error = DataError;
}

/// Reads the cleaner's raw input table. `flexible` tolerates a missing
/// trailing `winner` column; the cleaner recomputes the flag regardless.
pub fn load_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, DataError> {
    let file = File::open(path.as_ref()).map_err(CsvError::FileOpen)?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawRecord>() {
        rows.push(result.map_err(CsvError::CsvParse)?);
    }
    if rows.is_empty() {
        return Err(CsvError::EmptyFile.into());
    }
    Ok(rows)
}

/// Persists a cleaned table, headers included.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ElectionRecord]) -> Result<(), DataError> {
    let file = File::create(path.as_ref()).map_err(CsvError::FileOpen)?;
    let mut wtr = csv::Writer::from_writer(file);
    for record in records {
        wtr.serialize(record).map_err(CsvError::CsvParse)?;
    }
    wtr.flush().map_err(CsvError::FileOpen)?;
    Ok(())
}
