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

//! Training and prediction over the cleaned table.
//!
//! A `TrainedModel` is built once from the full table and never mutated:
//! the fitted party enumeration travels with the classifier so prediction
//! rows are encoded exactly as training rows were.

use crate::algorithms::{
    accuracy, train_test_split, Classifier, LogisticRegression, RandomForest,
};
use crate::data::ElectionRecord;
use crate::errors::{ModelError, ModelKindParseError};
use crate::features::{
    design_matrix, feature_row, recency_weights, PartyEncoder, Standing, FEATURE_COUNT,
    TARGET_YEAR,
};
use log::info;
use ndarray::Array2;
use std::str::FromStr;

/// Held-out share of rows used for the accuracy estimate.
const TEST_RATIO: f64 = 0.2;

/// Seed for the train/test partition, fixed so reported accuracy is
/// reproducible across restarts.
const SPLIT_SEED: u64 = 42;

/// Which classifier family to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    Logistic,
    #[default]
    Forest,
}

impl FromStr for ModelKind {
    type Err = ModelKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "logistic" => Ok(ModelKind::Logistic),
            "forest" => Ok(ModelKind::Forest),
            other => Err(ModelKindParseError(other.to_string())),
        }
    }
}

/// The outcome of a single prediction: the binary call and the probability
/// mass on the "win" class as a percentage rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub outcome: u8,
    pub win_probability: f64,
}

/// A fitted classifier plus the party enumeration it was fitted with.
pub struct TrainedModel {
    classifier: Box<dyn Classifier + Send + Sync>,
    encoder: PartyEncoder,
    kind: ModelKind,
    accuracy: f64,
}

impl TrainedModel {
    /// Fits a model over the cleaned table.
    ///
    /// Sample weights decay with age (`0.85` per year) and apply to the
    /// fitting only; an 80/20 deterministic split yields the reported
    /// accuracy. Tables too small to hold out a test row are fitted whole
    /// and scored on the training rows, which is only a smoke signal.
    ///
    /// Fails with `ModelError::EmptyTrainingData` when `records` is empty.
    pub fn train(records: &[ElectionRecord], kind: ModelKind) -> Result<Self, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingData);
        }

        let encoder = PartyEncoder::fit(records);
        let (x, y) = design_matrix(records, &encoder);
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        let weights = recency_weights(&years);

        let mut classifier: Box<dyn Classifier + Send + Sync> = match kind {
            ModelKind::Logistic => Box::new(LogisticRegression::new()),
            ModelKind::Forest => Box::new(RandomForest::new()),
        };

        let n = records.len();
        let n_test = ((n as f64) * TEST_RATIO).ceil() as usize;
        let accuracy = if n - n_test >= 2 && n_test >= 1 {
            let split = train_test_split(&x, &y, &weights, TEST_RATIO, SPLIT_SEED)?;
            classifier.fit(&split.x_train, &split.y_train, &split.w_train)?;
            let predictions = classifier.predict(&split.x_test)?;
            accuracy(&predictions, &split.y_test)
        } else {
            classifier.fit(&x, &y, &weights)?;
            let predictions = classifier.predict(&x)?;
            accuracy(&predictions, &y)
        };

        info!(
            "trained {:?} model on {} records ({} parties), accuracy {:.2}%",
            kind,
            n,
            encoder.classes().len(),
            accuracy * 100.0
        );

        Ok(TrainedModel { classifier, encoder, kind, accuracy })
    }

    /// Predicts the outcome for a party's standing in the target
    /// election cycle.
    pub fn predict(&self, party_name: &str, standing: &Standing) -> Result<Prediction, ModelError> {
        let code = self.encoder.transform_or_first(party_name);
        let row = feature_row(f64::from(TARGET_YEAR), code as f64, standing);
        let x = Array2::from_shape_vec((1, FEATURE_COUNT), row.to_vec())?;

        let probability = self.classifier.predict_proba(&x)?[0];
        Ok(Prediction {
            outcome: u8::from(probability >= 0.5),
            win_probability: (probability * 10000.0).round() / 100.0,
        })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Held-out accuracy from training. A coarse sanity signal on a table
    /// this small, not a quality gate.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn encoder(&self) -> &PartyEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CandidateType;

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

    fn sample_table() -> Vec<ElectionRecord> {
        let mut records = Vec::new();
        for (i, year) in (2000..2025).step_by(2).enumerate() {
            let strong = 100 + (i as u32 % 40);
            records.push(record(year, "BJP", strong, strong + 80, true));
            records.push(record(year, "INC", 40 + (i as u32 % 20), 90, false));
            records.push(record(year, "NCP", 30, 85, false));
        }
        records
    }

    #[test]
    fn test_train_fails_on_empty_table() {
        let result = TrainedModel::train(&[], ModelKind::Forest);
        assert!(matches!(result, Err(ModelError::EmptyTrainingData)));
    }

    #[test]
    fn test_forest_predicts_majority_alliance_win() {
        let model = TrainedModel::train(&sample_table(), ModelKind::Forest).unwrap();
        let standing = Standing {
            mla_strength: 132.0,
            alliance_mla_strength: 203.0,
            past_rs_wins: 5.0,
            candidate_code: 1.0,
        };
        let prediction = model.predict("BJP", &standing).unwrap();
        assert!(prediction.outcome == 0 || prediction.outcome == 1);
        assert!((0.0..=100.0).contains(&prediction.win_probability));
        assert_eq!(prediction.outcome, 1, "dominant standing should predict a win");
    }

    #[test]
    fn test_logistic_kind_fits_and_predicts() {
        let model = TrainedModel::train(&sample_table(), ModelKind::Logistic).unwrap();
        let standing = Standing {
            mla_strength: 20.0,
            alliance_mla_strength: 60.0,
            past_rs_wins: 0.0,
            candidate_code: 0.0,
        };
        let prediction = model.predict("INC", &standing).unwrap();
        assert!((0.0..=100.0).contains(&prediction.win_probability));
    }

    #[test]
    fn test_unknown_party_uses_fallback_code() {
        let model = TrainedModel::train(&sample_table(), ModelKind::Forest).unwrap();
        let standing = Standing {
            mla_strength: 50.0,
            alliance_mla_strength: 100.0,
            past_rs_wins: 1.0,
            candidate_code: 0.0,
        };
        // Must not error; the first enumerated party stands in.
        let prediction = model.predict("AAP", &standing).unwrap();
        assert!((0.0..=100.0).contains(&prediction.win_probability));
    }

    #[test]
    fn test_probability_rounded_to_two_decimals() {
        let model = TrainedModel::train(&sample_table(), ModelKind::Forest).unwrap();
        let standing = Standing {
            mla_strength: 80.0,
            alliance_mla_strength: 150.0,
            past_rs_wins: 2.0,
            candidate_code: 2.0,
        };
        let prediction = model.predict("NCP", &standing).unwrap();
        let scaled = prediction.win_probability * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9, "{} has more than two decimals", prediction.win_probability);
    }

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("forest".parse::<ModelKind>().unwrap(), ModelKind::Forest);
        assert_eq!(" Logistic ".parse::<ModelKind>().unwrap(), ModelKind::Logistic);
        assert!("svm".parse::<ModelKind>().is_err());
    }
}
