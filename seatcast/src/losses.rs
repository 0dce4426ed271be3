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

use crate::errors::LossError;
use ndarray::Array1;

pub trait LossFunction {
    fn calculate(&self, predictions: &Array1<f64>, actuals: &Array1<f64>)
        -> Result<f64, LossError>;

    /// Sample-weighted variant; the unweighted form is the special case of
    /// all-ones weights.
    fn calculate_weighted(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
        sample_weights: &Array1<f64>,
    ) -> Result<f64, LossError>;
}

pub struct CrossEntropy;

fn validate(predictions: &Array1<f64>, actuals: &Array1<f64>) -> Result<(), LossError> {
    if predictions.is_empty() || actuals.is_empty() {
        return Err(LossError::EmptyInput);
    }
    if predictions.len() != actuals.len() {
        return Err(LossError::DimensionMismatch {
            expected: predictions.len(),
            actual: actuals.len(),
        });
    }
    if predictions.iter().any(|&v| !v.is_finite()) || actuals.iter().any(|&v| !v.is_finite()) {
        return Err(LossError::InvalidNumericValue);
    }
    if predictions.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
        return Err(LossError::InvalidPredictionRange);
    }
    if actuals.iter().any(|&y| y != 0.0 && y != 1.0) {
        return Err(LossError::InvalidActualValue);
    }
    Ok(())
}

impl LossFunction for CrossEntropy {
    fn calculate(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        self.calculate_weighted(predictions, actuals, &Array1::ones(predictions.len()))
    }

    fn calculate_weighted(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
        sample_weights: &Array1<f64>,
    ) -> Result<f64, LossError> {
        validate(predictions, actuals)?;
        if sample_weights.len() != predictions.len() {
            return Err(LossError::DimensionMismatch {
                expected: predictions.len(),
                actual: sample_weights.len(),
            });
        }
        let total_weight = sample_weights.sum();
        if total_weight <= 0.0 || !total_weight.is_finite() {
            return Err(LossError::InvalidNumericValue);
        }

        let epsilon = 1e-15;
        let log_loss = actuals
            .iter()
            .zip(predictions.iter())
            .zip(sample_weights.iter())
            .map(|((&y, &p), &w)| {
                let p = p.clamp(epsilon, 1.0 - epsilon);
                w * (-y * p.ln() - (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / total_weight;
        Ok(log_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cross_entropy_empty_input() {
        let predictions: Array1<f64> = Array1::zeros(0);
        let actuals = array![1.0];
        let result = CrossEntropy.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::EmptyInput)));
    }

    #[test]
    fn test_cross_entropy_dimension_mismatch() {
        let predictions = array![0.5, 0.5];
        let actuals = array![1.0, 0.0, 1.0];
        let result = CrossEntropy.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[test]
    fn test_cross_entropy_prediction_range() {
        let predictions = array![1.5, 0.5];
        let actuals = array![1.0, 0.0];
        let result = CrossEntropy.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::InvalidPredictionRange)));
    }

    #[test]
    fn test_cross_entropy_actual_values() {
        let predictions = array![0.5, 0.5];
        let actuals = array![1.0, 2.0];
        let result = CrossEntropy.calculate(&predictions, &actuals);
        assert!(matches!(result, Err(LossError::InvalidActualValue)));
    }

    #[test]
    fn test_cross_entropy_positive_on_imperfect_predictions() {
        let predictions = array![0.1, 0.2, 0.7, 0.9];
        let actuals = array![0.0, 0.0, 1.0, 1.0];
        let loss = CrossEntropy.calculate(&predictions, &actuals).unwrap();
        assert!(loss > 0.0, "Loss should be positive, got: {}", loss);
    }

    #[test]
    fn test_weighting_shifts_loss_toward_heavy_samples() {
        // Bad prediction on the heavy sample must cost more than on the
        // light one.
        let predictions = array![0.9, 0.1];
        let actuals = array![0.0, 0.0];
        let heavy_on_bad = CrossEntropy
            .calculate_weighted(&predictions, &actuals, &array![1.0, 0.1])
            .unwrap();
        let light_on_bad = CrossEntropy
            .calculate_weighted(&predictions, &actuals, &array![0.1, 1.0])
            .unwrap();
        assert!(heavy_on_bad > light_on_bad);
    }
}
