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

use crate::errors::OptimizerError;
use ndarray::{Array1, Array2};

pub(crate) fn sigmoid(linear_output: &Array1<f64>) -> Array1<f64> {
    linear_output.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}

/// A gradient step for models fitted under per-sample weights.
///
/// Implementations receive the full batch plus the sample weights and
/// return `(gradient of the coefficients, gradient of the bias)`.
pub trait WeightedOptimizer {
    fn compute_gradients(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weights: &Array1<f64>,
        coefficients: &Array1<f64>,
        bias: f64,
    ) -> Result<(Array1<f64>, f64), OptimizerError>;
}

/// Batch gradient of the weighted cross-entropy objective under a sigmoid
/// link: errors are `sigmoid(x·w + b) − y`, each scaled by its sample
/// weight and normalized by the total weight.
pub struct WeightedSigmoidGradient;

impl WeightedOptimizer for WeightedSigmoidGradient {
    fn compute_gradients(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weights: &Array1<f64>,
        coefficients: &Array1<f64>,
        bias: f64,
    ) -> Result<(Array1<f64>, f64), OptimizerError> {
        if x.is_empty() || y.is_empty() {
            return Err(OptimizerError::EmptyInput);
        }
        if x.ncols() != coefficients.len() {
            return Err(OptimizerError::DimensionMismatch {
                expected: x.ncols(),
                actual: coefficients.len(),
            });
        }
        if x.nrows() != y.len() {
            return Err(OptimizerError::DimensionMismatch { expected: x.nrows(), actual: y.len() });
        }
        if x.nrows() != sample_weights.len() {
            return Err(OptimizerError::DimensionMismatch {
                expected: x.nrows(),
                actual: sample_weights.len(),
            });
        }
        if x.iter().any(|&v| !v.is_finite())
            || y.iter().any(|&v| !v.is_finite())
            || sample_weights.iter().any(|&v| !v.is_finite())
            || coefficients.iter().any(|&v| !v.is_finite())
            || !bias.is_finite()
        {
            return Err(OptimizerError::InvalidNumericValue);
        }

        let total_weight = sample_weights.sum();
        if total_weight <= 0.0 {
            return Err(OptimizerError::NumericalInstability);
        }

        let predictions = sigmoid(&(x.dot(coefficients) + bias));
        let weighted_errors = (&predictions - y) * sample_weights;
        let grad_coefficients = x.t().dot(&weighted_errors) / total_weight;
        let grad_bias = weighted_errors.sum() / total_weight;

        if !grad_coefficients.iter().all(|&v| v.is_finite()) || !grad_bias.is_finite() {
            return Err(OptimizerError::NumericalInstability);
        }

        Ok((grad_coefficients, grad_bias))
    }
}
