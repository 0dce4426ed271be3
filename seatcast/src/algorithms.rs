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

use std::cmp::Ordering;

use libm::log2;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::ModelError;
use crate::losses::{CrossEntropy, LossFunction};
use crate::optimizers::{sigmoid, WeightedOptimizer, WeightedSigmoidGradient};
use crate::scalers::StandardScaler;

/// A binary classifier with class-probability output, fitted under
/// per-sample weights.
///
/// Both model families in this crate sit behind this trait; the choice
/// between them is a quality/variance tradeoff, not a structural one.
pub trait Classifier {
    /// Fits the classifier. `y` holds 0/1 labels; `sample_weights` scales
    /// each row's influence on the fit (recency weighting, typically).
    fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weights: &Array1<f64>,
    ) -> Result<(), ModelError>;

    /// Probability mass on the positive ("win") class, one value per row.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError>;

    /// Binary labels at the 0.5 threshold.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        Ok(self.predict_proba(x)?.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}

fn check_fit_inputs(
    x: &Array2<f64>,
    y: &Array1<f64>,
    sample_weights: &Array1<f64>,
) -> Result<(), ModelError> {
    if x.is_empty() || y.is_empty() {
        return Err(ModelError::EmptyTrainingData);
    }
    if x.nrows() != y.len() || x.nrows() != sample_weights.len() {
        return Err(ModelError::EmptyTrainingData);
    }
    if sample_weights.sum() <= 0.0 {
        return Err(ModelError::InvalidSampleWeights);
    }
    Ok(())
}

/// Logistic regression fitted by weighted batch gradient descent.
///
/// Inputs are standard-scaled internally (seat counts, years and shares
/// live on wildly different scales); the scaler fitted during training is
/// reapplied to every prediction row.
pub struct LogisticRegression {
    coefficients: Option<Array1<f64>>,
    bias: f64,
    scaler: StandardScaler,
    optimizer: WeightedSigmoidGradient,
    loss_function: CrossEntropy,
    learning_rate: f64,
    epochs: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        LogisticRegression {
            coefficients: None,
            bias: 0.0,
            scaler: StandardScaler::new(),
            optimizer: WeightedSigmoidGradient,
            loss_function: CrossEntropy,
            learning_rate: 0.1,
            epochs: 2000,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }
}

impl Classifier for LogisticRegression {
    fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weights: &Array1<f64>,
    ) -> Result<(), ModelError> {
        check_fit_inputs(x, y, sample_weights)?;

        let x_scaled = self.scaler.fit_transform(x)?;
        let mut coefficients = Array1::zeros(x_scaled.ncols());
        let mut bias = 0.0;

        for epoch in 0..self.epochs {
            let (grad_coefficients, grad_bias) = self.optimizer.compute_gradients(
                &x_scaled,
                y,
                sample_weights,
                &coefficients,
                bias,
            )?;
            coefficients = coefficients - grad_coefficients * self.learning_rate;
            bias -= grad_bias * self.learning_rate;

            if epoch % 500 == 0 || epoch == self.epochs - 1 {
                let predictions = sigmoid(&(x_scaled.dot(&coefficients) + bias));
                let loss =
                    self.loss_function.calculate_weighted(&predictions, y, sample_weights)?;
                debug!("epoch {}: weighted log-loss {:.6}", epoch, loss);
            }
        }

        self.coefficients = Some(coefficients);
        self.bias = bias;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let coefficients = self.coefficients.as_ref().ok_or(ModelError::NotFitted)?;
        let x_scaled = self.scaler.transform(x)?;
        Ok(sigmoid(&(x_scaled.dot(coefficients) + self.bias)))
    }
}

fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        -p * log2(p) - (1.0 - p) * log2(1.0 - p)
    }
}

#[derive(Debug)]
enum TreeNode {
    Internal { feature: usize, threshold: f64, left: Box<TreeNode>, right: Box<TreeNode> },
    Leaf { probability: f64 },
}

impl TreeNode {
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        match self {
            TreeNode::Leaf { probability } => *probability,
            TreeNode::Internal { feature, threshold, left, right } => {
                if row[*feature] < *threshold {
                    left.predict_row(row)
                } else {
                    right.predict_row(row)
                }
            }
        }
    }
}

/// A binary classification tree split on entropy.
///
/// Leaves store the positive-class share of the rows that reached them, so
/// probability estimates come out of the tree directly.
pub struct DecisionTree {
    max_depth: usize,
    min_samples_leaf: usize,
    min_loss: f64,
    root: Option<TreeNode>,
}

impl DecisionTree {
    pub fn new(max_depth: usize, min_samples_leaf: usize) -> Self {
        DecisionTree { max_depth, min_samples_leaf, min_loss: 1e-6, root: None }
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        if x.is_empty() || y.is_empty() || x.nrows() != y.len() {
            return Err(ModelError::EmptyTrainingData);
        }
        let indices: Vec<usize> = (0..x.nrows()).collect();
        self.root = Some(self.build_tree(x, y, indices, 0));
        Ok(())
    }

    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;
        Ok(Array1::from_iter(x.outer_iter().map(|row| root.predict_row(row))))
    }

    /// Recursively splits `indices` on the best feature/threshold until a
    /// stop condition turns the node into a leaf.
    fn build_tree(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: Vec<usize>,
        depth: usize,
    ) -> TreeNode {
        let n = indices.len();
        let positives: f64 = indices.iter().map(|&i| y[i]).sum();
        let probability = positives / n as f64;

        if depth >= self.max_depth
            || n <= self.min_samples_leaf
            || binary_entropy(probability) <= self.min_loss
        {
            return TreeNode::Leaf { probability };
        }

        let Some((feature, threshold)) = self.find_best_split(x, y, &indices) else {
            return TreeNode::Leaf { probability };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&i| x[[i, feature]] < threshold);
        if left_indices.is_empty() || right_indices.is_empty() {
            return TreeNode::Leaf { probability };
        }

        TreeNode::Internal {
            feature,
            threshold,
            left: Box::new(self.build_tree(x, y, left_indices, depth + 1)),
            right: Box::new(self.build_tree(x, y, right_indices, depth + 1)),
        }
    }

    /// Scans every feature's sorted values, tracking running label counts
    /// on each side of the candidate boundary, and returns the split with
    /// the lowest size-weighted entropy. `None` when no boundary separates
    /// two distinct values.
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
    ) -> Option<(usize, f64)> {
        let n = indices.len() as f64;
        let total_positives: f64 = indices.iter().map(|&i| y[i]).sum();

        let mut best: Option<(f64, usize, f64)> = None;
        for feature in 0..x.ncols() {
            let mut values: Vec<(f64, f64)> =
                indices.iter().map(|&i| (x[[i, feature]], y[i])).collect();
            values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut left_positives = 0.0;
            let mut left_count = 0.0;
            for k in 1..values.len() {
                left_positives += values[k - 1].1;
                left_count += 1.0;
                if values[k].0 == values[k - 1].0 {
                    continue;
                }

                let right_count = n - left_count;
                let right_positives = total_positives - left_positives;
                let loss = (left_count / n) * binary_entropy(left_positives / left_count)
                    + (right_count / n) * binary_entropy(right_positives / right_count);

                if best.map_or(true, |(best_loss, _, _)| loss < best_loss) {
                    best = Some((loss, feature, values[k].0));
                }
            }
        }
        best.map(|(_, feature, threshold)| (feature, threshold))
    }
}

/// An ensemble of entropy-split decision trees over weighted bootstrap
/// samples. Probability output is the mean of the trees' leaf
/// probabilities. All randomness comes from one seeded generator, so a
/// given table always grows the same forest.
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    max_depth: usize,
    min_samples_leaf: usize,
    seed: u64,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomForest {
    /// Defaults sized for a small table: many shallow trees.
    pub fn new() -> Self {
        RandomForest { trees: Vec::new(), n_trees: 200, max_depth: 6, min_samples_leaf: 2, seed: 42 }
    }

    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Draws `n` row indices with probability proportional to each row's
/// weight. The recency weighting enters the forest through this resampling
/// rather than through the split criterion.
fn weighted_bootstrap_indices(cumulative: &[f64], total: f64, n: usize, rng: &mut StdRng) -> Vec<usize> {
    (0..n)
        .map(|_| {
            let r = rng.gen::<f64>() * total;
            cumulative.partition_point(|&c| c <= r).min(n - 1)
        })
        .collect()
}

impl Classifier for RandomForest {
    fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weights: &Array1<f64>,
    ) -> Result<(), ModelError> {
        check_fit_inputs(x, y, sample_weights)?;

        let n = x.nrows();
        let mut cumulative = Vec::with_capacity(n);
        let mut total = 0.0;
        for &w in sample_weights.iter() {
            total += w;
            cumulative.push(total);
        }

        self.trees.clear();
        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..self.n_trees {
            let indices = weighted_bootstrap_indices(&cumulative, total, n, &mut rng);
            let x_bootstrap = x.select(Axis(0), &indices);
            let y_bootstrap = y.select(Axis(0), &indices);

            let mut tree = DecisionTree::new(self.max_depth, self.min_samples_leaf);
            tree.fit(&x_bootstrap, &y_bootstrap)?;
            self.trees.push(tree);
        }
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }
        let mut sums = Array1::<f64>::zeros(x.nrows());
        for tree in &self.trees {
            sums = sums + tree.predict_proba(x)?;
        }
        Ok(sums / self.trees.len() as f64)
    }
}

/// A deterministic shuffled partition of rows, labels and weights.
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub y_train: Array1<f64>,
    pub w_train: Array1<f64>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<f64>,
}

/// Shuffles row indices with a seeded generator and carves off
/// `ceil(n * test_ratio)` rows as the held-out set. The same seed over the
/// same table always yields the same partition.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    sample_weights: &Array1<f64>,
    test_ratio: f64,
    seed: u64,
) -> Result<TrainTestSplit, ModelError> {
    let n = x.nrows();
    if n == 0 {
        return Err(ModelError::EmptyTrainingData);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_test = ((n as f64) * test_ratio).ceil() as usize;
    let (test_indices, train_indices) = indices.split_at(n_test.min(n));

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_indices),
        y_train: y.select(Axis(0), train_indices),
        w_train: sample_weights.select(Axis(0), train_indices),
        x_test: x.select(Axis(0), test_indices),
        y_test: y.select(Axis(0), test_indices),
    })
}

/// Share of matching binary labels.
pub fn accuracy(predictions: &Array1<f64>, actuals: &Array1<f64>) -> f64 {
    if actuals.is_empty() {
        return 0.0;
    }
    let matches = predictions
        .iter()
        .zip(actuals.iter())
        .filter(|(pred, actual)| (**pred - **actual).abs() < f64::EPSILON)
        .count();
    matches as f64 / actuals.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable_data() -> (Array2<f64>, Array1<f64>, Array1<f64>) {
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                1.0, 10.0, //
                2.0, 12.0, //
                1.5, 11.0, //
                2.5, 13.0, //
                8.0, 30.0, //
                9.0, 32.0, //
                8.5, 31.0, //
                9.5, 33.0,
            ],
        )
        .unwrap();
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let w = Array1::ones(8);
        (x, y, w)
    }

    #[test]
    fn test_logistic_regression_fit_predict() {
        let (x, y, w) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&x, &y, &w).unwrap();

        let probabilities = model.predict_proba(&x).unwrap();
        assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!(probabilities[0] < 0.5, "low-strength row should lean 0");
        assert!(probabilities[7] > 0.5, "high-strength row should lean 1");

        let predictions = model.predict(&x).unwrap();
        assert_eq!(accuracy(&predictions, &y), 1.0);
    }

    #[test]
    fn test_logistic_regression_unfitted_predict_fails() {
        let model = LogisticRegression::new();
        let x = Array2::from_shape_vec((1, 2), vec![1.0, 2.0]).unwrap();
        assert!(matches!(model.predict_proba(&x), Err(ModelError::NotFitted)));
    }

    #[test]
    fn test_logistic_regression_empty_input_fails() {
        let mut model = LogisticRegression::new();
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        let w = Array1::<f64>::zeros(0);
        assert!(matches!(model.fit(&x, &y, &w), Err(ModelError::EmptyTrainingData)));
    }

    #[test]
    fn test_decision_tree_separates_classes() {
        let (x, y, _) = separable_data();
        let mut tree = DecisionTree::new(6, 1);
        tree.fit(&x, &y).unwrap();
        let probabilities = tree.predict_proba(&x).unwrap();
        for (p, actual) in probabilities.iter().zip(y.iter()) {
            assert!((p - actual).abs() < 1e-9, "pure leaves on separable data");
        }
    }

    #[test]
    fn test_random_forest_fit_predict() {
        let (x, y, w) = separable_data();
        let mut model = RandomForest::new().with_n_trees(25);
        model.fit(&x, &y, &w).unwrap();

        let probabilities = model.predict_proba(&x).unwrap();
        assert!(probabilities.iter().all(|&p| (0.0..=1.0).contains(&p)));
        let predictions = model.predict(&x).unwrap();
        assert_eq!(accuracy(&predictions, &y), 1.0);
    }

    #[test]
    fn test_random_forest_is_deterministic() {
        let (x, y, w) = separable_data();
        let probe = Array2::from_shape_vec((1, 2), vec![5.0, 20.0]).unwrap();

        let mut a = RandomForest::new().with_n_trees(25);
        a.fit(&x, &y, &w).unwrap();
        let mut b = RandomForest::new().with_n_trees(25);
        b.fit(&x, &y, &w).unwrap();
        assert_eq!(a.predict_proba(&probe).unwrap(), b.predict_proba(&probe).unwrap());
    }

    #[test]
    fn test_random_forest_weighting_shifts_votes() {
        // Same rows, contradictory labels: whichever copy carries the
        // weight should dominate the bootstrap and the vote.
        let x = Array2::from_shape_vec((4, 1), vec![5.0, 5.0, 5.0, 5.0]).unwrap();
        let y = array![1.0, 1.0, 0.0, 0.0];
        let probe = Array2::from_shape_vec((1, 1), vec![5.0]).unwrap();

        let mut favor_ones = RandomForest::new().with_n_trees(50);
        favor_ones.fit(&x, &y, &array![10.0, 10.0, 0.1, 0.1]).unwrap();
        assert!(favor_ones.predict_proba(&probe).unwrap()[0] > 0.5);

        let mut favor_zeros = RandomForest::new().with_n_trees(50);
        favor_zeros.fit(&x, &y, &array![0.1, 0.1, 10.0, 10.0]).unwrap();
        assert!(favor_zeros.predict_proba(&probe).unwrap()[0] < 0.5);
    }

    #[test]
    fn test_train_test_split_deterministic_partition() {
        let (x, y, w) = separable_data();
        let a = train_test_split(&x, &y, &w, 0.2, 42).unwrap();
        let b = train_test_split(&x, &y, &w, 0.2, 42).unwrap();
        assert_eq!(a.x_train, b.x_train);
        assert_eq!(a.x_test, b.x_test);
        assert_eq!(a.x_test.nrows(), 2, "ceil(8 * 0.2)");
        assert_eq!(a.x_train.nrows() + a.x_test.nrows(), 8);
        assert_eq!(a.w_train.len(), a.x_train.nrows());
    }

    #[test]
    fn test_accuracy_counts_matches() {
        let predictions = array![1.0, 0.0, 1.0, 0.0];
        let actuals = array![1.0, 1.0, 1.0, 0.0];
        assert!((accuracy(&predictions, &actuals) - 0.75).abs() < 1e-12);
    }
}
