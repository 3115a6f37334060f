//! Binary logistic regression fitted with `linfa-logistic`.

use derive_new::new;
use linfa::{traits::Fit, Dataset};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Optimizer settings for [LogisticRegression::fit]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct FitOptions {
    /// Inverse L2 regularization strength
    pub c: f64,

    /// Maximum number of optimizer iterations
    pub max_iter: u64,

    /// Gradient norm at which the optimizer stops
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::new(1.0, 1000, 1e-4)
    }
}

/// A fitted binary logistic regression classifier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct LogisticRegression {
    /// One weight per input feature
    coefficients: Array1<f64>,

    /// The unpenalized bias term
    intercept: f64,
}

impl LogisticRegression {
    /// Build a classifier from known parameters
    pub fn from_parameters(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self::new(coefficients, intercept)
    }

    /// Fit on a dense `(n_samples, n_features)` matrix and 0/1 labels.
    ///
    /// Minimizes `0.5 * |w|^2 + C * sum(log_loss)` with an unpenalized intercept.
    pub fn fit(
        x: &Array2<f64>,
        labels: &[u8],
        options: &FitOptions,
    ) -> Result<Self, ModelError> {
        let n_samples = x.nrows();

        if n_samples == 0 {
            return Err(ModelError::NoSamples);
        }
        if labels.len() != n_samples {
            return Err(ModelError::LabelCount {
                samples: n_samples,
                labels: labels.len(),
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| l > 1) {
            return Err(ModelError::InvalidLabel(label));
        }
        if labels.iter().all(|&l| l == labels[0]) {
            return Err(ModelError::SingleClass);
        }

        let dataset = Dataset::new(x.to_owned(), Array1::from(labels.to_vec()));

        // linfa scales the penalty by alpha against an unscaled loss sum
        let fitted = linfa_logistic::LogisticRegression::default()
            .alpha(1.0 / options.c)
            .with_intercept(true)
            .max_iterations(options.max_iter)
            .gradient_tolerance(options.tolerance)
            .fit(&dataset)?;

        let mut coefficients = fitted.params().to_owned();
        let mut intercept = fitted.intercept();

        // linfa picks its positive class by frequency; orient so label 1 is positive
        if fitted.labels().pos.class == 0 {
            coefficients.mapv_inplace(|w| -w);
            intercept = -intercept;
        }

        log::debug!(
            "Fitted {} coefficients on {} samples (intercept {:.6})",
            coefficients.len(),
            n_samples,
            intercept
        );

        Ok(Self::new(coefficients, intercept))
    }

    /// The number of input features the classifier expects
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// The fitted feature weights
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    /// The fitted bias term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The signed distance from the decision boundary
    pub fn decision_function(&self, features: ArrayView1<'_, f64>) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: features.len(),
            });
        }

        Ok(self.coefficients.dot(&features) + self.intercept)
    }

    /// Predict the class label, 1 only when the decision value is strictly positive
    pub fn predict(&self, features: ArrayView1<'_, f64>) -> Result<u8, ModelError> {
        Ok(u8::from(self.decision_function(features)? > 0.0))
    }

    /// Class probabilities as `[p(0), p(1)]`
    pub fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2], ModelError> {
        let positive = sigmoid(self.decision_function(features)?);

        Ok([1.0 - positive, positive])
    }

    /// Predict labels for every row of a matrix
    pub fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<u8>, ModelError> {
        x.axis_iter(Axis(0)).map(|row| self.predict(row)).collect()
    }
}

/// Fraction of predictions that match the expected labels
pub fn accuracy(predicted: &[u8], expected: &[u8]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }

    let correct = predicted
        .iter()
        .zip(expected)
        .filter(|(p, e)| p == e)
        .count();

    correct as f64 / expected.len() as f64
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// A feature vector's length does not match the fitted coefficients
    #[error("feature dimension mismatch: model expects {expected}, got {found}")]
    DimensionMismatch {
        /// Coefficient count
        expected: usize,
        /// Feature vector length
        found: usize,
    },

    /// Fitting was attempted with no rows
    #[error("cannot fit on an empty training set")]
    NoSamples,

    /// Rows and labels disagree in length
    #[error("{samples} samples but {labels} labels")]
    LabelCount {
        /// Rows in the matrix
        samples: usize,
        /// Labels given
        labels: usize,
    },

    /// A label outside of {0, 1}
    #[error("invalid label {0}; expected 0 or 1")]
    InvalidLabel(u8),

    /// Only one class is present in the training labels
    #[error("training labels contain a single class")]
    SingleClass,

    /// The optimizer rejected the problem or failed to run
    #[error("unable to fit classifier: {0}")]
    Fit(#[from] linfa_logistic::error::Error),
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use pretty_assertions::assert_eq;

    use super::*;

    fn separable() -> (Array2<f64>, Vec<u8>) {
        let x = array![
            [1.0, 0.0],
            [0.9, 0.1],
            [0.8, 0.0],
            [0.0, 1.0],
            [0.1, 0.9],
            [0.0, 0.8],
        ];
        let y = vec![1, 1, 1, 0, 0, 0];

        (x, y)
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &FitOptions::default()).unwrap();

        assert_eq!(model.predict_batch(&x).unwrap(), y);
        assert!(model.coefficients()[0] > 0.0);
        assert!(model.coefficients()[1] < 0.0);
    }

    #[test]
    fn test_fit_orients_label_one_as_positive() {
        // Negatives outnumber positives
        let x = array![[0.0, 1.0], [1.0, 0.0], [0.1, 0.9], [0.0, 0.8], [0.9, 0.1], [0.2, 1.0]];
        let y = vec![0, 1, 0, 0, 1, 0];

        let model = LogisticRegression::fit(&x, &y, &FitOptions::new(100.0, 1000, 1e-6)).unwrap();

        assert_eq!(model.predict_batch(&x).unwrap(), y);
        assert!(model.coefficients()[0] > 0.0);
        assert!(model.predict_proba(x.row(1)).unwrap()[1] > 0.5);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &FitOptions::default()).unwrap();

        for row in x.axis_iter(Axis(0)) {
            let [negative, positive] = model.predict_proba(row).unwrap();
            assert!((negative + positive - 1.0).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&positive));
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();

        let first = LogisticRegression::fit(&x, &y, &FitOptions::default()).unwrap();
        let second = LogisticRegression::fit(&x, &y, &FitOptions::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_decision_predicts_negative() {
        let model = LogisticRegression::from_parameters(array![1.0, -1.0], 0.0);
        let features = array![0.5, 0.5];

        assert_eq!(model.predict(features.view()).unwrap(), 0);
        assert_eq!(model.predict_proba(features.view()).unwrap(), [0.5, 0.5]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = LogisticRegression::from_parameters(array![1.0, -1.0], 0.0);
        let features = array![1.0, 0.0, 0.0];

        assert!(matches!(
            model.predict(features.view()),
            Err(ModelError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_fit_rejects_single_class() {
        let x = array![[1.0], [2.0]];

        assert!(matches!(
            LogisticRegression::fit(&x, &[1, 1], &FitOptions::default()),
            Err(ModelError::SingleClass)
        ));
    }

    #[test]
    fn test_sigmoid_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}
