//! Support-vector classification over shot-grid features
//!
//! The SVM itself comes from linfa; this module only drives fit and
//! predict and folds the results into metrics.

use crate::data::dataset::{Split, TeamDataset};
use crate::training::metrics::{CvReport, EvalMetrics};
use crate::{HoopsError, Result, TrainingConfig};
use linfa::dataset::Dataset;
use linfa::traits::{Fit, Predict};
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use std::fmt;
use std::str::FromStr;

/// Kernel for the support-vector classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Linear,
    Poly,
    Rbf,
}

impl Kernel {
    pub const ALL: [Kernel; 3] = [Kernel::Linear, Kernel::Poly, Kernel::Rbf];
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Linear => write!(f, "linear"),
            Kernel::Poly => write!(f, "poly"),
            Kernel::Rbf => write!(f, "rbf"),
        }
    }
}

impl FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Kernel::Linear),
            "poly" | "polynomial" => Ok(Kernel::Poly),
            "rbf" | "gaussian" => Ok(Kernel::Rbf),
            _ => Err(format!("Unknown kernel: {}. Use linear, poly, or rbf.", s)),
        }
    }
}

/// A fitted win/loss classifier
pub struct SvmClassifier {
    model: Svm<f64, bool>,
    kernel: Kernel,
}

impl SvmClassifier {
    /// Fit on a training design matrix and target vector
    pub fn fit(
        x_train: Array2<f64>,
        y_train: Array1<bool>,
        kernel: Kernel,
        config: &TrainingConfig,
    ) -> Result<Self> {
        if x_train.nrows() == 0 {
            return Err(HoopsError::Training("empty training set".to_string()));
        }

        let train = Dataset::new(x_train, y_train);
        let params = Svm::<f64, bool>::params().pos_neg_weights(1.0, 1.0);
        let params = match kernel {
            Kernel::Linear => params.linear_kernel(),
            Kernel::Poly => {
                params.polynomial_kernel(config.poly_constant, config.poly_degree as f64)
            }
            Kernel::Rbf => params.gaussian_kernel(config.rbf_eps),
        };

        let model = params
            .fit(&train)
            .map_err(|e| HoopsError::Training(e.to_string()))?;

        Ok(SvmClassifier { model, kernel })
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn predict(&self, x: &Array2<f64>) -> Array1<bool> {
        self.model.predict(x)
    }

    /// Predict a held-out set and count the results
    pub fn evaluate(&self, x_test: &Array2<f64>, y_test: &Array1<bool>) -> EvalMetrics {
        let predicted = self.predict(x_test);
        EvalMetrics::from_predictions(&predicted, y_test)
    }
}

/// Fit on the split's training half, evaluate on its test half
pub fn train_and_evaluate(
    split: &Split,
    kernel: Kernel,
    config: &TrainingConfig,
) -> Result<EvalMetrics> {
    let classifier = SvmClassifier::fit(
        split.x_train.clone(),
        split.y_train.clone(),
        kernel,
        config,
    )?;
    Ok(classifier.evaluate(&split.x_test, &split.y_test))
}

/// K-fold cross-validated accuracy
pub fn cross_validate(
    dataset: &TeamDataset,
    kernel: Kernel,
    folds: usize,
    seed: Option<u64>,
    config: &TrainingConfig,
) -> Result<CvReport> {
    let splits = dataset.kfold(folds, true, seed)?;

    let mut fold_metrics = Vec::with_capacity(splits.len());
    for (i, split) in splits.iter().enumerate() {
        let metrics = train_and_evaluate(split, kernel, config)?;
        log::info!("Fold {}/{}: {}", i + 1, splits.len(), metrics);
        fold_metrics.push(metrics);
    }

    Ok(CvReport { fold_metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn config() -> TrainingConfig {
        TrainingConfig {
            test_size: 0.25,
            folds: 3,
            seed: Some(1),
            rbf_eps: 10.0,
            poly_degree: 3,
            poly_constant: 1.0,
        }
    }

    /// Two well-separated clusters in the plane
    fn separable() -> (Array2<f64>, Array1<bool>) {
        let x = array![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [10.0, 10.0],
            [11.0, 10.0],
            [10.0, 11.0],
            [11.0, 11.0],
        ];
        let y = array![true, true, true, true, false, false, false, false];
        (x, y)
    }

    #[test]
    fn test_linear_kernel_separates_clusters() {
        let (x, y) = separable();
        let classifier = SvmClassifier::fit(x.clone(), y.clone(), Kernel::Linear, &config()).unwrap();
        let metrics = classifier.evaluate(&x, &y);
        assert!(metrics.accuracy() > 0.8, "got {}", metrics);
    }

    #[test]
    fn test_rbf_kernel_separates_clusters() {
        let (x, y) = separable();
        let classifier = SvmClassifier::fit(x.clone(), y.clone(), Kernel::Rbf, &config()).unwrap();
        let metrics = classifier.evaluate(&x, &y);
        assert!(metrics.accuracy() > 0.8, "got {}", metrics);
    }

    #[test]
    fn test_empty_training_set_is_an_error() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::from_vec(vec![]);
        assert!(SvmClassifier::fit(x, y, Kernel::Linear, &config()).is_err());
    }

    #[test]
    fn test_kernel_parsing() {
        assert_eq!("linear".parse::<Kernel>().unwrap(), Kernel::Linear);
        assert_eq!("POLY".parse::<Kernel>().unwrap(), Kernel::Poly);
        assert_eq!("gaussian".parse::<Kernel>().unwrap(), Kernel::Rbf);
        assert!("sigmoid".parse::<Kernel>().is_err());
    }
}
