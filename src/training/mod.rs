//! Classifier training and evaluation

pub mod metrics;
pub mod svm;

pub use metrics::{CvReport, EvalMetrics};
pub use svm::{cross_validate, train_and_evaluate, Kernel, SvmClassifier};
