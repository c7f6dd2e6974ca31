//! Evaluation metrics

use ndarray::Array1;
use std::fmt;

/// Prediction counts from one evaluation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalMetrics {
    pub true_wins: usize,
    pub true_losses: usize,
    pub false_wins: usize,
    pub false_losses: usize,
}

impl EvalMetrics {
    pub fn from_predictions(predicted: &Array1<bool>, actual: &Array1<bool>) -> Self {
        assert_eq!(predicted.len(), actual.len());

        let mut metrics = EvalMetrics::default();
        for (&pred, &act) in predicted.iter().zip(actual.iter()) {
            match (pred, act) {
                (true, true) => metrics.true_wins += 1,
                (false, false) => metrics.true_losses += 1,
                (true, false) => metrics.false_wins += 1,
                (false, true) => metrics.false_losses += 1,
            }
        }
        metrics
    }

    pub fn total(&self) -> usize {
        self.true_wins + self.true_losses + self.false_wins + self.false_losses
    }

    pub fn correct(&self) -> usize {
        self.true_wins + self.true_losses
    }

    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct() as f64 / self.total() as f64
        }
    }

    /// Merge counts from another evaluation
    pub fn merge(&mut self, other: &EvalMetrics) {
        self.true_wins += other.true_wins;
        self.true_losses += other.true_losses;
        self.false_wins += other.false_wins;
        self.false_losses += other.false_losses;
    }
}

impl fmt::Display for EvalMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy: {:.2}% ({}/{}) | W: {}+{} | L: {}+{}",
            self.accuracy() * 100.0,
            self.correct(),
            self.total(),
            self.true_wins,
            self.false_wins,
            self.true_losses,
            self.false_losses
        )
    }
}

/// Per-fold accuracies from a cross-validation run
#[derive(Debug, Clone)]
pub struct CvReport {
    pub fold_metrics: Vec<EvalMetrics>,
}

impl CvReport {
    pub fn fold_accuracies(&self) -> Vec<f64> {
        self.fold_metrics.iter().map(|m| m.accuracy()).collect()
    }

    pub fn mean_accuracy(&self) -> f64 {
        if self.fold_metrics.is_empty() {
            return 0.0;
        }
        let accuracies = self.fold_accuracies();
        accuracies.iter().sum::<f64>() / accuracies.len() as f64
    }

    /// Accuracy pooled over every fold's predictions
    pub fn pooled(&self) -> EvalMetrics {
        let mut pooled = EvalMetrics::default();
        for metrics in &self.fold_metrics {
            pooled.merge(metrics);
        }
        pooled
    }
}

impl fmt::Display for CvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let folds: Vec<String> = self
            .fold_accuracies()
            .iter()
            .map(|a| format!("{:.3}", a))
            .collect();
        write!(
            f,
            "mean accuracy {:.3} over {} folds [{}]",
            self.mean_accuracy(),
            self.fold_metrics.len(),
            folds.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_counts_and_accuracy() {
        let predicted = array![true, true, false, false, true];
        let actual = array![true, false, false, true, true];
        let metrics = EvalMetrics::from_predictions(&predicted, &actual);

        assert_eq!(metrics.true_wins, 2);
        assert_eq!(metrics.true_losses, 1);
        assert_eq!(metrics.false_wins, 1);
        assert_eq!(metrics.false_losses, 1);
        assert_eq!(metrics.total(), 5);
        assert_eq!(metrics.correct(), 3);
        assert!((metrics.accuracy() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_accuracy_is_zero() {
        let metrics = EvalMetrics::default();
        assert_eq!(metrics.accuracy(), 0.0);
    }

    #[test]
    fn test_cv_report_mean() {
        let mut a = EvalMetrics::default();
        a.true_wins = 3;
        a.false_wins = 1; // 0.75
        let mut b = EvalMetrics::default();
        b.true_losses = 1;
        b.false_losses = 3; // 0.25
        let report = CvReport {
            fold_metrics: vec![a, b],
        };

        assert!((report.mean_accuracy() - 0.5).abs() < 1e-12);
        assert_eq!(report.pooled().total(), 8);
        assert_eq!(report.pooled().correct(), 4);
    }
}
