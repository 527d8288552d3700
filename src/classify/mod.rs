//! Supervised classifiers over sparse feature vectors
//!
//! A datum is a [`Counter`] from feature keys to values. Both classifiers
//! pick their hyperparameter (MIRA's C, Naive Bayes' k) from a candidate
//! grid by accuracy on held-out validation data.

pub mod mira;
pub mod naive_bayes;
pub mod tuning;

use std::{fmt::Debug, hash::Hash};

use crate::{
    counter::Counter,
    error::{Error, Result},
};

pub use mira::MiraClassifier;
pub use naive_bayes::NaiveBayesClassifier;

/// Sparse feature vector
pub type Datum<F> = Counter<F>;

/// Trainable label predictor
pub trait Classifier<F: Eq + Hash, L> {
    /// Fit the model and return the selected hyperparameter value.
    ///
    /// # Errors
    ///
    /// Returns an error when data and label sequences differ in length,
    /// the training set is empty, or a training label is not legal.
    fn train(
        &mut self,
        training_data: &[Datum<F>],
        training_labels: &[L],
        validation_data: &[Datum<F>],
        validation_labels: &[L],
    ) -> Result<f64>;

    /// Predicted label for each datum, in order
    fn classify(&self, data: &[Datum<F>]) -> Vec<L>;

    fn legal_labels(&self) -> &[L];

    fn name(&self) -> &str;
}

/// Fraction of guesses equal to the corresponding label; `0.0` for no guesses
pub fn accuracy<L: PartialEq>(guesses: &[L], labels: &[L]) -> f64 {
    if guesses.is_empty() {
        return 0.0;
    }
    let correct = guesses
        .iter()
        .zip(labels)
        .filter(|(guess, label)| guess == label)
        .count();
    correct as f64 / guesses.len() as f64
}

pub(crate) fn label_index<L: PartialEq + Debug>(legal_labels: &[L], label: &L) -> Result<usize> {
    legal_labels
        .iter()
        .position(|candidate| candidate == label)
        .ok_or_else(|| Error::UnknownLabel {
            label: format!("{label:?}"),
        })
}

/// Check shapes and map training labels to indices into `legal_labels`
pub(crate) fn prepare_training<F: Eq + Hash, L: PartialEq + Debug>(
    legal_labels: &[L],
    training_data: &[Datum<F>],
    training_labels: &[L],
    validation_data: &[Datum<F>],
    validation_labels: &[L],
) -> Result<Vec<usize>> {
    if training_data.len() != training_labels.len() {
        return Err(Error::LengthMismatch {
            data: training_data.len(),
            labels: training_labels.len(),
        });
    }
    if validation_data.len() != validation_labels.len() {
        return Err(Error::LengthMismatch {
            data: validation_data.len(),
            labels: validation_labels.len(),
        });
    }
    if training_data.is_empty() {
        return Err(Error::EmptyTrainingSet);
    }
    training_labels
        .iter()
        .map(|label| label_index(legal_labels, label))
        .collect()
}

/// Index of the highest score, first index winning ties
pub(crate) fn best_index(scores: impl IntoIterator<Item = f64>) -> usize {
    let scores: Counter<usize> = scores.into_iter().enumerate().collect();
    let indices: Vec<usize> = (0..scores.len()).collect();
    scores.arg_max_over(&indices).copied().unwrap_or(0)
}

pub(crate) fn require_labels<L>(legal_labels: &[L]) -> Result<()> {
    if legal_labels.is_empty() {
        return Err(Error::InvalidConfiguration {
            message: "classifier needs at least one legal label".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_matches() {
        assert_eq!(accuracy(&[1, 2, 3, 4], &[1, 0, 3, 0]), 0.5);
        assert_eq!(accuracy::<u8>(&[], &[]), 0.0);
    }

    #[test]
    fn best_index_prefers_first_maximum() {
        assert_eq!(best_index([1.0, 3.0, 3.0]), 1);
        assert_eq!(best_index([f64::NEG_INFINITY, f64::NEG_INFINITY]), 0);
        assert_eq!(best_index([-2.0, -1.0]), 1);
    }

    #[test]
    fn prepare_training_rejects_bad_shapes() {
        let data = vec![Datum::<&str>::new()];
        let labels = ["a", "b"];
        assert!(matches!(
            prepare_training(&labels, &data, &["a", "a"], &[], &[]),
            Err(Error::LengthMismatch { data: 1, labels: 2 })
        ));
        assert!(matches!(
            prepare_training(&labels, &data[..0], &[], &data[..0], &[]),
            Err(Error::EmptyTrainingSet)
        ));
        assert!(matches!(
            prepare_training(&labels, &data, &["z"], &[], &[]),
            Err(Error::UnknownLabel { .. })
        ));
        assert_eq!(prepare_training(&labels, &data, &["b"], &[], &[]).unwrap(), vec![1]);
    }
}
