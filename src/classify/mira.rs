//! MIRA: online max-margin multiclass learner
//!
//! On every mistake the true label's weights move toward the datum and the
//! predicted label's weights move away, by the smallest step that would fix
//! the mistake with unit margin, capped at C:
//!
//! ```text
//! τ = min(C, ((w_pred − w_true) · x + 1) / (2 x · x))
//! w_true += τ x
//! w_pred −= τ x
//! ```

use std::{fmt::Debug, hash::Hash};

use tracing::debug;

use super::{
    Classifier, Datum, accuracy, best_index, label_index, prepare_training, require_labels,
    tuning::select_by_validation,
};
use crate::{config::MiraConfig, counter::Counter, error::Result};

/// Number of features reported by [`MiraClassifier::find_high_weight_features`]
const HIGH_WEIGHT_FEATURES: usize = 100;

/// Multiclass MIRA classifier with one sparse weight vector per label
#[derive(Debug, Clone)]
pub struct MiraClassifier<F: Eq + Hash, L> {
    legal_labels: Vec<L>,
    config: MiraConfig,
    weights: Vec<Counter<F>>,
    c: f64,
}

impl<F, L> MiraClassifier<F, L>
where
    F: Clone + Eq + Hash,
    L: Clone + PartialEq + Debug,
{
    /// Create a classifier with all weights zero.
    ///
    /// # Errors
    ///
    /// Fails if `legal_labels` is empty or the config does not validate.
    pub fn new(legal_labels: Vec<L>, config: MiraConfig) -> Result<Self> {
        require_labels(&legal_labels)?;
        config.validate()?;
        let weights = zero_weights(legal_labels.len());
        let c = config.c;
        Ok(Self {
            legal_labels,
            config,
            weights,
            c,
        })
    }

    /// C used for the current weights
    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn config(&self) -> &MiraConfig {
        &self.config
    }

    pub fn weights(&self, label: &L) -> Option<&Counter<F>> {
        let index = self.legal_labels.iter().position(|l| l == label)?;
        self.weights.get(index)
    }

    /// Reset every label's weights to the zero vector
    pub fn initialize_weights_to_zero(&mut self) {
        self.weights = zero_weights(self.legal_labels.len());
    }

    /// Up to 100 features with the largest `w[label1] - w[label2]`, largest first
    pub fn find_high_weight_features(&self, label1: &L, label2: &L) -> Result<Vec<(F, f64)>> {
        let first = &self.weights[label_index(&self.legal_labels, label1)?];
        let second = &self.weights[label_index(&self.legal_labels, label2)?];

        let mut difference = first.clone();
        difference -= second;

        let mut ranked: Vec<(F, f64)> = difference
            .sorted_by_value()
            .into_iter()
            .map(|(feature, value)| (feature.clone(), value))
            .collect();
        ranked.truncate(HIGH_WEIGHT_FEATURES);
        Ok(ranked)
    }

    fn train_with_c(&self, c: f64, data: &[Datum<F>], labels: &[usize]) -> Vec<Counter<F>> {
        let mut weights = zero_weights(self.legal_labels.len());
        for _ in 0..self.config.max_iterations {
            for (datum, &truth) in data.iter().zip(labels) {
                update(&mut weights, datum, truth, c);
            }
        }
        weights
    }

    fn classify_with(&self, weights: &[Counter<F>], data: &[Datum<F>]) -> Vec<L> {
        data.iter()
            .map(|datum| self.legal_labels[best_label(weights, datum)].clone())
            .collect()
    }
}

fn zero_weights<F: Eq + Hash>(labels: usize) -> Vec<Counter<F>> {
    (0..labels).map(|_| Counter::new()).collect()
}

/// Index of the highest-scoring label, first index winning ties
fn best_label<F: Eq + Hash>(weights: &[Counter<F>], datum: &Datum<F>) -> usize {
    best_index(weights.iter().map(|w| w.dot(datum)))
}

/// Apply one MIRA step for `datum` with true label index `truth`.
///
/// Returns the step size taken, or `None` when the datum was already
/// classified correctly or is the zero vector.
fn update<F: Clone + Eq + Hash>(
    weights: &mut [Counter<F>],
    datum: &Datum<F>,
    truth: usize,
    c: f64,
) -> Option<f64> {
    let predicted = best_label(weights, datum);
    if predicted == truth {
        return None;
    }

    let norm_squared = datum.norm_squared();
    if norm_squared == 0.0 {
        debug!("skipping MIRA update for zero feature vector");
        return None;
    }

    let margin = weights[predicted].dot(datum) - weights[truth].dot(datum);
    let tau = c.min((margin + 1.0) / (2.0 * norm_squared));

    let step = datum.scaled(tau);
    weights[truth] += &step;
    weights[predicted] -= &step;
    Some(tau)
}

impl<F, L> Classifier<F, L> for MiraClassifier<F, L>
where
    F: Clone + Eq + Hash,
    L: Clone + PartialEq + Debug,
{
    /// Train once per candidate C and keep the weights with the best
    /// validation accuracy. Each candidate starts from zero weights.
    fn train(
        &mut self,
        training_data: &[Datum<F>],
        training_labels: &[L],
        validation_data: &[Datum<F>],
        validation_labels: &[L],
    ) -> Result<f64> {
        let label_indices = prepare_training(
            &self.legal_labels,
            training_data,
            training_labels,
            validation_data,
            validation_labels,
        )?;

        let selection = select_by_validation("C", &self.config.candidates(), |c| {
            let weights = self.train_with_c(c, training_data, &label_indices);
            let guesses = self.classify_with(&weights, validation_data);
            let score = accuracy(&guesses, validation_labels);
            (weights, score)
        })?;

        self.weights = selection.model;
        self.c = selection.value;
        Ok(selection.value)
    }

    fn classify(&self, data: &[Datum<F>]) -> Vec<L> {
        self.classify_with(&self.weights, data)
    }

    fn legal_labels(&self) -> &[L] {
        &self.legal_labels
    }

    fn name(&self) -> &str {
        "MIRA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn point(x: f64, y: f64) -> Datum<&'static str> {
        [("x", x), ("y", y)].into_iter().collect()
    }

    #[test]
    fn update_step_never_exceeds_c() {
        let mut weights = zero_weights(2);
        weights[0].set("x", 5.0);
        let datum = point(1.0, 0.0);
        // Unconstrained step would be (5 + 1) / 2 = 3.
        let tau = update(&mut weights, &datum, 1, 0.25).unwrap();
        assert_eq!(tau, 0.25);
        assert_eq!(weights[1].get(&"x"), 0.25);
        assert_eq!(weights[0].get(&"x"), 4.75);
    }

    #[test]
    fn uncapped_step_fixes_the_mistake() {
        let mut weights = zero_weights(2);
        let datum = point(2.0, 1.0);
        let tau = update(&mut weights, &datum, 1, 10.0).unwrap();
        assert!((tau - 0.1).abs() < 1e-12);
        assert_eq!(best_label(&weights, &datum), 1);
        assert_eq!(update(&mut weights, &datum, 1, 10.0), None);
    }

    #[test]
    fn zero_vector_is_skipped() {
        let mut weights = zero_weights(2);
        let datum = point(0.0, 0.0);
        assert_eq!(update(&mut weights, &datum, 1, 1.0), None);
        assert!(weights.iter().all(|w| w.total() == 0.0));
    }

    #[test]
    fn high_weight_features_rank_by_difference() {
        let mut mira = MiraClassifier::new(vec!["a", "b"], MiraConfig::default()).unwrap();
        mira.weights[0] = [("f1", 1.0), ("f2", 3.0)].into_iter().collect();
        mira.weights[1] = [("f1", 2.0), ("f3", -4.0)].into_iter().collect();

        let ranked = mira.find_high_weight_features(&"a", &"b").unwrap();
        let names: Vec<_> = ranked.iter().map(|(f, _)| *f).collect();
        assert_eq!(names, vec!["f3", "f2", "f1"]);
        assert!(matches!(
            mira.find_high_weight_features(&"a", &"z"),
            Err(Error::UnknownLabel { .. })
        ));
    }

    #[test]
    fn empty_label_set_is_rejected() {
        let result = MiraClassifier::<&str, &str>::new(Vec::new(), MiraConfig::default());
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }
}
