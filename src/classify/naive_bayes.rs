//! Naive Bayes over binary features with Laplace smoothing
//!
//! Inference works in log space:
//!
//! ```text
//! log P(y, x) = log P(y) + Σ_f log P(f = x_f | y)
//! ```
//!
//! Factors whose smoothed probability is not positive (possible only with
//! `k = 0`) contribute nothing to the sum rather than `-inf`. This keeps
//! unseen feature/label combinations from vetoing a label outright, at the
//! price of the result no longer being an exact log-joint for those data.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use tracing::debug;

use super::{
    Classifier, Datum, accuracy, best_index, label_index, prepare_training, require_labels,
    tuning::select_by_validation,
};
use crate::{
    config::{NaiveBayesConfig, valid_smoothing, validate_grid},
    counter::Counter,
    error::Result,
};

/// Number of features reported by [`NaiveBayesClassifier::find_high_odds_features`]
const HIGH_ODDS_FEATURES: usize = 100;

/// Binary value of a feature: any non-zero value counts as "on"
fn binary(value: f64) -> usize {
    usize::from(value != 0.0)
}

/// Per-feature statistics indexed `[feature value][label index]`
type FeatureTable = [Vec<f64>; 2];

#[derive(Debug, Clone)]
struct Model<F: Eq + Hash> {
    prior: Vec<f64>,
    conditionals: HashMap<F, FeatureTable>,
}

impl<F: Eq + Hash> Model<F> {
    fn log_joint(&self, datum: &Datum<F>) -> Vec<f64> {
        (0..self.prior.len())
            .map(|label| {
                let evidence: f64 = datum
                    .iter()
                    .filter_map(|(feature, value)| {
                        let probability = self.conditionals.get(feature)?[binary(value)][label];
                        (probability > 0.0).then(|| probability.ln())
                    })
                    .sum();
                self.prior[label].ln() + evidence
            })
            .collect()
    }

    fn predict(&self, datum: &Datum<F>) -> usize {
        best_index(self.log_joint(datum))
    }
}

/// Raw counts gathered from the training set
struct Counts<F: Eq + Hash> {
    /// Occurrences of `(feature = value, label)`
    by_value: HashMap<F, FeatureTable>,
    /// Training examples of each label in which the feature was observed
    observed: HashMap<F, Vec<f64>>,
}

impl<F: Clone + Eq + Hash> Counts<F> {
    fn gather(data: &[Datum<F>], labels: &[usize], label_count: usize) -> Self {
        let mut by_value: HashMap<F, FeatureTable> = HashMap::new();
        let mut observed: HashMap<F, Vec<f64>> = HashMap::new();

        for (datum, &label) in data.iter().zip(labels) {
            for (feature, value) in datum.iter() {
                by_value
                    .entry(feature.clone())
                    .or_insert_with(|| [vec![0.0; label_count], vec![0.0; label_count]])
                    [binary(value)][label] += 1.0;
                observed
                    .entry(feature.clone())
                    .or_insert_with(|| vec![0.0; label_count])[label] += 1.0;
            }
        }

        Self { by_value, observed }
    }

    /// `(count(f = v, y) + k) / (count(f observed, y) + k)`, zero when the
    /// denominator vanishes
    fn smoothed(&self, k: f64) -> HashMap<F, FeatureTable> {
        self.by_value
            .iter()
            .map(|(feature, table)| {
                let observed = &self.observed[feature];
                let smooth = |counts: &Vec<f64>| -> Vec<f64> {
                    counts
                        .iter()
                        .zip(observed)
                        .map(|(count, total)| {
                            let denominator = total + k;
                            if denominator > 0.0 {
                                (count + k) / denominator
                            } else {
                                0.0
                            }
                        })
                        .collect()
                };
                (feature.clone(), [smooth(&table[0]), smooth(&table[1])])
            })
            .collect()
    }
}

/// Generative classifier with a label prior and per-feature conditionals
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier<F: Eq + Hash, L> {
    legal_labels: Vec<L>,
    config: NaiveBayesConfig,
    k: f64,
    model: Model<F>,
}

impl<F, L> NaiveBayesClassifier<F, L>
where
    F: Clone + Eq + Hash,
    L: Clone + PartialEq + Debug,
{
    /// Create an untrained classifier.
    ///
    /// # Errors
    ///
    /// Fails if `legal_labels` is empty or the config does not validate.
    pub fn new(legal_labels: Vec<L>, config: NaiveBayesConfig) -> Result<Self> {
        require_labels(&legal_labels)?;
        config.validate()?;
        let k = config.k;
        let model = Model {
            prior: vec![0.0; legal_labels.len()],
            conditionals: HashMap::new(),
        };
        Ok(Self {
            legal_labels,
            config,
            k,
            model,
        })
    }

    /// Fix the smoothing constant used by the next untuned training run.
    ///
    /// # Errors
    ///
    /// Rejects a `k` that is negative or not finite, leaving the classifier unchanged.
    pub fn set_smoothing(&mut self, k: f64) -> Result<()> {
        validate_grid("k", &[k], valid_smoothing)?;
        self.config.k = k;
        self.k = k;
        Ok(())
    }

    /// Smoothing constant of the current model
    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// P(label), zero for unknown labels
    pub fn prior(&self, label: &L) -> f64 {
        label_index(&self.legal_labels, label)
            .map(|index| self.model.prior[index])
            .unwrap_or(0.0)
    }

    /// Smoothed P(feature = value | label), `None` for unseen features or unknown labels
    pub fn conditional(&self, feature: &F, value: bool, label: &L) -> Option<f64> {
        let index = label_index(&self.legal_labels, label).ok()?;
        let table = self.model.conditionals.get(feature)?;
        Some(table[usize::from(value)][index])
    }

    /// Features seen during training
    pub fn features(&self) -> impl Iterator<Item = &F> {
        self.model.conditionals.keys()
    }

    /// `log P(label, datum)` for every legal label, in label order
    pub fn calculate_log_joint_probabilities(&self, datum: &Datum<F>) -> Vec<(L, f64)> {
        self.legal_labels
            .iter()
            .cloned()
            .zip(self.model.log_joint(datum))
            .collect()
    }

    /// Posterior distribution over labels, normalized to sum to one
    pub fn posterior_probabilities(&self, datum: &Datum<F>) -> Vec<(L, f64)> {
        let log_joint = self.model.log_joint(datum);
        let max = log_joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let weights: Vec<f64> = if max.is_finite() {
            log_joint.iter().map(|value| (value - max).exp()).collect()
        } else {
            vec![1.0; log_joint.len()]
        };
        let total: f64 = weights.iter().sum();

        self.legal_labels
            .iter()
            .cloned()
            .zip(weights.into_iter().map(|weight| weight / total))
            .collect()
    }

    /// The features with the smallest odds ratio
    /// `P(feature = 1 | label1) / P(feature = 1 | label2)`, at most 100, ascending.
    ///
    /// Features with a zero conditional under `label2` have no defined ratio
    /// and are left out.
    pub fn find_high_odds_features(&self, label1: &L, label2: &L) -> Result<Vec<(F, f64)>> {
        let first = label_index(&self.legal_labels, label1)?;
        let second = label_index(&self.legal_labels, label2)?;

        let mut odds: Vec<(F, f64)> = Vec::new();
        let mut skipped = 0usize;
        for (feature, table) in &self.model.conditionals {
            let denominator = table[1][second];
            if denominator <= 0.0 {
                skipped += 1;
                continue;
            }
            odds.push((feature.clone(), table[1][first] / denominator));
        }
        if skipped > 0 {
            debug!(skipped, "features without a defined odds ratio");
        }

        odds.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        odds.truncate(HIGH_ODDS_FEATURES);
        Ok(odds)
    }

    fn classify_with(&self, model: &Model<F>, data: &[Datum<F>]) -> Vec<L> {
        data.iter()
            .map(|datum| self.legal_labels[model.predict(datum)].clone())
            .collect()
    }
}

impl<F, L> Classifier<F, L> for NaiveBayesClassifier<F, L>
where
    F: Clone + Eq + Hash,
    L: Clone + PartialEq + Debug,
{
    /// Estimate the prior and smoothed conditionals, choosing k by
    /// validation accuracy when tuning is enabled.
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
        let label_count = self.legal_labels.len();

        let mut frequencies: Counter<usize> = Counter::new();
        for &label in &label_indices {
            frequencies.increment(label, 1.0);
        }
        frequencies.normalize();
        let prior: Vec<f64> = (0..label_count)
            .map(|label| frequencies.get(&label))
            .collect();

        let counts = Counts::gather(training_data, &label_indices, label_count);

        let selection = select_by_validation("k", &self.config.candidates(), |k| {
            let model = Model {
                prior: prior.clone(),
                conditionals: counts.smoothed(k),
            };
            let guesses = self.classify_with(&model, validation_data);
            let score = accuracy(&guesses, validation_labels);
            (model, score)
        })?;

        self.model = selection.model;
        self.k = selection.value;
        Ok(selection.value)
    }

    fn classify(&self, data: &[Datum<F>]) -> Vec<L> {
        self.classify_with(&self.model, data)
    }

    fn legal_labels(&self) -> &[L] {
        &self.legal_labels
    }

    fn name(&self) -> &str {
        "Naive Bayes"
    }
}
