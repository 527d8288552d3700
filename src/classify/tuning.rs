//! Hyperparameter selection by held-out accuracy

use tracing::info;

use crate::error::{Error, Result};

/// Winning candidate of a grid search
#[derive(Debug, Clone)]
pub struct Selection<M> {
    pub value: f64,
    pub model: M,
    pub accuracy: f64,
}

/// Fit one model per grid value and keep the most accurate.
///
/// `fit` returns the trained model and its validation accuracy. Ties keep
/// the earlier candidate.
pub fn select_by_validation<M>(
    parameter: &str,
    grid: &[f64],
    mut fit: impl FnMut(f64) -> (M, f64),
) -> Result<Selection<M>> {
    let mut best: Option<Selection<M>> = None;

    for &value in grid {
        let (model, accuracy) = fit(value);
        info!(parameter, value, accuracy, "evaluated candidate");

        let improves = best
            .as_ref()
            .is_none_or(|current| accuracy > current.accuracy);
        if improves {
            best = Some(Selection {
                value,
                model,
                accuracy,
            });
        }
    }

    best.ok_or_else(|| Error::EmptyCandidateGrid {
        parameter: parameter.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_accurate_candidate() {
        let selection =
            select_by_validation("k", &[1.0, 2.0, 3.0], |k| (k * 10.0, 1.0 - (k - 2.0).abs()))
                .unwrap();
        assert_eq!(selection.value, 2.0);
        assert_eq!(selection.model, 20.0);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let selection = select_by_validation("C", &[0.5, 0.1], |c| (c, 0.75)).unwrap();
        assert_eq!(selection.value, 0.5);
    }

    #[test]
    fn empty_grid_is_an_error() {
        let result = select_by_validation("C", &[], |c| (c, 1.0));
        assert!(matches!(result, Err(Error::EmptyCandidateGrid { .. })));
    }
}
