//! Summary statistics over a sample window

use serde::{Deserialize, Serialize};

/// Mean, maximum and population variance of a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    /// Mean of squared deviations from the mean (population, not sample)
    pub variance: f64,
}

impl Summary {
    /// Recompute from scratch over `values`. `None` when there are none.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let iter = values.into_iter();

        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        for v in iter.clone() {
            count += 1;
            sum += v;
            max = max.max(v);
        }
        if count == 0 {
            return None;
        }

        let mean = sum / count as f64;
        let variance = iter.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            mean,
            max,
            variance,
        })
    }
}
