use crate::domain::ports::Regressor;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{self, Validate};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    #[default]
    Uniform,
    /// Inverse-distance weights.
    Distance,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Minkowski { p: f64 },
}

impl DistanceMetric {
    fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
        match *self {
            DistanceMetric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            DistanceMetric::Manhattan => diffs.sum(),
            DistanceMetric::Minkowski { p } => diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p),
        }
    }
}

/// k-nearest-neighbors regressor restored from an artifact.
///
/// Stores its training set verbatim; a prediction is the mean (or
/// inverse-distance weighted mean) of the targets of the `n_neighbors`
/// closest samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnRegressor {
    n_neighbors: usize,
    #[serde(default)]
    weights: Weighting,
    #[serde(default)]
    metric: DistanceMetric,
    samples: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl KnnRegressor {
    pub fn new(n_neighbors: usize, samples: Vec<Vec<f64>>, targets: Vec<f64>) -> Self {
        Self {
            n_neighbors,
            weights: Weighting::Uniform,
            metric: DistanceMetric::Euclidean,
            samples,
            targets,
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: Weighting) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn n_features(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    fn sample_matrix(&self) -> Result<Array2<f64>> {
        let flat: Vec<f64> = self.samples.iter().flatten().copied().collect();
        Array2::from_shape_vec((self.samples.len(), self.n_features()), flat)
            .map_err(|e| PredictError::invalid_artifact(format!("samples: {e}")))
    }

    fn predict_one(&self, samples: &Array2<f64>, row: ArrayView1<'_, f64>) -> f64 {
        let mut neighbors: Vec<(f64, f64)> = samples
            .axis_iter(Axis(0))
            .zip(self.targets.iter())
            .map(|(sample, &target)| (self.metric.distance(row, sample), target))
            .collect();

        // Stable sort keeps training order among equidistant samples.
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));
        let nearest = &neighbors[..self.n_neighbors];

        match self.weights {
            Weighting::Uniform => {
                nearest.iter().map(|(_, t)| t).sum::<f64>() / nearest.len() as f64
            }
            Weighting::Distance => {
                let exact: Vec<f64> = nearest
                    .iter()
                    .filter(|(d, _)| *d == 0.0)
                    .map(|(_, t)| *t)
                    .collect();
                if !exact.is_empty() {
                    return exact.iter().sum::<f64>() / exact.len() as f64;
                }

                let (weighted, total) = nearest
                    .iter()
                    .fold((0.0, 0.0), |(acc, total), (d, t)| (acc + t / d, total + 1.0 / d));
                weighted / total
            }
        }
    }
}

impl Validate for KnnRegressor {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("n_neighbors", self.n_neighbors, 1)?;

        if self.samples.is_empty() {
            return Err(PredictError::invalid_artifact(
                "k-nearest neighbors artifact has no samples",
            ));
        }
        validation::validate_positive_number("sample width", self.n_features(), 1)?;
        validation::validate_rectangular("samples", &self.samples, self.n_features())?;

        if self.targets.len() != self.samples.len() {
            return Err(PredictError::invalid_artifact(format!(
                "found {} targets for {} samples",
                self.targets.len(),
                self.samples.len()
            )));
        }

        if let DistanceMetric::Minkowski { p } = self.metric {
            if p.is_nan() || p < 1.0 {
                return Err(PredictError::invalid_artifact(format!(
                    "minkowski p must be >= 1, got {p}"
                )));
            }
        }

        Ok(())
    }
}

impl Regressor for KnnRegressor {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        let n_features = self.n_features();
        if x.ncols() != n_features {
            return Err(PredictError::prediction(format!(
                "X has {} features, but the k-nearest neighbors model is expecting {} features as input",
                x.ncols(),
                n_features
            )));
        }

        validation::validate_finite_input(x)?;

        if self.n_neighbors > self.samples.len() {
            return Err(PredictError::prediction(format!(
                "Expected n_neighbors <= n_samples_fit, but n_samples_fit = {}, n_neighbors = {}",
                self.samples.len(),
                self.n_neighbors
            )));
        }

        let samples = self.sample_matrix()?;
        tracing::debug!(
            n_neighbors = self.n_neighbors,
            n_samples = self.samples.len(),
            "running k-nearest neighbors prediction"
        );

        Ok(x
            .axis_iter(Axis(0))
            .map(|row| self.predict_one(&samples, row))
            .collect())
    }
}
