use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Column order the regression models were trained with.
pub const FEATURE_ORDER: [&str; 2] = ["radius", "height"];

/// One observation for the surface-area models.
///
/// Fields are named so callers cannot swap them; `to_row` is the only place
/// that decides their column position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFeatures {
    pub radius: f64,
    pub height: f64,
}

impl SurfaceFeatures {
    pub fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }

    /// A 1x2 matrix laid out as `FEATURE_ORDER`.
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_ORDER.len()), |(_, col)| match col {
            0 => self.radius,
            _ => self.height,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    Radius,
    Height,
}

impl FeatureField {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureField::Radius => FEATURE_ORDER[0],
            FeatureField::Height => FEATURE_ORDER[1],
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            FeatureField::Radius => "Enter the radius: ",
            FeatureField::Height => "Enter the height: ",
        }
    }
}

/// The model families a runner can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Knn,
    RandomForest,
}

impl ModelFamily {
    /// Artifact filename each family's runner loads from the working directory.
    pub fn default_artifact(&self) -> &'static Path {
        match self {
            ModelFamily::Knn => Path::new("knn_model.json"),
            ModelFamily::RandomForest => Path::new("rf_model.json"),
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Knn => write!(f, "k-nearest neighbors"),
            ModelFamily::RandomForest => write!(f, "random forest"),
        }
    }
}
