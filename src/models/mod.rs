pub mod forest;
pub mod knn;

use crate::domain::model::{ModelFamily, FEATURE_ORDER};
use crate::domain::ports::{ModelSource, Regressor};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub use forest::{RandomForestRegressor, TreeNode};
pub use knn::{DistanceMetric, KnnRegressor, Weighting};

/// Descriptive fields written alongside the model by the exporter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Feature names in training column order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Model {
    Knn(KnnRegressor),
    RandomForest(RandomForestRegressor),
}

impl Model {
    pub fn family(&self) -> ModelFamily {
        match self {
            Model::Knn(_) => ModelFamily::Knn,
            Model::RandomForest(_) => ModelFamily::RandomForest,
        }
    }
}

/// A persisted, fitted regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    pub model: Model,
}

impl ModelArtifact {
    pub fn new(model: Model) -> Self {
        Self {
            metadata: ArtifactMetadata {
                features: FEATURE_ORDER.iter().map(|f| f.to_string()).collect(),
                ..ArtifactMetadata::default()
            },
            model,
        }
    }

    /// Reads and validates an artifact.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| PredictError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| PredictError::ArtifactFormatError {
                path: path.to_path_buf(),
                source,
            },
        )?;
        artifact.validate()?;

        tracing::debug!(
            path = %path.display(),
            family = %artifact.model.family(),
            name = artifact.metadata.name.as_deref().unwrap_or("unnamed"),
            trained_at = ?artifact.metadata.trained_at,
            "model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

impl Validate for ModelArtifact {
    fn validate(&self) -> Result<()> {
        let features = &self.metadata.features;
        if !features.is_empty() && features.iter().map(String::as_str).ne(FEATURE_ORDER) {
            return Err(PredictError::invalid_artifact(format!(
                "model was trained on features [{}], expected [{}]",
                features.join(", "),
                FEATURE_ORDER.join(", ")
            )));
        }

        match &self.model {
            Model::Knn(knn) => knn.validate(),
            Model::RandomForest(forest) => forest.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        match &self.model {
            Model::Knn(knn) => knn.predict(x),
            Model::RandomForest(forest) => forest.predict(x),
        }
    }
}

/// Loads the model from an artifact file on every `load` call.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    path: PathBuf,
}

impl ArtifactFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for ArtifactFile {
    fn load(&self) -> Result<Box<dyn Regressor>> {
        Ok(Box::new(ModelArtifact::from_file(&self.path)?))
    }
}
