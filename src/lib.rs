pub mod config;
pub mod core;
pub mod domain;
pub mod models;
pub mod utils;

#[cfg(feature = "cli")]
pub mod app;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::PredictorConfig;
pub use crate::core::prompt::{ConsolePrompt, PresetInput};
pub use crate::core::runner::{PredictorRunner, RunOutcome};
pub use domain::model::{FeatureField, ModelFamily, SurfaceFeatures, FEATURE_ORDER};
pub use domain::ports::{InputSource, ModelSource, Regressor};
pub use models::{ArtifactFile, Model, ModelArtifact};
pub use utils::error::{PredictError, Result};
