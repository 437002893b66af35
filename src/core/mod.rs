pub mod prompt;
pub mod runner;

pub use crate::domain::model::{FeatureField, SurfaceFeatures};
pub use crate::domain::ports::{InputSource, ModelSource, Regressor};
pub use crate::utils::error::Result;
