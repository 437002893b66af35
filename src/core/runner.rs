use crate::core::prompt::parse_feature;
use crate::domain::model::{FeatureField, SurfaceFeatures};
use crate::domain::ports::{InputSource, ModelSource};
use crate::utils::error::{PredictError, Result};
use std::fmt;
use std::process::ExitCode;

/// Result of one runner invocation, ready to print.
#[derive(Debug)]
pub enum RunOutcome {
    Predicted(f64),
    Failed(PredictError),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Predicted(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            RunOutcome::Predicted(value) => Some(*value),
            RunOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PredictError> {
        match self {
            RunOutcome::Predicted(_) => None,
            RunOutcome::Failed(err) => Some(err),
        }
    }

    /// Failures exit with 0 unless `strict` asks for a per-category code.
    pub fn exit_status(&self, strict: bool) -> u8 {
        match self {
            RunOutcome::Failed(err) if strict => err.exit_code(),
            _ => 0,
        }
    }

    pub fn exit_code(&self, strict: bool) -> ExitCode {
        ExitCode::from(self.exit_status(strict))
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Predicted(value) => write!(f, "Predicted Surface Area: {value:.2}"),
            RunOutcome::Failed(err) => write!(f, "An error occurred: {err}"),
        }
    }
}

/// Loads a model, reads radius and height, and predicts one surface area.
///
/// Every call reloads the model and reads fresh input, so a runner can be
/// invoked repeatedly.
pub struct PredictorRunner<S: ModelSource, I: InputSource> {
    source: S,
    input: I,
}

impl<S: ModelSource, I: InputSource> PredictorRunner<S, I> {
    pub fn new(source: S, input: I) -> Self {
        Self { source, input }
    }

    /// Never fails: any error is folded into [`RunOutcome::Failed`].
    pub fn run(&mut self) -> RunOutcome {
        match self.try_run() {
            Ok(value) => {
                tracing::info!(value, "prediction complete");
                RunOutcome::Predicted(value)
            }
            Err(e) => {
                tracing::info!(
                    "Prediction run failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                RunOutcome::Failed(e)
            }
        }
    }

    fn try_run(&mut self) -> Result<f64> {
        let model = self.source.load()?;
        let features = self.read_features()?;
        tracing::debug!(
            radius = features.radius,
            height = features.height,
            "features acquired"
        );

        let row = features.to_row();
        let predictions = model.predict(row.view())?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictError::prediction("model returned no predictions"))
    }

    fn read_features(&mut self) -> Result<SurfaceFeatures> {
        let radius = self.read_field(FeatureField::Radius)?;
        let height = self.read_field(FeatureField::Height)?;
        Ok(SurfaceFeatures { radius, height })
    }

    fn read_field(&mut self, field: FeatureField) -> Result<f64> {
        let raw = self.input.read_value(field)?;
        parse_feature(field, &raw)
    }
}
