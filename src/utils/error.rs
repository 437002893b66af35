use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Unable to open model artifact '{}': {source}", path.display())]
    LoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact '{}' could not be decoded: {source}", path.display())]
    ArtifactFormatError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model artifact: {message}")]
    InvalidArtifactError { message: String },

    #[error("could not convert string to float for {field}: '{value}'")]
    ParseError { field: String, value: String },

    #[error("{message}")]
    InputError { message: String },

    #[error("Prediction failed: {message}")]
    PredictionError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse error classes; the display boundary prints them all the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Input,
    Prediction,
    Configuration,
}

impl PredictError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::LoadError { .. }
            | PredictError::ArtifactFormatError { .. }
            | PredictError::InvalidArtifactError { .. } => ErrorCategory::Load,
            PredictError::ParseError { .. } | PredictError::InputError { .. } => {
                ErrorCategory::Input
            }
            PredictError::PredictionError { .. } => ErrorCategory::Prediction,
            PredictError::ConfigValidationError { .. }
            | PredictError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            // Only reached while writing artifacts or talking to the console.
            PredictError::SerializationError(_) => ErrorCategory::Load,
            PredictError::IoError(_) => ErrorCategory::Input,
        }
    }

    /// Exit status used when strict exit codes are requested.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Load => 3,
            ErrorCategory::Prediction => 4,
            ErrorCategory::Configuration => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictError::LoadError { .. } => {
                "Check that the model artifact exists in the working directory or pass --model"
            }
            PredictError::ArtifactFormatError { .. } | PredictError::SerializationError(_) => {
                "Re-export the model artifact as JSON"
            }
            PredictError::InvalidArtifactError { .. } => {
                "The artifact was exported with inconsistent parameters; re-export it"
            }
            PredictError::ParseError { .. } => "Enter plain decimal numbers such as 3.5",
            PredictError::InputError { .. } | PredictError::IoError(_) => {
                "Provide both values on stdin or with --radius/--height"
            }
            PredictError::PredictionError { .. } => {
                "Verify the model was trained on (radius, height) features"
            }
            PredictError::ConfigValidationError { .. }
            | PredictError::InvalidConfigValueError { .. } => "Fix the configuration file",
        }
    }

    pub(crate) fn prediction(message: impl Into<String>) -> Self {
        PredictError::PredictionError {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_artifact(message: impl Into<String>) -> Self {
        PredictError::InvalidArtifactError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
