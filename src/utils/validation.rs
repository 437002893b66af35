use crate::utils::error::{PredictError, Result};
use ndarray::ArrayView2;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PredictError::invalid_artifact(format!(
            "{field_name} must be at least {min_value}, got {value}"
        )));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PredictError::invalid_artifact(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Rejects prediction input holding NaN or an infinity.
pub fn validate_finite_input(x: ArrayView2<'_, f64>) -> Result<()> {
    if x.iter().any(|v| !v.is_finite()) {
        return Err(PredictError::prediction("Input X contains NaN or infinity"));
    }
    Ok(())
}

/// Checks that every row has `width` columns.
pub fn validate_rectangular(field_name: &str, rows: &[Vec<f64>], width: usize) -> Result<()> {
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(PredictError::invalid_artifact(format!(
            "{field_name}[{index}] has {} values, expected {width}",
            row.len()
        )));
    }
    Ok(())
}
