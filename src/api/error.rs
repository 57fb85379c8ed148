use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{name} must be > {min}, got {value}")]
    NotAbove {
        name: &'static str,
        min: f64,
        value: f64,
    },
}

impl InputError {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFinite { name }
            | Self::OutOfRange { name, .. }
            | Self::NotAbove { name, .. } => name,
        }
    }
}

pub(crate) fn ensure_in_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { name });
    }
    if !(min..=max).contains(&value) {
        return Err(InputError::OutOfRange {
            name,
            min,
            max,
            value,
        });
    }
    Ok(value)
}

pub(crate) fn ensure_above(name: &'static str, value: f64, min: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { name });
    }
    if value <= min {
        return Err(InputError::NotAbove { name, min, value });
    }
    Ok(value)
}
