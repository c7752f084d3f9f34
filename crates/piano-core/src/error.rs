use thiserror::Error;

/// Rejected configuration or unparsable input handed to the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("orbit distance range is empty: min {min} > max {max}")]
    EmptyDistanceRange { min: f32, max: f32 },

    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("invalid note name: {0:?}")]
    InvalidNote(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
