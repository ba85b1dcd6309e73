use crate::error::GenetradeError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), GenetradeError>;
}

/// Reject values outside `[0, 1]`.
pub(crate) fn ensure_probability(section: &str, name: &str, value: f64) -> Result<(), GenetradeError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GenetradeError::Configuration(format!(
            "[{}] {} must be between 0 and 1, got {}",
            section, name, value
        )));
    }
    Ok(())
}

pub(crate) fn ensure_positive(section: &str, name: &str, value: f64) -> Result<(), GenetradeError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(GenetradeError::Configuration(format!(
            "[{}] {} must be positive, got {}",
            section, name, value
        )));
    }
    Ok(())
}
