use crate::error::GevoError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), GevoError>;
}

/// Shared check for probability-valued options
pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), GevoError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GevoError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
