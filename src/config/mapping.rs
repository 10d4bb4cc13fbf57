use super::traits::ConfigSection;
use crate::error::GevoError;
use serde::{Deserialize, Serialize};

/// Genotype to phenotype decoding limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// How many times the codon cursor may restart from the beginning of the genome
    pub max_wraps: usize,
    /// Upper bound on pending symbols in a derivation; `None` leaves it unbounded
    pub max_depth: Option<usize>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_wraps: 2,
            max_depth: None,
        }
    }
}

impl ConfigSection for MappingConfig {
    fn section_name() -> &'static str {
        "mapping"
    }

    fn validate(&self) -> Result<(), GevoError> {
        if self.max_depth == Some(0) {
            return Err(GevoError::Configuration(
                "Maximum derivation depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
