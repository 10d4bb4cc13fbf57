use super::traits::ConfigSection;
use crate::error::GevoError;
use serde::{Deserialize, Serialize};

/// How fitness evaluation is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub parallel: bool,
    /// Worker threads for parallel evaluation; `None` uses rayon's default
    pub threads: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

impl ConfigSection for ExecutionConfig {
    fn section_name() -> &'static str {
        "execution"
    }

    fn validate(&self) -> Result<(), GevoError> {
        if self.threads == Some(0) {
            return Err(GevoError::Configuration(
                "Thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
