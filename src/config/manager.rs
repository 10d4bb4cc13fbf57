use super::{
    evolution::EvolutionConfig,
    execution::ExecutionConfig,
    mapping::MappingConfig,
    traits::ConfigSection,
};
use crate::error::GevoError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `GRAMEVO_EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "GRAMEVO";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub mapping: MappingConfig,
    pub execution: ExecutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GevoError> {
        self.evolution.validate()?;
        self.mapping.validate()?;
        self.execution.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, layering `GRAMEVO_*` environment variables on top
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GevoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GevoError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GevoError> {
        let toml_str = toml::to_string_pretty(&self.get())?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply an edit; the edit is discarded if the result does not validate
    pub fn update<F>(&self, f: F) -> Result<(), GevoError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut edited = config.clone();
        f(&mut edited);
        edited.validate()?;
        *config = edited;
        Ok(())
    }
}
