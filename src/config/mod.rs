pub mod traits;
pub mod evolution;
pub mod mapping;
pub mod execution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use mapping::MappingConfig;
pub use execution::ExecutionConfig;
pub use traits::ConfigSection;
