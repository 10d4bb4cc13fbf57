use thiserror::Error;

#[derive(Error, Debug)]
pub enum GevoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GevoError>;

/// Reasons a genome fails to map to a phenotype.
///
/// These are ordinary outcomes of decoding, not errors of the run: the
/// evolution engine turns them into a `+inf` score and moves on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFailure {
    #[error("wrap limit exceeded after consuming {consumed} codons")]
    WrapLimitExceeded { consumed: usize },

    #[error("derivation depth {depth} exceeds maximum {max_depth} after consuming {consumed} codons")]
    DepthExceeded {
        depth: usize,
        max_depth: usize,
        consumed: usize,
    },

    #[error("grammar requested a choice among zero options after consuming {consumed} codons")]
    EmptyChoice { consumed: usize },
}

impl MappingFailure {
    /// Codons read before decoding gave up
    pub fn consumed(&self) -> usize {
        match *self {
            MappingFailure::WrapLimitExceeded { consumed }
            | MappingFailure::DepthExceeded { consumed, .. }
            | MappingFailure::EmptyChoice { consumed } => consumed,
        }
    }
}
