//! Grammatical evolution: integer genomes decoded through a grammar into
//! phenotypes, searched with a genetic algorithm that minimizes a fitness.
pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod grammars;
pub mod types;

pub use error::{GevoError, MappingFailure, Result};
