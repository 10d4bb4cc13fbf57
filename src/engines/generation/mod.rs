pub mod genome;
pub mod gene_consumer;
pub mod grammar;
pub mod mapper;
pub mod population;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Codon, Genome};
pub use gene_consumer::GeneConsumer;
pub use grammar::{Derivation, Grammar, Step};
pub use mapper::{GrammarMapper, Mapped};
pub use population::{Evaluation, Individual, Population};
pub use hall_of_fame::{EliteSolution, HallOfFame};
pub use evolution_engine::{EvolutionEngine, EvolutionOutcome};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, GenerationReport, ProgressCallback,
    ProgressMessage, write_history,
};
