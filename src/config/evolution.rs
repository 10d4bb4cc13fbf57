use super::traits::{check_probability, ConfigSection};
use crate::error::GevoError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Initial genome lengths are drawn uniformly from `min_genome_length..=max_genome_length`
    pub min_genome_length: usize,
    pub max_genome_length: usize,
    /// Offspring longer than this are truncated
    pub genome_length_cap: Option<usize>,
    /// Codons are drawn from `0..codon_range`
    pub codon_range: u32,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    /// Per-codon replacement probability
    pub mutation_rate: f64,
    pub elitism_count: usize,
    /// Stop as soon as the best score is at or below this value
    pub target_score: Option<f64>,
    pub seed: Option<u64>,
    /// Number of genome evaluations remembered across generations (0 disables)
    pub cache_size: usize,
    pub hall_of_fame_size: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 50,
            min_genome_length: 1,
            max_genome_length: 100,
            genome_length_cap: None,
            codon_range: 256,
            tournament_size: 2,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            elitism_count: 1,
            target_score: None,
            seed: None,
            cache_size: 256,
            hall_of_fame_size: 5,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GevoError> {
        if self.population_size == 0 {
            return Err(GevoError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(GevoError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        if self.elitism_count >= self.population_size {
            return Err(GevoError::Configuration(format!(
                "Elitism count ({}) must be lower than population size ({})",
                self.elitism_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(GevoError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.min_genome_length == 0 {
            return Err(GevoError::Configuration(
                "Minimum genome length must be at least 1".to_string(),
            ));
        }
        if self.min_genome_length > self.max_genome_length {
            return Err(GevoError::Configuration(format!(
                "Minimum genome length ({}) exceeds maximum ({})",
                self.min_genome_length, self.max_genome_length
            )));
        }
        if let Some(cap) = self.genome_length_cap {
            if cap < self.max_genome_length {
                return Err(GevoError::Configuration(format!(
                    "Genome length cap ({}) is below the initial maximum length ({})",
                    cap, self.max_genome_length
                )));
            }
        }
        if self.codon_range == 0 {
            return Err(GevoError::Configuration(
                "Codon range must be at least 1".to_string(),
            ));
        }
        check_probability("Crossover rate", self.crossover_rate)?;
        check_probability("Mutation rate", self.mutation_rate)?;
        if let Some(target) = self.target_score {
            if !target.is_finite() {
                return Err(GevoError::Configuration(
                    "Target score must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}
