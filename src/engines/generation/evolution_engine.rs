use crate::config::{AppConfig, ConfigSection, EvolutionConfig};
use crate::data::FitnessCache;
use crate::engines::evaluation::{sanitized_score, ConfiguredExecutor, Executor, Fitness};
use crate::engines::generation::{
    genome::Genome,
    grammar::Grammar,
    hall_of_fame::{EliteSolution, HallOfFame},
    mapper::GrammarMapper,
    operators::{crossover, mutate, tournament_selection},
    population::{Evaluation, Individual, Population},
    progress::{GenerationReport, ProgressCallback},
};
use crate::error::{GevoError, MappingFailure, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::fmt::Display;

/// Everything a finished run hands back
#[derive(Debug, Clone)]
pub struct EvolutionOutcome<P> {
    /// Best individual of the whole run, with its phenotype and score
    pub best: Individual<P>,
    /// Generation in which `best` was first reached
    pub best_generation: usize,
    pub generations_run: usize,
    pub target_reached: bool,
    pub history: Vec<GenerationReport>,
    pub hall_of_fame: Vec<EliteSolution<P>>,
    pub final_population: Population<P>,
}

impl<P> EvolutionOutcome<P> {
    pub fn best_score(&self) -> f64 {
        self.best.score()
    }

    pub fn best_phenotype(&self) -> Option<&P> {
        self.best.phenotype()
    }
}

pub struct EvolutionEngine<G: Grammar, F, E> {
    config: EvolutionConfig,
    mapper: GrammarMapper<G>,
    fitness: F,
    executor: E,
    cache: FitnessCache<G::Phenotype>,
    hall_of_fame: HallOfFame<G::Phenotype>,
    rng: StdRng,
}

impl<G, F> EvolutionEngine<G, F, ConfiguredExecutor>
where
    G: Grammar,
    G::Phenotype: Clone + Display + Send,
    F: Fitness<G::Phenotype>,
{
    /// Build an engine from a full application config
    pub fn from_app_config(config: &AppConfig, grammar: G, fitness: F) -> Result<Self> {
        config.validate()?;
        let mapper = GrammarMapper::from_config(grammar, &config.mapping);
        let executor = ConfiguredExecutor::from_config(&config.execution)?;
        Self::new(config.evolution.clone(), mapper, fitness, executor)
    }
}

impl<G, F, E> EvolutionEngine<G, F, E>
where
    G: Grammar,
    G::Phenotype: Clone + Display + Send,
    F: Fitness<G::Phenotype>,
    E: Executor,
{
    /// Configuration errors are the only fatal errors and surface here
    pub fn new(
        config: EvolutionConfig,
        mapper: GrammarMapper<G>,
        fitness: F,
        executor: E,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            cache: FitnessCache::new(config.cache_size),
            hall_of_fame: HallOfFame::new(config.hall_of_fame_size),
            config,
            mapper,
            fitness,
            executor,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn mapper(&self) -> &GrammarMapper<G> {
        &self.mapper
    }

    /// Run the evolution process.
    ///
    /// Each call is a fresh run: the hall of fame starts empty. The fitness
    /// cache is kept, since a genome always maps to the same evaluation.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome<G::Phenotype>> {
        self.hall_of_fame = HallOfFame::new(self.config.hall_of_fame_size);
        let mut population = self.initialize_population();
        let mut history = Vec::with_capacity(self.config.generations);
        let mut run_best: Option<(Individual<G::Phenotype>, usize)> = None;
        let mut target_reached = false;

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            let evaluated = self.evaluate_population(&mut population, &mut callback);

            let generation_best = population
                .best()
                .cloned()
                .ok_or_else(|| GevoError::Configuration("Population is empty".to_string()))?;
            let best_score = generation_best.score();

            // Ties count as achieving the best again
            let matches_best = run_best
                .as_ref()
                .map_or(true, |(best, _)| best_score <= best.score());
            let improved = run_best
                .as_ref()
                .map_or(true, |(best, _)| best_score < best.score());
            if improved {
                run_best = Some((generation_best.clone(), generation));
            }

            self.update_hall_of_fame(&population, generation);

            let report = GenerationReport {
                generation,
                best_score,
                best_length: generation_best.genome.len(),
                phenotype: if matches_best {
                    generation_best.phenotype().map(|p| p.to_string())
                } else {
                    None
                },
                mean_score: population.mean_finite_score(),
                invalid_count: population.invalid_count(),
                population_size: population.len(),
                evaluated,
            };
            log::debug!(
                "Generation {}: best {} (length {}), {} invalid, {} evaluated",
                generation + 1,
                report.best_score,
                report.best_length,
                report.invalid_count,
                report.evaluated
            );
            callback.on_generation_complete(&report);
            history.push(report);

            if let Some(target) = self.config.target_score {
                if best_score <= target {
                    log::info!(
                        "Target score {} reached in generation {}",
                        target,
                        generation + 1
                    );
                    target_reached = true;
                    break;
                }
            }

            // Check termination
            if generation + 1 == self.config.generations {
                break;
            }

            population = self.create_next_generation(&population);
        }

        let (best, best_generation) = run_best
            .ok_or_else(|| GevoError::Configuration("No generation was run".to_string()))?;
        let (hits, misses) = self.cache.stats();
        log::info!(
            "Evolution finished after {} generations: best score {} (cache {} hits / {} misses)",
            history.len(),
            best.score(),
            hits,
            misses
        );

        Ok(EvolutionOutcome {
            best,
            best_generation,
            generations_run: history.len(),
            target_reached,
            history,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            final_population: population,
        })
    }

    fn initialize_population(&mut self) -> Population<G::Phenotype> {
        Population::random(
            self.config.population_size,
            self.config.min_genome_length..=self.config.max_genome_length,
            self.config.codon_range,
            &mut self.rng,
        )
    }

    /// Decode and score every individual that has no evaluation yet.
    /// Returns how many went through the executor.
    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        population: &mut Population<G::Phenotype>,
        callback: &mut C,
    ) -> usize {
        let total = population.len();
        let mut pending = Vec::new();

        for (index, individual) in population.individuals_mut().iter_mut().enumerate() {
            if individual.evaluation.is_some() {
                continue;
            }
            match self.cache.get(&individual.genome) {
                Some(evaluation) => individual.evaluation = Some(evaluation),
                None => pending.push(index),
            }
        }

        let genomes: Vec<&Genome> = pending
            .iter()
            .map(|&index| &population.individuals()[index].genome)
            .collect();

        let mapper = &self.mapper;
        let fitness = &self.fitness;
        let results = self
            .executor
            .map(&genomes, |genome| evaluate_genome(mapper, fitness, genome));

        let evaluated = results.len();
        for (index, evaluation) in pending.into_iter().zip(results) {
            let individual = &mut population.individuals_mut()[index];
            self.cache.set(individual.genome.clone(), evaluation.clone());
            individual.evaluation = Some(evaluation);
        }

        callback.on_individuals_evaluated(evaluated, total);
        evaluated
    }

    fn update_hall_of_fame(&mut self, population: &Population<G::Phenotype>, generation: usize) {
        for individual in population.individuals() {
            if let Some(phenotype) = individual.phenotype() {
                self.hall_of_fame
                    .try_add(&individual.genome, phenotype, individual.score(), generation);
            }
        }
    }

    fn create_next_generation(
        &mut self,
        population: &Population<G::Phenotype>,
    ) -> Population<G::Phenotype> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);

        // Elitism: carry the best over with their evaluations
        for &index in population.ranking().iter().take(self.config.elitism_count) {
            next_generation.push(population.individuals()[index].clone());
        }

        let parents = population.individuals();
        while next_generation.len() < size {
            let first = &tournament_selection(parents, self.config.tournament_size, &mut self.rng).genome;
            let second = &tournament_selection(parents, self.config.tournament_size, &mut self.rng).genome;

            let (child1, child2) = if self.rng.gen::<f64>() < self.config.crossover_rate {
                crossover(first, second, self.config.genome_length_cap, &mut self.rng)
            } else {
                (first.clone(), second.clone())
            };

            for mut child in [child1, child2] {
                if next_generation.len() == size {
                    break;
                }
                mutate(
                    &mut child,
                    self.config.mutation_rate,
                    self.config.codon_range,
                    &mut self.rng,
                );
                next_generation.push(Individual::new(child));
            }
        }

        Population::new(next_generation, population.generation() + 1)
    }
}

/// One decode-then-score unit; a pure function of the genome
fn evaluate_genome<G, F>(mapper: &GrammarMapper<G>, fitness: &F, genome: &Genome) -> Evaluation<G::Phenotype>
where
    G: Grammar,
    F: Fitness<G::Phenotype>,
{
    match mapper.decode(genome) {
        Ok(mapped) => Evaluation {
            score: sanitized_score(fitness, &mapped.phenotype),
            phenotype: Some(mapped.phenotype),
            consumed: mapped.consumed,
        },
        Err(failure) => {
            if !matches!(failure, MappingFailure::WrapLimitExceeded { .. }) {
                log::trace!("Genome failed to map: {}", failure);
            }
            Evaluation::invalid(failure.consumed())
        }
    }
}
