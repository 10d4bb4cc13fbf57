use crate::engines::generation::{genome::Genome, operators::random_genome};
use rand::Rng;
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Decoded phenotype (if any) and score of one genome
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<P> {
    /// `None` when the genome failed to map
    pub phenotype: Option<P>,
    /// Lower is better; `+inf` marks an invalid phenotype or a failed evaluation
    pub score: f64,
    /// Codons read while decoding
    pub consumed: usize,
}

impl<P> Evaluation<P> {
    pub fn invalid(consumed: usize) -> Self {
        Self {
            phenotype: None,
            score: f64::INFINITY,
            consumed,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.phenotype.is_some()
    }
}

/// One population slot: a genome and, once evaluated, its cached result
#[derive(Debug, Clone)]
pub struct Individual<P> {
    pub genome: Genome,
    pub evaluation: Option<Evaluation<P>>,
}

impl<P> Individual<P> {
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            evaluation: None,
        }
    }

    /// Cached score; unevaluated individuals count as `+inf`
    pub fn score(&self) -> f64 {
        self.evaluation.as_ref().map_or(f64::INFINITY, |e| e.score)
    }

    pub fn phenotype(&self) -> Option<&P> {
        self.evaluation.as_ref().and_then(|e| e.phenotype.as_ref())
    }
}

/// Orders scores ascending, NaN treated as worst
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| b.is_nan().cmp(&a.is_nan()).reverse())
}

/// Individuals of one generation
#[derive(Debug, Clone)]
pub struct Population<P> {
    individuals: Vec<Individual<P>>,
    generation: usize,
}

impl<P> Population<P> {
    pub fn new(individuals: Vec<Individual<P>>, generation: usize) -> Self {
        Self {
            individuals,
            generation,
        }
    }

    /// Random genomes with lengths drawn uniformly from `lengths`
    pub fn random<R: Rng>(
        size: usize,
        lengths: RangeInclusive<usize>,
        codon_range: u32,
        rng: &mut R,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::new(random_genome(lengths.clone(), codon_range, rng)))
            .collect();
        Self::new(individuals, 0)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn individuals(&self) -> &[Individual<P>] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual<P>] {
        &mut self.individuals
    }

    pub fn into_individuals(self) -> Vec<Individual<P>> {
        self.individuals
    }

    /// Lowest score; the first one wins a tie
    pub fn best(&self) -> Option<&Individual<P>> {
        self.individuals.iter().reduce(|best, candidate| {
            if compare_scores(candidate.score(), best.score()) == Ordering::Less {
                candidate
            } else {
                best
            }
        })
    }

    /// Indices ordered best first, stable for equal scores
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| {
            compare_scores(self.individuals[a].score(), self.individuals[b].score())
        });
        order
    }

    pub fn invalid_count(&self) -> usize {
        self.individuals
            .iter()
            .filter(|i| i.evaluation.as_ref().map_or(false, |e| !e.is_valid()))
            .count()
    }

    /// Mean over finite scores, `None` if there are none
    pub fn mean_finite_score(&self) -> Option<f64> {
        let finite: Vec<f64> = self
            .individuals
            .iter()
            .map(|i| i.score())
            .filter(|s| s.is_finite())
            .collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }
}
