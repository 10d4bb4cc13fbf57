use crate::engines::generation::{genome::Genome, population::compare_scores};
use std::collections::HashSet;
use std::fmt::Display;

#[derive(Clone, Debug)]
pub struct EliteSolution<P> {
    pub genome: Genome,
    pub phenotype: P,
    pub score: f64,
    pub canonical_string: String, // For deduplication
    pub generation: usize,         // Generation it was first seen in
}

/// Best distinct phenotypes seen over a run, best first
#[derive(Debug)]
pub struct HallOfFame<P> {
    solutions: Vec<EliteSolution<P>>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl<P: Clone + Display> HallOfFame<P> {
    pub fn new(max_size: usize) -> Self {
        Self {
            solutions: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a solution. Rejects duplicates, non-finite scores and
    /// anything worse than a full hall's worst entry.
    pub fn try_add(&mut self, genome: &Genome, phenotype: &P, score: f64, generation: usize) -> bool {
        if self.max_size == 0 || !score.is_finite() {
            return false;
        }

        let canonical_string = phenotype.to_string();
        if self.seen_signatures.contains(&canonical_string) {
            return false; // Duplicate, reject
        }

        if self.solutions.len() >= self.max_size {
            match self.solutions.last() {
                Some(worst) if score < worst.score => {}
                _ => return false,
            }
        }

        self.seen_signatures.insert(canonical_string.clone());
        self.solutions.push(EliteSolution {
            genome: genome.clone(),
            phenotype: phenotype.clone(),
            score,
            canonical_string,
            generation,
        });

        // Stable: an earlier entry stays ahead of a later one with the same score
        self.solutions.sort_by(|a, b| compare_scores(a.score, b.score));

        while self.solutions.len() > self.max_size {
            if let Some(removed) = self.solutions.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }

        true
    }

    pub fn get_all(&self) -> &[EliteSolution<P>] {
        &self.solutions
    }

    pub fn best(&self) -> Option<&EliteSolution<P>> {
        self.solutions.first()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
