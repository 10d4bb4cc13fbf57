use crate::engines::generation::{genome::Genome, population::Evaluation};
use std::collections::{BTreeMap, HashMap};

/// Remembers evaluations by genome so repeated genomes skip decoding and scoring.
///
/// Bounded; when full the least recently used entry is evicted.
#[derive(Debug)]
pub struct FitnessCache<P> {
    entries: HashMap<Genome, (Evaluation<P>, u64)>,
    recency: BTreeMap<u64, Genome>,
    clock: u64,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<P: Clone> FitnessCache<P> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            recency: BTreeMap::new(),
            clock: 0,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, genome: &Genome) -> Option<Evaluation<P>> {
        let tick = self.tick();
        match self.entries.get_mut(genome) {
            Some((evaluation, stamp)) => {
                self.recency.remove(stamp);
                *stamp = tick;
                self.recency.insert(tick, genome.clone());
                self.hits += 1;
                Some(evaluation.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn set(&mut self, genome: Genome, evaluation: Evaluation<P>) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.tick();
        if let Some((_, old_stamp)) = self.entries.remove(&genome) {
            self.recency.remove(&old_stamp);
        }
        while self.entries.len() >= self.capacity {
            match self.recency.pop_first() {
                Some((_, oldest)) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.recency.insert(tick, genome.clone());
        self.entries.insert(genome, (evaluation, tick));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}
