use crate::config::MappingConfig;
use crate::engines::generation::{
    gene_consumer::GeneConsumer,
    genome::Codon,
    grammar::{Derivation, Grammar, Step},
};
use crate::error::MappingFailure;

/// A successfully decoded phenotype and how much of the genome it used
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<P> {
    pub phenotype: P,
    /// Codons read, counting re-reads after wrapping
    pub consumed: usize,
    pub wraps: usize,
}

/// Decodes genomes into phenotypes by driving a grammar with codons
#[derive(Debug, Clone)]
pub struct GrammarMapper<G> {
    grammar: G,
    max_wraps: usize,
    max_depth: Option<usize>,
}

impl<G: Grammar> GrammarMapper<G> {
    pub fn new(grammar: G, max_wraps: usize) -> Self {
        Self {
            grammar,
            max_wraps,
            max_depth: None,
        }
    }

    pub fn from_config(grammar: G, config: &MappingConfig) -> Self {
        Self {
            grammar,
            max_wraps: config.max_wraps,
            max_depth: config.max_depth,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub fn max_wraps(&self) -> usize {
        self.max_wraps
    }

    /// Main entry point: decode one genome.
    ///
    /// Failures are ordinary values; nothing here panics or aborts the run.
    pub fn decode(&self, genome: &[Codon]) -> Result<Mapped<G::Phenotype>, MappingFailure> {
        let mut derivation = self.grammar.start();
        let mut consumer = GeneConsumer::new(genome, self.max_wraps);
        let mut choice = None;

        loop {
            if let Some(max_depth) = self.max_depth {
                let depth = derivation.depth();
                if depth > max_depth {
                    return Err(MappingFailure::DepthExceeded {
                        depth,
                        max_depth,
                        consumed: consumer.consumed(),
                    });
                }
            }

            match derivation.resume(choice) {
                Step::Done(phenotype) => {
                    return Ok(Mapped {
                        phenotype,
                        consumed: consumer.consumed(),
                        wraps: consumer.wraps(),
                    });
                }
                Step::Choose(options) => {
                    if options == 0 {
                        log::warn!(
                            "Grammar requested a choice among zero options after {} codons",
                            consumer.consumed()
                        );
                    }
                    choice = Some(consumer.choose(options)?);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Needs exactly `needed` choices and returns them in order
    struct Fixed {
        needed: usize,
        options: usize,
    }

    struct FixedRun {
        needed: usize,
        options: usize,
        taken: Vec<usize>,
    }

    impl Derivation for FixedRun {
        type Output = Vec<usize>;

        fn resume(&mut self, choice: Option<usize>) -> Step<Vec<usize>> {
            if let Some(c) = choice {
                self.taken.push(c);
            }
            if self.taken.len() == self.needed {
                Step::Done(self.taken.clone())
            } else {
                Step::Choose(self.options)
            }
        }

        fn depth(&self) -> usize {
            self.taken.len()
        }
    }

    impl Grammar for Fixed {
        type Phenotype = Vec<usize>;
        type Derivation = FixedRun;

        fn start(&self) -> FixedRun {
            FixedRun {
                needed: self.needed,
                options: self.options,
                taken: Vec::new(),
            }
        }
    }

    #[test]
    fn test_exact_fit_without_wrapping() {
        let mapper = GrammarMapper::new(Fixed { needed: 3, options: 4 }, 0);
        let mapped = mapper.decode(&[5, 6, 7]).unwrap();
        assert_eq!(mapped.phenotype, vec![1, 2, 3]);
        assert_eq!(mapped.consumed, 3);
    }

    #[test]
    fn test_wrapping_reuses_codons() {
        let mapper = GrammarMapper::new(Fixed { needed: 5, options: 10 }, 1);
        let mapped = mapper.decode(&[1, 2, 3]).unwrap();
        assert_eq!(mapped.phenotype, vec![1, 2, 3, 1, 2]);
        assert_eq!(mapped.wraps, 1);
    }

    #[test]
    fn test_depth_bound() {
        let mapper = GrammarMapper::new(Fixed { needed: 10, options: 2 }, 10).with_max_depth(4);
        assert_eq!(
            mapper.decode(&[0]),
            Err(MappingFailure::DepthExceeded {
                depth: 5,
                max_depth: 4,
                consumed: 5,
            })
        );
    }

    #[test]
    fn test_zero_options_is_invalid() {
        let mapper = GrammarMapper::new(Fixed { needed: 1, options: 0 }, 3);
        assert_eq!(
            mapper.decode(&[1, 2]),
            Err(MappingFailure::EmptyChoice { consumed: 0 })
        );
    }

    #[test]
    fn test_zero_options_after_reading_codons() {
        // Three codons read, then the grammar offers nothing
        struct ThenEmpty(usize);
        impl Derivation for ThenEmpty {
            type Output = ();
            fn resume(&mut self, choice: Option<usize>) -> Step<()> {
                if choice.is_some() {
                    self.0 += 1;
                }
                Step::Choose(if self.0 < 3 { 2 } else { 0 })
            }
        }
        struct Staged;
        impl Grammar for Staged {
            type Phenotype = ();
            type Derivation = ThenEmpty;
            fn start(&self) -> ThenEmpty {
                ThenEmpty(0)
            }
        }

        let failure = GrammarMapper::new(Staged, 0).decode(&[4, 5, 6, 7]).unwrap_err();
        assert_eq!(failure, MappingFailure::EmptyChoice { consumed: 3 });
        assert_eq!(failure.consumed(), 3);
    }
}
