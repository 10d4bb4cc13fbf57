use gramevo::engines::generation::{Derivation, GrammarMapper, Grammar, Step};
use gramevo::grammars::ArithmeticGrammar;
use gramevo::types::BinaryOp;
use gramevo::MappingFailure;

/// Records every choice it receives; finishes after `needed` choices
struct Recorder {
    needed: usize,
    options: usize,
}

struct RecorderRun {
    needed: usize,
    options: usize,
    choices: Vec<usize>,
}

impl Derivation for RecorderRun {
    type Output = Vec<usize>;

    fn resume(&mut self, choice: Option<usize>) -> Step<Vec<usize>> {
        if let Some(choice) = choice {
            assert!(choice < self.options, "choice {} out of range", choice);
            self.choices.push(choice);
        }
        if self.choices.len() >= self.needed {
            Step::Done(self.choices.clone())
        } else {
            Step::Choose(self.options)
        }
    }
}

impl Grammar for Recorder {
    type Phenotype = Vec<usize>;
    type Derivation = RecorderRun;

    fn start(&self) -> RecorderRun {
        RecorderRun {
            needed: self.needed,
            options: self.options,
            choices: Vec::new(),
        }
    }
}

#[test]
fn test_decode_is_deterministic() {
    let grammar = ArithmeticGrammar::univariate("x", &BinaryOp::ALL);
    let mapper = GrammarMapper::new(grammar, 3);
    let genome = [17, 4, 200, 9, 33, 8, 1, 90, 61, 2];

    let first = mapper.decode(&genome);
    for _ in 0..10 {
        assert_eq!(mapper.decode(&genome), first);
    }
}

#[test]
fn test_wrapping_bounds_codon_consumption() {
    for length in 1..6 {
        for max_wraps in 0..4 {
            let genome: Vec<u32> = (0..length as u32).collect();
            let budget = length * (max_wraps + 1);
            let mapper = GrammarMapper::new(
                Recorder {
                    needed: budget + 1,
                    options: 2,
                },
                max_wraps,
            );
            assert_eq!(
                mapper.decode(&genome),
                Err(MappingFailure::WrapLimitExceeded { consumed: budget }),
                "length {} wraps {}",
                length,
                max_wraps
            );

            // Exactly the budget still decodes
            let mapper = GrammarMapper::new(
                Recorder {
                    needed: budget,
                    options: 2,
                },
                max_wraps,
            );
            let mapped = mapper.decode(&genome).unwrap();
            assert_eq!(mapped.consumed, budget);
        }
    }
}

#[test]
fn test_no_wrapping_fails_when_genome_too_short() {
    let mapper = GrammarMapper::new(Recorder { needed: 4, options: 5 }, 0);
    assert!(mapper.decode(&[1, 2, 3]).is_err());
    assert_eq!(mapper.decode(&[1, 2, 3, 4]).unwrap().phenotype, vec![1, 2, 3, 4]);
}

#[test]
fn test_single_option_still_consumes_codons() {
    let mapper = GrammarMapper::new(Recorder { needed: 5, options: 1 }, 10);
    let mapped = mapper.decode(&[9, 8, 7]).unwrap();
    assert_eq!(mapped.phenotype, vec![0; 5]);
    assert_eq!(mapped.consumed, 5);
    assert_eq!(mapped.wraps, 1);

    // With no wrapping allowed the same genome runs out
    let strict = GrammarMapper::new(Recorder { needed: 5, options: 1 }, 0);
    assert_eq!(
        strict.decode(&[9, 8, 7]),
        Err(MappingFailure::WrapLimitExceeded { consumed: 3 })
    );
}

#[test]
fn test_codon_modulo_option_count() {
    let mapper = GrammarMapper::new(Recorder { needed: 4, options: 3 }, 0);
    let mapped = mapper.decode(&[3, 4, 5, 1_000_000]).unwrap();
    assert_eq!(mapped.phenotype, vec![0, 1, 2, 1]);
}

#[test]
fn test_arithmetic_phenotypes_are_well_formed() {
    let grammar = ArithmeticGrammar::univariate("x", &[BinaryOp::Add, BinaryOp::Mul]);
    let mapper = GrammarMapper::new(grammar, 2);

    for seed in 0u32..200 {
        let genome: Vec<u32> = (0..20).map(|i| seed.wrapping_mul(2654435761).wrapping_add(i * 40503) >> 7).collect();
        if let Ok(mapped) = mapper.decode(&genome) {
            let text = mapped.phenotype.to_string();
            let opens = text.matches('(').count();
            assert_eq!(opens, text.matches(')').count());
            assert_eq!(opens, (mapped.phenotype.size() - 1) / 2);
            assert!(mapped.consumed <= genome.len() * 3);
        }
    }
}
