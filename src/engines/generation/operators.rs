use crate::engines::generation::genome::{Codon, Genome};
use crate::engines::generation::population::{compare_scores, Individual};
use rand::Rng;
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Tournament selection: pick best (lowest score) of K random candidates.
///
/// Candidates are drawn with replacement; on equal scores the first one drawn
/// wins. The population is only read.
pub fn tournament_selection<'a, P, R: Rng>(
    population: &'a [Individual<P>],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual<P> {
    let mut best = &population[rng.gen_range(0..population.len())];

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if compare_scores(candidate.score(), best.score()) == Ordering::Less {
            best = candidate;
        }
    }

    best
}

/// One-point tail exchange ("ripple") crossover.
///
/// Cut points are chosen independently in each parent, `i` in `0..m` and `j`
/// in `0..n`. The children are `first[..i] ++ second[j..]` and
/// `second[..j] ++ first[i..]`, so each has a length in `1..=m+n-1`.
/// Children longer than `length_cap` are truncated.
pub fn crossover<R: Rng>(
    first: &Genome,
    second: &Genome,
    length_cap: Option<usize>,
    rng: &mut R,
) -> (Genome, Genome) {
    let i = rng.gen_range(0..first.len());
    let j = rng.gen_range(0..second.len());

    let splice = |head: &[Codon], tail: &[Codon]| {
        let mut child = Vec::with_capacity(head.len() + tail.len());
        child.extend_from_slice(head);
        child.extend_from_slice(tail);
        if let Some(cap) = length_cap {
            child.truncate(cap.max(1));
        }
        Genome::from_nonempty(child)
    };

    (
        splice(&first[..i], &second[j..]),
        splice(&second[..j], &first[i..]),
    )
}

/// Mutation: replace each codon with probability `mutation_rate`
pub fn mutate<R: Rng>(genome: &mut Genome, mutation_rate: f64, codon_range: u32, rng: &mut R) {
    for codon in genome.codons_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *codon = rng.gen_range(0..codon_range);
        }
    }
}

/// Generate random genome with a length drawn from `lengths`
pub fn random_genome<R: Rng>(
    lengths: RangeInclusive<usize>,
    codon_range: u32,
    rng: &mut R,
) -> Genome {
    let length = rng.gen_range(lengths).max(1);
    Genome::from_nonempty((0..length).map(|_| rng.gen_range(0..codon_range)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::population::Evaluation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn individual(codon: u32, score: f64) -> Individual<()> {
        Individual {
            genome: Genome::new(vec![codon]).unwrap(),
            evaluation: Some(Evaluation {
                phenotype: Some(()),
                score,
                consumed: 1,
            }),
        }
    }

    #[test]
    fn test_tournament_covering_population_finds_best() {
        let population = vec![individual(0, 5.0), individual(1, 2.0), individual(2, 9.0)];
        let mut rng = StdRng::seed_from_u64(7);
        // Large tournaments almost surely contain the best individual
        for _ in 0..20 {
            let winner = tournament_selection(&population, 64, &mut rng);
            assert_eq!(winner.genome.codons(), &[1]);
        }
    }

    #[test]
    fn test_tournament_of_one_is_uniform_draw() {
        let population = vec![individual(0, 5.0), individual(1, 2.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 2];
        for _ in 0..100 {
            let winner = tournament_selection(&population, 1, &mut rng);
            seen[winner.genome.codons()[0] as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_crossover_length_cap() {
        let a = Genome::new(vec![1; 50]).unwrap();
        let b = Genome::new(vec![2; 50]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (c, d) = crossover(&a, &b, Some(30), &mut rng);
            assert!(c.len() <= 30 && d.len() <= 30);
            assert!(!c.is_empty() && !d.is_empty());
        }
    }

    #[test]
    fn test_mutate_full_rate_stays_in_range() {
        let mut genome = Genome::new(vec![1000; 64]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        mutate(&mut genome, 1.0, 4, &mut rng);
        assert_eq!(genome.len(), 64);
        assert!(genome.iter().all(|&c| c < 4));
    }

    #[test]
    fn test_mutate_zero_rate_is_identity() {
        let original = Genome::new(vec![7, 8, 9]).unwrap();
        let mut genome = original.clone();
        let mut rng = StdRng::seed_from_u64(5);
        mutate(&mut genome, 0.0, 256, &mut rng);
        assert_eq!(genome, original);
    }
}
