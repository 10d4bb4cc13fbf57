use gramevo::engines::generation::operators::{crossover, mutate, random_genome};
use gramevo::engines::generation::Genome;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn genome_strategy() -> impl Strategy<Value = Genome> {
    prop::collection::vec(any::<u32>(), 1..64).prop_map(|codons| Genome::new(codons).unwrap())
}

proptest! {
    #[test]
    fn mutation_preserves_length(genome in genome_strategy(), rate in 0.0f64..=1.0, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mutated = genome.clone();
        mutate(&mut mutated, rate, 256, &mut rng);
        prop_assert_eq!(mutated.len(), genome.len());
    }

    #[test]
    fn crossover_lengths_are_bounded(a in genome_strategy(), b in genome_strategy(), seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (c, d) = crossover(&a, &b, None, &mut rng);
        let max = a.len() + b.len() - 1;
        for child in [&c, &d] {
            prop_assert!(child.len() >= 1 && child.len() <= max);
        }
        // Together the children hold every codon of both parents
        prop_assert_eq!(c.len() + d.len(), a.len() + b.len());
    }

    #[test]
    fn crossover_children_are_copies(a in genome_strategy(), b in genome_strategy(), seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (c, _) = crossover(&a, &b, None, &mut rng);
        prop_assert!(!std::ptr::eq(c.codons().as_ptr(), a.codons().as_ptr()));
        prop_assert!(!std::ptr::eq(c.codons().as_ptr(), b.codons().as_ptr()));
    }

    #[test]
    fn random_genomes_respect_bounds(min in 1usize..20, extra in 0usize..20, range in 1u32..1000, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = random_genome(min..=min + extra, range, &mut rng);
        prop_assert!(genome.len() >= min && genome.len() <= min + extra);
        prop_assert!(genome.iter().all(|&c| c < range));
    }
}

#[test]
fn empty_genome_is_rejected() {
    assert!(Genome::new(Vec::new()).is_err());
    assert!(serde_json::from_str::<Genome>("[]").is_err());
    assert_eq!(
        serde_json::from_str::<Genome>("[1,2]").unwrap().codons(),
        &[1, 2]
    );
}
