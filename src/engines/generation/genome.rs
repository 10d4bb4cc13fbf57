use crate::error::{GevoError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A single integer unit of a genome
pub type Codon = u32;

/// Genome representation for grammatical evolution
///
/// A genome is a non-empty sequence of codons that deterministically maps to a
/// phenotype through a grammar. Each codon is consumed by the mapper to resolve
/// one choice point, taking `codon % option_count`; the magnitude carries no
/// other meaning.
///
/// Genetic operators work on the linear codon sequence: crossover splices
/// slices, mutation replaces single codons. Offspring are always fresh copies.
///
/// # Example
///
/// ```
/// use gramevo::engines::generation::Genome;
///
/// let genome = Genome::new(vec![42, 17, 88, 3]).unwrap();
/// assert_eq!(genome.len(), 4);
/// assert!(Genome::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Codon>", into = "Vec<Codon>")]
pub struct Genome(Vec<Codon>);

impl Genome {
    pub fn new(codons: Vec<Codon>) -> Result<Self> {
        if codons.is_empty() {
            return Err(GevoError::InvalidGenome(
                "A genome must contain at least one codon".to_string(),
            ));
        }
        Ok(Self(codons))
    }

    /// Caller guarantees `codons` is non-empty
    pub(crate) fn from_nonempty(codons: Vec<Codon>) -> Self {
        debug_assert!(!codons.is_empty());
        Self(codons)
    }

    pub fn codons(&self) -> &[Codon] {
        &self.0
    }

    /// Mutable access to codon values. The length cannot change through this.
    pub fn codons_mut(&mut self) -> &mut [Codon] {
        &mut self.0
    }

    pub fn into_codons(self) -> Vec<Codon> {
        self.0
    }
}

impl Deref for Genome {
    type Target = [Codon];

    fn deref(&self) -> &[Codon] {
        &self.0
    }
}

impl TryFrom<Vec<Codon>> for Genome {
    type Error = GevoError;

    fn try_from(codons: Vec<Codon>) -> Result<Self> {
        Genome::new(codons)
    }
}

impl From<Genome> for Vec<Codon> {
    fn from(genome: Genome) -> Self {
        genome.0
    }
}
