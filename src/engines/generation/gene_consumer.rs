use crate::engines::generation::genome::Codon;
use crate::error::MappingFailure;

/// Deterministically consumes codons from a genome, wrapping around at the end.
///
/// The cursor restarts at zero each time it runs off the end of the genome and
/// the wrap counter goes up. Once the counter exceeds `max_wraps` every further
/// request fails, so a genome of length `L` yields at most `L * (max_wraps + 1)`
/// codons.
#[derive(Debug)]
pub struct GeneConsumer<'a> {
    genome: &'a [Codon],
    position: usize,
    wraps: usize,
    consumed: usize,
    max_wraps: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genome: &'a [Codon], max_wraps: usize) -> Self {
        Self {
            genome,
            position: 0,
            wraps: 0,
            consumed: 0,
            max_wraps,
        }
    }

    /// Consume next codon
    pub fn consume(&mut self) -> Result<Codon, MappingFailure> {
        if self.wraps > self.max_wraps || self.genome.is_empty() {
            return Err(MappingFailure::WrapLimitExceeded {
                consumed: self.consumed,
            });
        }

        let codon = self.genome[self.position];
        self.position += 1;
        self.consumed += 1;
        if self.position == self.genome.len() {
            self.position = 0;
            self.wraps += 1;
        }
        Ok(codon)
    }

    /// Consume a codon and map it to a choice index in `0..num_choices`.
    ///
    /// A single option still consumes a codon.
    pub fn choose(&mut self, num_choices: usize) -> Result<usize, MappingFailure> {
        if num_choices == 0 {
            return Err(MappingFailure::EmptyChoice {
                consumed: self.consumed,
            });
        }
        Ok(self.consume()? as usize % num_choices)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn wraps(&self) -> usize {
        self.wraps
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}
