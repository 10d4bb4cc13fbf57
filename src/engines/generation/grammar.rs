//! The grammar protocol driven by the mapper.
//!
//! A grammar is a factory of derivations. A derivation is a suspended
//! production procedure: each call to [`Derivation::resume`] either asks for a
//! choice among `n` options or finishes with a phenotype. The mapper answers
//! every request with one codon and knows nothing else about the grammar.

/// What a derivation wants next
#[derive(Debug, Clone, PartialEq)]
pub enum Step<P> {
    /// Request a choice index in `0..n`
    Choose(usize),
    /// Derivation complete
    Done(P),
}

/// One in-flight run of a grammar.
pub trait Derivation {
    type Output;

    /// Advance the derivation.
    ///
    /// `choice` is `None` on the first call and afterwards carries the answer
    /// to the previous [`Step::Choose`] request. Calling `resume` again after
    /// [`Step::Done`] is a caller error.
    fn resume(&mut self, choice: Option<usize>) -> Step<Self::Output>;

    /// Number of incomplete symbols currently held. Used for the optional
    /// depth bound; grammars that do not track it report zero.
    fn depth(&self) -> usize {
        0
    }
}

/// A grammar: produces a fresh derivation for every mapping.
///
/// Implementations must be stateless across calls to `start`; the mapper calls
/// it once per genome per generation, possibly from several threads.
pub trait Grammar: Send + Sync {
    type Phenotype;
    type Derivation: Derivation<Output = Self::Phenotype>;

    fn start(&self) -> Self::Derivation;
}

impl<G: Grammar + ?Sized> Grammar for &G {
    type Phenotype = G::Phenotype;
    type Derivation = G::Derivation;

    fn start(&self) -> Self::Derivation {
        (**self).start()
    }
}
