//! Ready-made grammars
pub mod arithmetic;

pub use arithmetic::{ArithmeticDerivation, ArithmeticGrammar};
