use crate::engines::generation::grammar::{Derivation, Grammar, Step};
use crate::types::{BinaryOp, Expr, Terminal};

/// Infix arithmetic over binary operators:
///
/// ```text
/// exp    -> binary | var
/// binary -> op exp exp
/// var    -> terminal
/// ```
///
/// `exp` is a two-way choice, `binary` first picks its operator and then
/// expands both operands left to right, `var` picks one terminal.
#[derive(Debug, Clone)]
pub struct ArithmeticGrammar {
    terminals: Vec<Terminal>,
    operators: Vec<BinaryOp>,
}

impl ArithmeticGrammar {
    pub fn new(terminals: Vec<Terminal>, operators: Vec<BinaryOp>) -> Self {
        Self { terminals, operators }
    }

    /// Single variable plus the constant one, e.g. `x`, `1`
    pub fn univariate(variable: &str, operators: &[BinaryOp]) -> Self {
        Self::new(
            vec![Terminal::Var(variable.to_string()), Terminal::Const(1.0)],
            operators.to_vec(),
        )
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn operators(&self) -> &[BinaryOp] {
        &self.operators
    }
}

impl Grammar for ArithmeticGrammar {
    type Phenotype = Expr;
    type Derivation = ArithmeticDerivation;

    fn start(&self) -> ArithmeticDerivation {
        ArithmeticDerivation {
            terminals: self.terminals.clone(),
            operators: self.operators.clone(),
            tasks: vec![Task::Expand(Symbol::Exp)],
            operands: Vec::new(),
            awaiting: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Exp,
    Binary,
    Var,
}

#[derive(Debug, Clone, Copy)]
enum Task {
    Expand(Symbol),
    /// Both operands are on the operand stack; combine them
    Reduce(BinaryOp),
}

/// An in-flight derivation of [`ArithmeticGrammar`]
#[derive(Debug)]
pub struct ArithmeticDerivation {
    terminals: Vec<Terminal>,
    operators: Vec<BinaryOp>,
    tasks: Vec<Task>,
    operands: Vec<Expr>,
    awaiting: Option<Symbol>,
}

impl ArithmeticDerivation {
    fn options(&self, symbol: Symbol) -> usize {
        match symbol {
            Symbol::Exp => 2,
            Symbol::Binary => self.operators.len(),
            Symbol::Var => self.terminals.len(),
        }
    }

    fn apply(&mut self, symbol: Symbol, choice: usize) {
        match symbol {
            Symbol::Exp => {
                let next = if choice == 0 { Symbol::Binary } else { Symbol::Var };
                self.tasks.push(Task::Expand(next));
            }
            Symbol::Binary => {
                // Popped in reverse: left operand, right operand, then reduce
                self.tasks.push(Task::Reduce(self.operators[choice]));
                self.tasks.push(Task::Expand(Symbol::Exp));
                self.tasks.push(Task::Expand(Symbol::Exp));
            }
            Symbol::Var => {
                self.operands.push(Expr::Terminal(self.terminals[choice].clone()));
            }
        }
    }
}

impl Derivation for ArithmeticDerivation {
    type Output = Expr;

    fn resume(&mut self, choice: Option<usize>) -> Step<Expr> {
        if let (Some(symbol), Some(choice)) = (self.awaiting.take(), choice) {
            self.apply(symbol, choice);
        }

        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Expand(symbol) => {
                    self.awaiting = Some(symbol);
                    return Step::Choose(self.options(symbol));
                }
                Task::Reduce(op) => {
                    if let (Some(rhs), Some(lhs)) = (self.operands.pop(), self.operands.pop()) {
                        self.operands.push(Expr::binary(op, lhs, rhs));
                    }
                }
            }
        }

        match self.operands.pop() {
            Some(expr) => Step::Done(expr),
            // Only reachable when resumed after completion
            None => Step::Choose(self.options(Symbol::Exp)),
        }
    }

    fn depth(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::GrammarMapper;

    fn grammar() -> ArithmeticGrammar {
        ArithmeticGrammar::univariate("x", &[BinaryOp::Add, BinaryOp::Mul, BinaryOp::Div])
    }

    #[test]
    fn test_single_variable() {
        // exp -> var (1), var -> x (0)
        let mapper = GrammarMapper::new(grammar(), 0);
        let mapped = mapper.decode(&[1, 0]).unwrap();
        assert_eq!(mapped.phenotype.to_string(), "x");
        assert_eq!(mapped.consumed, 2);
    }

    #[test]
    fn test_binary_expansion_order() {
        // exp -> binary, op -> *, exp -> var -> x, exp -> binary, op -> +,
        // exp -> var -> x, exp -> var -> 1
        let codons = [0, 1, 1, 0, 0, 0, 1, 0, 1, 1];
        let mapper = GrammarMapper::new(grammar(), 0);
        let mapped = mapper.decode(&codons).unwrap();
        assert_eq!(mapped.phenotype.to_string(), "(x * (x + 1))");
        assert_eq!(mapped.consumed, codons.len());
    }

    #[test]
    fn test_all_binary_never_completes() {
        let mapper = GrammarMapper::new(grammar(), 3);
        assert!(mapper.decode(&[0, 0]).is_err());
    }

    #[test]
    fn test_depth_counts_pending_symbols() {
        let mapper = GrammarMapper::new(grammar(), 50).with_max_depth(3);
        // Every exp chooses binary, pending symbols pile up
        assert!(matches!(
            mapper.decode(&[0]),
            Err(crate::error::MappingFailure::DepthExceeded { .. })
        ));
    }
}
