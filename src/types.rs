use crate::error::{GevoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Variable name -> value, used when evaluating an expression
pub type Bindings = HashMap<String, f64>;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Sub => Ok(lhs - rhs),
            BinaryOp::Mul => Ok(lhs * rhs),
            BinaryOp::Div => {
                if rhs == 0.0 {
                    Err(GevoError::Evaluation("Division by zero".to_string()))
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

/// Leaf of an expression: a named variable or a numeric constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Terminal {
    Var(String),
    Const(f64),
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Var(name) => write!(f, "{}", name),
            Terminal::Const(value) => write!(f, "{}", value),
        }
    }
}

/// Abstract Syntax Tree of an arithmetic phenotype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Terminal(Terminal),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::Terminal(Terminal::Var(name.to_string()))
    }

    pub fn constant(value: f64) -> Self {
        Expr::Terminal(Terminal::Const(value))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate against variable bindings
    pub fn eval(&self, bindings: &Bindings) -> Result<f64> {
        match self {
            Expr::Terminal(Terminal::Const(value)) => Ok(*value),
            Expr::Terminal(Terminal::Var(name)) => bindings.get(name).copied().ok_or_else(|| {
                GevoError::Evaluation(format!("Unbound variable: {}", name))
            }),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(bindings)?;
                let rhs = rhs.eval(bindings)?;
                op.apply(lhs, rhs)
            }
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Expr::Terminal(_) => 1,
            Expr::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Expr::Terminal(_) => 1,
            Expr::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Terminal(terminal) => write!(f, "{}", terminal),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}
