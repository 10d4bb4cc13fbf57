use crate::engines::evaluation::fitness::Fitness;
use crate::error::{GevoError, Result};
use crate::types::{Bindings, Expr};
use rand::Rng;
use std::ops::Range;

/// L1 error of an expression over sampled `(x, f(x))` points
#[derive(Debug, Clone)]
pub struct SymbolicRegression {
    variable: String,
    samples: Vec<(f64, f64)>,
}

impl SymbolicRegression {
    pub fn new(variable: &str, samples: Vec<(f64, f64)>) -> Self {
        Self {
            variable: variable.to_string(),
            samples,
        }
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    /// Predictions of `expr` at every sample point
    pub fn predict(&self, expr: &Expr) -> Result<Vec<f64>> {
        let mut bindings = Bindings::new();
        self.samples
            .iter()
            .map(|&(x, _)| {
                bindings.insert(self.variable.clone(), x);
                expr.eval(&bindings)
            })
            .collect()
    }
}

impl Fitness<Expr> for SymbolicRegression {
    fn evaluate(&self, expr: &Expr) -> Result<f64> {
        let mut error = 0.0;
        for (&(_, expected), predicted) in self.samples.iter().zip(self.predict(expr)?) {
            if !predicted.is_finite() {
                return Err(GevoError::Evaluation(format!(
                    "Non-finite prediction for {}",
                    expr
                )));
            }
            error += (expected - predicted).abs();
        }
        Ok(error)
    }
}

/// Sample `n` distinct points of `f` with `x` drawn uniformly from `range`
pub fn sample_points<F, R>(f: F, n: usize, range: Range<f64>, rng: &mut R) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(n);
    while points.len() < n {
        let x = rng.gen_range(range.clone());
        if points.iter().all(|&(seen, _)| seen != x) {
            points.push((x, f(x)));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BinaryOp;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn target() -> SymbolicRegression {
        SymbolicRegression::new("x", vec![(1.0, 2.0), (2.0, 6.0), (3.0, 12.0)])
    }

    #[test]
    fn test_exact_expression_scores_zero() {
        // x * x + x
        let expr = Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Mul, Expr::var("x"), Expr::var("x")),
            Expr::var("x"),
        );
        assert_eq!(target().evaluate(&expr).unwrap(), 0.0);
    }

    #[test]
    fn test_l1_error() {
        // |2-1| + |6-2| + |12-3|
        assert_eq!(target().evaluate(&Expr::var("x")).unwrap(), 14.0);
    }

    #[test]
    fn test_division_by_zero_fails() {
        let expr = Expr::binary(
            BinaryOp::Div,
            Expr::var("x"),
            Expr::binary(BinaryOp::Sub, Expr::var("x"), Expr::var("x")),
        );
        assert!(target().evaluate(&expr).is_err());
    }

    #[test]
    fn test_sample_points_distinct() {
        let mut rng = StdRng::seed_from_u64(9);
        let points = sample_points(|x| x * x + x, 5, -1.0..1.0, &mut rng);
        assert_eq!(points.len(), 5);
        for &(x, y) in &points {
            assert!((-1.0..1.0).contains(&x));
            assert_eq!(y, x * x + x);
        }
    }
}
