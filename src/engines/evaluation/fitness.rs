use crate::error::Result;

/// Scores a phenotype; lower is better.
///
/// Returning an error marks the phenotype as failed. The engine never lets a
/// failure escape: errors and non-finite scores both become `+inf`.
pub trait Fitness<P>: Send + Sync {
    fn evaluate(&self, phenotype: &P) -> Result<f64>;
}

impl<P, F> Fitness<P> for F
where
    F: Fn(&P) -> f64 + Send + Sync,
{
    fn evaluate(&self, phenotype: &P) -> Result<f64> {
        Ok(self(phenotype))
    }
}

/// Evaluate and fold every kind of failure into `+inf`
pub fn sanitized_score<P, F: Fitness<P> + ?Sized>(fitness: &F, phenotype: &P) -> f64 {
    match fitness.evaluate(phenotype) {
        Ok(score) if score.is_finite() => score,
        Ok(_) => f64::INFINITY,
        Err(e) => {
            log::trace!("Evaluation failed: {}", e);
            f64::INFINITY
        }
    }
}
