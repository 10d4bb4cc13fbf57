pub mod executor;
pub mod fitness;
pub mod symbolic;

pub use executor::{ConfiguredExecutor, Executor, Parallel, Sequential};
pub use fitness::{sanitized_score, Fitness};
pub use symbolic::{sample_points, SymbolicRegression};
