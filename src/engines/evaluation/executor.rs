use crate::config::ExecutionConfig;
use crate::error::{GevoError, Result};
use rayon::prelude::*;

/// Ordered map over a batch of work items.
///
/// Implementations may run `f` in any order or concurrently, but the output
/// must line up positionally with `items`.
pub trait Executor: Send + Sync {
    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync;
}

/// Runs everything on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        items.iter().map(f).collect()
    }
}

/// Rayon-backed executor, on the global pool or a dedicated one
#[derive(Debug, Default)]
pub struct Parallel {
    pool: Option<rayon::ThreadPool>,
}

impl Parallel {
    pub fn new() -> Self {
        Self { pool: None }
    }

    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("gramevo-eval-{}", i))
            .build()
            .map_err(|e| GevoError::Configuration(format!("Failed to build thread pool: {}", e)))?;
        Ok(Self { pool: Some(pool) })
    }
}

impl Executor for Parallel {
    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.par_iter().map(&f).collect(),
        }
    }
}

/// Executor chosen at runtime from [`ExecutionConfig`]
#[derive(Debug)]
pub enum ConfiguredExecutor {
    Sequential(Sequential),
    Parallel(Parallel),
}

impl ConfiguredExecutor {
    pub fn from_config(config: &ExecutionConfig) -> Result<Self> {
        if !config.parallel {
            return Ok(ConfiguredExecutor::Sequential(Sequential));
        }
        let parallel = match config.threads {
            Some(threads) => Parallel::with_threads(threads)?,
            None => Parallel::new(),
        };
        Ok(ConfiguredExecutor::Parallel(parallel))
    }
}

impl Executor for ConfiguredExecutor {
    fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match self {
            ConfiguredExecutor::Sequential(executor) => executor.map(items, f),
            ConfiguredExecutor::Parallel(executor) => executor.map(items, f),
        }
    }
}
