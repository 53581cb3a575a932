use std::time::{Duration, Instant};

use tracing::{debug, info};

use mandelscope_core::{EscapeTime, IterationBudget, Viewport};

use crate::grid::PixelGrid;
use crate::partition::Partition;

/// Builds the thread pool for a given worker count.
type PoolBuilder =
    dyn Fn(usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> + Send + Sync;

/// Timing for one full-grid evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvalStats {
    pub elapsed: Duration,
    pub slices: usize,
}

/// A persistent pool of worker threads, one per interleaved slice.
///
/// The threads are started lazily on the first evaluation and reused for
/// every frame after that. If starting them fails, the evaluation returns
/// an error and the next call tries again.
pub struct WorkerPool {
    partition: Partition,
    builder: Box<PoolBuilder>,
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self::with_builder(workers, build_threads)
    }

    /// Like [`WorkerPool::new`], but threads are started by `builder`, which
    /// receives the worker count.
    pub fn with_builder(
        workers: usize,
        builder: impl Fn(usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            partition: Partition::new(workers),
            builder: Box::new(builder),
            pool: None,
        }
    }

    /// `true` once the worker threads are running.
    #[cfg(test)]
    pub(crate) fn is_started(&self) -> bool {
        self.pool.is_some()
    }

    fn threads(&mut self) -> crate::Result<&rayon::ThreadPool> {
        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => {
                let workers = self.partition.slices();
                let pool = (self.builder)(workers)?;
                info!(workers, "Worker pool started");
                pool
            }
        };
        Ok(&*self.pool.insert(pool))
    }

    /// Recompute every cell of `grid` for `viewport` and `budget`.
    ///
    /// Each slice's columns are written by exactly one task, and the call
    /// returns only after every task has finished. On error the grid is
    /// left untouched.
    pub fn evaluate(
        &mut self,
        viewport: &Viewport,
        budget: IterationBudget,
        grid: &mut PixelGrid,
    ) -> crate::Result<EvalStats> {
        let partition = self.partition;
        let pool = self.threads()?;
        let start = Instant::now();

        let (width, height) = (grid.width(), grid.height());
        let escape = EscapeTime::new(budget);
        let escape = &escape;

        let mut columns: Vec<(u32, &mut [f64])> = grid.columns_mut().collect();
        partition.arrange(&mut columns);

        pool.scope(|s| {
            for run in partition.runs(&mut columns) {
                s.spawn(move |_| {
                    for (x, column) in run.iter_mut() {
                        let x = *x;
                        for (y, cell) in column.iter_mut().enumerate() {
                            let c = viewport.pixel_to_complex(x, y as u32, width, height);
                            *cell = escape.fraction(c);
                        }
                    }
                });
            }
        });

        let elapsed = start.elapsed();
        debug!(
            elapsed_ms = elapsed.as_millis(),
            slices = partition.slices(),
            max_iterations = budget.get(),
            "Grid evaluated"
        );
        Ok(EvalStats {
            elapsed,
            slices: partition.slices(),
        })
    }
}

fn build_threads(workers: usize) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("escape-worker-{i}"))
        .build()
}
