use thiserror::Error;

/// Errors originating from the evaluation pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] mandelscope_core::CoreError),
}
