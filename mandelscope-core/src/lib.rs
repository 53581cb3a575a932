pub mod complex;
pub mod config;
pub mod control;
pub mod error;
pub mod escape;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use config::EngineConfig;
pub use control::{Flow, InputEvent, ViewportController, PAN_RATE, ZOOM_FACTOR};
pub use error::CoreError;
pub use escape::{EscapeTime, IterationBudget};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
