pub mod buffer;
pub mod clock;
pub mod error;
pub mod frame;
pub mod grid;
pub mod palette;
pub mod partition;
pub mod pool;

pub use buffer::RenderBuffer;
pub use clock::{FrameClock, MonotonicClock};
pub use error::RenderError;
pub use frame::{
    EngineState, FrameOrchestrator, FrameOutcome, FrameReport, FrameSink, InputSource, LoopState,
};
pub use grid::PixelGrid;
pub use palette::Palette;
pub use partition::Partition;
pub use pool::{EvalStats, WorkerPool};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
