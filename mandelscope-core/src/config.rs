use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::escape::IterationBudget;
use crate::viewport::Viewport;

/// Startup configuration for the engine.
///
/// Every field has a serde default, so a partial (or empty) JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid width in pixels. Fixed for the lifetime of the process.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Grid height in pixels. Fixed for the lifetime of the process.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Number of worker threads, which is also the number of interleaved slices.
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub max_iterations: IterationBudget,
    #[serde(default)]
    pub viewport: Viewport,
}

impl EngineConfig {
    pub const DEFAULT_WIDTH: u32 = 720;
    pub const DEFAULT_HEIGHT: u32 = 480;
    pub const DEFAULT_WORKERS: usize = 32;

    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.workers == 0 {
            return Err(CoreError::InvalidWorkerCount(self.workers));
        }
        self.viewport.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            workers: default_workers(),
            max_iterations: IterationBudget::default(),
            viewport: Viewport::default(),
        }
    }
}

fn default_width() -> u32 {
    EngineConfig::DEFAULT_WIDTH
}
fn default_height() -> u32 {
    EngineConfig::DEFAULT_HEIGHT
}
fn default_workers() -> usize {
    EngineConfig::DEFAULT_WORKERS
}
