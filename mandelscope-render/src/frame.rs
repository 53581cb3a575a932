use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, warn};

use mandelscope_core::{EngineConfig, Flow, InputEvent, IterationBudget, Viewport, ViewportController};

use crate::clock::{delta_seconds, FrameClock};
use crate::grid::PixelGrid;
use crate::pool::WorkerPool;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Supplies the input events that arrived since the last frame.
pub trait InputSource {
    /// Next pending event, or `None` once this frame's events are drained.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

/// Receives each completed grid for display.
pub trait FrameSink {
    fn present(&mut self, grid: &PixelGrid);
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the frame loop mutates: the view, the budget, and the grid.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub viewport: Viewport,
    pub budget: IterationBudget,
    grid: PixelGrid,
}

impl EngineState {
    pub fn new(config: &EngineConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport,
            budget: config.max_iterations,
            grid: PixelGrid::new(config.width, config.height)?,
        })
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Summary of one presented frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameReport {
    pub frame: u64,
    pub delta_time: f64,
    pub max_iterations: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
pub enum FrameOutcome {
    /// The grid was fully recomputed and handed to the sink.
    Presented(FrameReport),
    /// The workers could not be started; nothing was presented.
    Skipped,
    /// The loop had already terminated; nothing was done.
    Terminated,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the per-frame sequence: clock, input, evaluation, presentation.
pub struct FrameOrchestrator {
    state: EngineState,
    pool: WorkerPool,
    loop_state: LoopState,
    last_tick: Option<u64>,
    frames: u64,
}

impl FrameOrchestrator {
    pub fn new(config: &EngineConfig) -> crate::Result<Self> {
        Self::with_pool(config, WorkerPool::new(config.workers))
    }

    /// Like [`FrameOrchestrator::new`], but evaluating on `pool`.
    pub fn with_pool(config: &EngineConfig, pool: WorkerPool) -> crate::Result<Self> {
        let state = EngineState::new(config)?;
        info!(
            width = config.width,
            height = config.height,
            workers = config.workers,
            max_iterations = config.max_iterations.get(),
            "Engine ready"
        );
        Ok(Self {
            state,
            pool,
            loop_state: LoopState::Running,
            last_tick: None,
            frames: 0,
        })
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_running(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one iteration of the frame loop.
    ///
    /// The elapsed time is measured from the previous call (from the first
    /// clock reading on the first call). All pending input is applied before
    /// the grid is evaluated, and the grid reaches `sink` only once every
    /// worker has finished. A quit event ends the loop after this frame.
    pub fn step<I, C, S>(&mut self, input: &mut I, clock: &C, sink: &mut S) -> FrameOutcome
    where
        I: InputSource + ?Sized,
        C: FrameClock + ?Sized,
        S: FrameSink + ?Sized,
    {
        if self.loop_state == LoopState::Terminated {
            return FrameOutcome::Terminated;
        }

        let now = clock.ticks();
        let last = self.last_tick.replace(now).unwrap_or(now);
        let delta_time = delta_seconds(last, now, clock.frequency());

        let flow = ViewportController::new(
            &mut self.state.viewport,
            &mut self.state.budget,
            delta_time,
        )
        .apply_all(std::iter::from_fn(|| input.poll_event()));
        if flow == Flow::Quit {
            info!("Quit requested");
            self.loop_state = LoopState::Terminated;
        }

        let stats = match self.pool.evaluate(
            &self.state.viewport,
            self.state.budget,
            &mut self.state.grid,
        ) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Frame skipped: {e}");
                return FrameOutcome::Skipped;
            }
        };

        sink.present(&self.state.grid);
        self.frames += 1;

        let report = FrameReport {
            frame: self.frames,
            delta_time,
            max_iterations: self.state.budget.get(),
            elapsed: stats.elapsed,
        };
        debug!(
            frame = report.frame,
            delta_time,
            max_iterations = report.max_iterations,
            elapsed_ms = report.elapsed.as_millis(),
            "Frame presented"
        );
        FrameOutcome::Presented(report)
    }

    /// Step until a quit event arrives. Returns the number of frames presented.
    pub fn run<I, C, S>(&mut self, input: &mut I, clock: &C, sink: &mut S) -> u64
    where
        I: InputSource + ?Sized,
        C: FrameClock + ?Sized,
        S: FrameSink + ?Sized,
    {
        while self.is_running() {
            self.step(input, clock, sink);
        }
        info!(frames = self.frames, "Frame loop finished");
        self.frames
    }
}
