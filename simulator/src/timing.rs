//! Timing constants for the simulator.
//!
//! `std::time::Duration` is not available in `no_std`, so frame timing lives
//! here rather than in the library. The demo feed's cadence constants assume
//! this frame time (50 ticks per second).

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);
