//! Physics clock: turns elapsed wall time into physics updates
//!
//! Two modes:
//! - `Variable`: one update per frame with `dt = min(elapsed, max_dt)`
//! - `Fixed`: an accumulator drained in constant `step` sized updates, at
//!   most `max_substeps` per frame. Backlog beyond that is dropped so a long
//!   pause never turns into a burst of catch-up updates.

use log::{debug, warn};

use super::error::{positive, SimError};

/// Default variable-step ceiling
pub const DEFAULT_MAX_DT: f64 = 1.0 / 30.0;

/// Default fixed-step catch-up limit per frame
pub const DEFAULT_MAX_SUBSTEPS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    Variable { max_dt: f64 },
    Fixed { step: f64, max_substeps: u32 },
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::Variable { max_dt: DEFAULT_MAX_DT }
    }
}

impl ClockMode {
    pub fn validate(&self) -> Result<(), SimError> {
        match *self {
            ClockMode::Variable { max_dt } => positive("max_dt", max_dt).map(|_| ()),
            ClockMode::Fixed { step, max_substeps } => {
                positive("step", step)?;
                if max_substeps == 0 {
                    return Err(SimError::InvalidParameter { name: "max_substeps", value: 0.0 });
                }
                Ok(())
            }
        }
    }
}

/// Updates to run for one frame: `count` updates of `dt` seconds each
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticks {
    pub dt: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsClock {
    mode: ClockMode,
    accumulator: f64,
}

impl PhysicsClock {
    pub fn new(mode: ClockMode) -> Result<Self, SimError> {
        mode.validate()?;
        Ok(Self { mode, accumulator: 0.0 })
    }

    /// Unconsumed time carried to the next frame (fixed mode only)
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Feed `elapsed` seconds of wall time and get the updates to run
    ///
    /// Negative or non-finite input counts as no time passing.
    pub fn advance(&mut self, elapsed: f64) -> Ticks {
        let elapsed = if elapsed.is_finite() && elapsed >= 0.0 {
            elapsed
        } else {
            warn!("ignoring invalid frame delta {elapsed}");
            0.0
        };

        match self.mode {
            ClockMode::Variable { max_dt } => Ticks { dt: elapsed.min(max_dt), count: 1 },
            ClockMode::Fixed { step, max_substeps } => {
                self.accumulator += elapsed;
                let mut count = 0;
                while self.accumulator >= step && count < max_substeps {
                    self.accumulator -= step;
                    count += 1;
                }
                if self.accumulator >= step {
                    debug!("dropping {:.4}s of physics backlog", self.accumulator);
                    self.accumulator %= step;
                }
                Ticks { dt: step, count }
            }
        }
    }
}
