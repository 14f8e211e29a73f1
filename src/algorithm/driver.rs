use crate::algorithm::engine::{EngineState, SynthesisConfig, SynthesisEngine};
use crate::io::configuration::{MAX_STEPS_PER_BATCH, MIN_STEPS_PER_BATCH};
use crate::io::error::Result;

/// Outcome of one scheduling quantum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Pixels committed during the tick
    pub steps: usize,
    /// Whether another tick would do more work
    pub more_work: bool,
}

/// Advances an engine a bounded number of steps per scheduling quantum
///
/// Decoupled from any timer or frame callback: whoever owns the schedule
/// calls [`BatchDriver::tick`] once per quantum and yields in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchDriver {
    steps_per_batch: usize,
}

impl BatchDriver {
    /// Create a driver; the batch size is clamped to the accepted range
    pub fn new(steps_per_batch: usize) -> Self {
        Self {
            steps_per_batch: steps_per_batch.clamp(MIN_STEPS_PER_BATCH, MAX_STEPS_PER_BATCH),
        }
    }

    /// Create a driver using the batch size of a configuration
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.steps_per_batch)
    }

    /// Steps attempted per tick
    pub const fn steps_per_batch(&self) -> usize {
        self.steps_per_batch
    }

    /// Change the speed; takes effect on the next tick
    pub fn set_steps_per_batch(&mut self, steps_per_batch: usize) {
        self.steps_per_batch = steps_per_batch.clamp(MIN_STEPS_PER_BATCH, MAX_STEPS_PER_BATCH);
    }

    /// Run one quantum of at most `steps_per_batch` steps
    ///
    /// A paused engine is left alone and reported as still having work.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine has not been started or a step fails
    pub fn tick(&self, engine: &mut SynthesisEngine) -> Result<TickReport> {
        if engine.state() == EngineState::Paused {
            return Ok(TickReport {
                steps: 0,
                more_work: true,
            });
        }

        let before = engine.steps_taken();
        let mut more_work = !engine.is_complete();
        for _ in 0..self.steps_per_batch {
            more_work = engine.step()?;
            if !more_work {
                break;
            }
        }

        Ok(TickReport {
            steps: engine.steps_taken() - before,
            more_work,
        })
    }

    /// Tick until the engine completes or is paused by the observer
    ///
    /// The observer sees the engine after every tick, which is where
    /// renderers and progress displays hook in. Returns the number of
    /// pixels committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine has not been started or a step fails
    pub fn run_to_completion<F>(&self, engine: &mut SynthesisEngine, mut observer: F) -> Result<usize>
    where
        F: FnMut(&mut SynthesisEngine, TickReport),
    {
        let before = engine.steps_taken();
        loop {
            let report = self.tick(engine)?;
            observer(engine, report);
            if !report.more_work || engine.state() == EngineState::Paused {
                break;
            }
        }
        Ok(engine.steps_taken() - before)
    }
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::from_config(&SynthesisConfig::default())
    }
}
