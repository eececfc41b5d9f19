use log::{debug, info};

use crate::animation::{AnimationScheduler, LedFrame};
use crate::color;
use crate::conditioner::{MotionConditioner, RawSample, Vector3};
use crate::config::{Config, ConfigError, Route};
use crate::estimators::{CrossingEstimator, DeviationEstimator};
use crate::submode::Submode;

/// Result of one engine tick, routed by the mode controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Frame computed by the motion pipeline.
    Leds(LedFrame),
    /// Working vector for the ball-physics collaborator.
    BallPhysics(Vector3),
    /// High-pass sample for the spectral collaborator.
    Spectral(i32),
}

/// Numeric readouts for the text display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readout {
    pub bpm_from_crossing: f32,
    pub bpm_from_tau: f32,
    pub activity: f32,
    pub best_lag: Option<usize>,
    pub period_ms: f32,
    /// An upward crossing happened within the last few ticks.
    pub recent_crossing: bool,
}

/// All mutable pipeline state for the active preset.
///
/// Switching presets replaces the whole value, so nothing from the previous
/// history survives into the next tick.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    config: Config,
    conditioner: MotionConditioner,
    deviation: DeviationEstimator,
    crossing: CrossingEstimator,
    animation: AnimationScheduler,
}

impl MotionEngine {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Engine for a built-in preset. Presets always validate.
    pub fn from_submode(submode: Submode) -> Self {
        let config = submode.config();
        debug_assert!(config.validate().is_ok(), "{} preset is invalid", submode.name());
        Self::build(config)
    }

    fn build(config: Config) -> Self {
        Self {
            config,
            conditioner: MotionConditioner::new(),
            deviation: DeviationEstimator::new(),
            crossing: CrossingEstimator::new(),
            animation: AnimationScheduler::new(),
        }
    }

    /// Replace all state with a fresh engine for `submode`.
    pub fn select(&mut self, submode: Submode) {
        info!("selecting {}", submode.name());
        *self = Self::from_submode(submode);
    }

    pub fn ingest(&mut self, raw: RawSample) {
        self.conditioner.ingest(raw, &self.config);
    }

    /// Run one tick. `now_us` is the mode clock used for LED stepping.
    pub fn tick(&mut self, now_us: u32) -> Step {
        let conditioned = self.conditioner.tick(&self.config);

        match self.config.route {
            Route::BallPhysics => Step::BallPhysics(conditioned.working),
            Route::Spectral => Step::Spectral(conditioned.high_pass as i32),
            Route::Motion => {
                self.deviation.update(self.conditioner.high_pass());
                self.crossing.update(conditioned.high_pass, conditioned.activity);

                let readout = self.readout();
                debug!(
                    "bpm_from_crossing {} bpm_from_tau {} lag {:?} activity {}",
                    readout.bpm_from_crossing,
                    readout.bpm_from_tau,
                    readout.best_lag,
                    readout.activity
                );

                let color = color::map(&self.config, &self.conditioner, self.crossing.bpm());
                self.animation.advance(
                    now_us,
                    self.crossing.period_ms(),
                    conditioned.activity,
                    &self.config,
                );
                Step::Leds(self.animation.render(color, &self.config))
            }
        }
    }

    pub fn readout(&self) -> Readout {
        Readout {
            bpm_from_crossing: self.crossing.bpm(),
            bpm_from_tau: self.deviation.bpm(),
            activity: self.conditioner.activity(),
            best_lag: self.deviation.best_lag(),
            period_ms: self.crossing.period_ms(),
            recent_crossing: self.crossing.recent_crossing(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn conditioner(&self) -> &MotionConditioner {
        &self.conditioner
    }

    pub fn deviation(&self) -> &DeviationEstimator {
        &self.deviation
    }

    pub fn crossing(&self) -> &CrossingEstimator {
        &self.crossing
    }

    pub fn animation(&self) -> &AnimationScheduler {
        &self.animation
    }
}
