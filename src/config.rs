use crate::HISTORY_LEN;
use crate::animation::{DisplayMethod, LED_COUNT};
use crate::color::ColorStrategy;
use crate::filters::validate_alpha;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidAlpha,
    InvalidLookback,
    InvalidVisibleLeds,
    InvalidRevsPerBeat,
    InvalidScale,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidAlpha => write!(f, "filter alpha must be in range (0.0, 1.0]"),
            ConfigError::InvalidLookback => {
                write!(f, "lookback must be between 1 and {}", HISTORY_LEN)
            }
            ConfigError::InvalidVisibleLeds => {
                write!(f, "visible_leds must be between 1 and {}", LED_COUNT)
            }
            ConfigError::InvalidRevsPerBeat => write!(f, "revs_per_beat must be positive"),
            ConfigError::InvalidScale => write!(f, "scale must be positive"),
        }
    }
}

/// Where a tick's conditioned motion goes after the shared conditioning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Estimators, colour mapper and animation scheduler drive the LEDs.
    Motion,
    /// The working x/y/z vector goes to the ball-physics collaborator.
    BallPhysics,
    /// The high-pass sample goes to the spectral collaborator.
    Spectral,
}

/// Parameters for one pipeline instance.
///
/// Immutable once the engine is built; switching presets builds a new engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Subtract a slow per-axis average from raw samples.
    pub high_pass: bool,
    /// Smooth each axis after the optional high-pass.
    pub smooth: bool,
    /// Smooth the norm with the fast filter (otherwise passthrough).
    pub filter_all: bool,
    pub alpha_slow: f32,
    pub alpha_smooth: f32,
    /// Samples averaged per axis by [`ColorStrategy::AxisEnergy`].
    pub lookback: usize,
    /// Colour intensity multiplier.
    pub scale: f32,
    pub color: ColorStrategy,
    pub display: DisplayMethod,
    /// Rotate the lit LEDs around the ring in time with the tempo.
    pub shift_leds: bool,
    /// Rotate the rainbow hue offset in time with the tempo.
    pub shift_color_wheel: bool,
    pub visible_leds: usize,
    /// Zero two of three channels each tick, rotating the kept one.
    pub strobe: bool,
    pub sub_frames: u8,
    pub revs_per_beat: f32,
    pub route: Route,
}

impl Config {
    /// Canonical record every preset starts from.
    pub const DEFAULT: Config = Config {
        high_pass: true,
        smooth: true,
        filter_all: true,
        alpha_slow: 0.02,
        alpha_smooth: 0.3,
        lookback: 1,
        scale: 2.0,
        color: ColorStrategy::TempoActivity,
        display: DisplayMethod::Rainbow,
        shift_leds: false,
        shift_color_wheel: true,
        visible_leds: LED_COUNT,
        strobe: false,
        sub_frames: 6,
        revs_per_beat: 1.0,
        route: Route::Motion,
    };

    /// Apply a set of overrides on top of this record.
    pub const fn with(self, overrides: &Overrides) -> Self {
        let mut config = self;
        if let Some(v) = overrides.high_pass {
            config.high_pass = v;
        }
        if let Some(v) = overrides.smooth {
            config.smooth = v;
        }
        if let Some(v) = overrides.filter_all {
            config.filter_all = v;
        }
        if let Some(v) = overrides.lookback {
            config.lookback = v;
        }
        if let Some(v) = overrides.scale {
            config.scale = v;
        }
        if let Some(v) = overrides.color {
            config.color = v;
        }
        if let Some(v) = overrides.display {
            config.display = v;
        }
        if let Some(v) = overrides.shift_leds {
            config.shift_leds = v;
        }
        if let Some(v) = overrides.shift_color_wheel {
            config.shift_color_wheel = v;
        }
        if let Some(v) = overrides.visible_leds {
            config.visible_leds = v;
        }
        if let Some(v) = overrides.strobe {
            config.strobe = v;
        }
        if let Some(v) = overrides.revs_per_beat {
            config.revs_per_beat = v;
        }
        if let Some(v) = overrides.route {
            config.route = v;
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if validate_alpha(self.alpha_slow).is_err() || validate_alpha(self.alpha_smooth).is_err() {
            return Err(ConfigError::InvalidAlpha);
        }

        // AxisEnergy divides by the lookback
        if self.lookback == 0 || self.lookback > HISTORY_LEN {
            return Err(ConfigError::InvalidLookback);
        }

        // Rainbow divides by the visible count
        if self.visible_leds == 0 || self.visible_leds > LED_COUNT {
            return Err(ConfigError::InvalidVisibleLeds);
        }

        if !(self.revs_per_beat > 0.0) {
            return Err(ConfigError::InvalidRevsPerBeat);
        }

        if !(self.scale > 0.0) {
            return Err(ConfigError::InvalidScale);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sparse overrides applied atop [`Config::DEFAULT`]. `None` keeps the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overrides {
    pub high_pass: Option<bool>,
    pub smooth: Option<bool>,
    pub filter_all: Option<bool>,
    pub lookback: Option<usize>,
    pub scale: Option<f32>,
    pub color: Option<ColorStrategy>,
    pub display: Option<DisplayMethod>,
    pub shift_leds: Option<bool>,
    pub shift_color_wheel: Option<bool>,
    pub visible_leds: Option<usize>,
    pub strobe: Option<bool>,
    pub revs_per_beat: Option<f32>,
    pub route: Option<Route>,
}

impl Overrides {
    pub const NONE: Overrides = Overrides {
        high_pass: None,
        smooth: None,
        filter_all: None,
        lookback: None,
        scale: None,
        color: None,
        display: None,
        shift_leds: None,
        shift_color_wheel: None,
        visible_leds: None,
        strobe: None,
        revs_per_beat: None,
        route: None,
    };
}
