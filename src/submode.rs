use crate::animation::DisplayMethod;
use crate::color::ColorStrategy;
use crate::config::{Config, Overrides, Route};

/// Named presets, cycled in declaration order from the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submode {
    /// Rainbow ring whose hue offset rotates with the tempo.
    #[default]
    BeatSpin,
    /// Tempo mapped to one hue on every LED.
    BeatSelect,
    ShockChange,
    ShockChaotic,
    RollBall,
    Roll3Balls,
    /// Per-axis energy mapped straight to red, green and blue.
    TiltAColor,
    PovEffect,
    DftShake,
    /// A single LED that orbits three times per beat.
    PowerShake,
}

impl Submode {
    pub const ALL: [Submode; 10] = [
        Submode::BeatSpin,
        Submode::BeatSelect,
        Submode::ShockChange,
        Submode::ShockChaotic,
        Submode::RollBall,
        Submode::Roll3Balls,
        Submode::TiltAColor,
        Submode::PovEffect,
        Submode::DftShake,
        Submode::PowerShake,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Submode::BeatSpin => "BEAT_SPIN",
            Submode::BeatSelect => "BEAT_SELECT",
            Submode::ShockChange => "SHOCK_CHANGE",
            Submode::ShockChaotic => "SHOCK_CHAOTIC",
            Submode::RollBall => "ROLL_BALL",
            Submode::Roll3Balls => "ROLL_3_BALLS",
            Submode::TiltAColor => "TILT_A_COLOR",
            Submode::PovEffect => "POV_EFFECT",
            Submode::DftShake => "DFT_SHAKE",
            Submode::PowerShake => "POWER_SHAKE",
        }
    }

    /// Following preset, wrapping after the last one.
    pub const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Default record with this preset's overrides applied.
    pub const fn config(self) -> Config {
        Config::DEFAULT.with(&PRESET_OVERRIDES[self as usize])
    }
}

const RAW_AXES: Overrides = Overrides {
    high_pass: Some(false),
    smooth: Some(false),
    filter_all: Some(false),
    lookback: Some(1),
    display: Some(DisplayMethod::Uniform),
    ..Overrides::NONE
};

/// Indexed by `Submode as usize`.
const PRESET_OVERRIDES: [Overrides; 10] = [
    // BeatSpin
    Overrides::NONE,
    // BeatSelect
    Overrides {
        display: Some(DisplayMethod::Uniform),
        shift_color_wheel: Some(false),
        scale: Some(10.0),
        ..Overrides::NONE
    },
    // ShockChange
    RAW_AXES,
    // ShockChaotic
    Overrides::NONE,
    // RollBall
    Overrides {
        route: Some(Route::BallPhysics),
        ..Overrides::NONE
    },
    // Roll3Balls
    Overrides {
        route: Some(Route::BallPhysics),
        ..Overrides::NONE
    },
    // TiltAColor
    Overrides {
        color: Some(ColorStrategy::AxisEnergy),
        ..RAW_AXES
    },
    // PovEffect
    Overrides {
        strobe: Some(true),
        ..Overrides::NONE
    },
    // DftShake
    Overrides {
        route: Some(Route::Spectral),
        ..Overrides::NONE
    },
    // PowerShake
    Overrides {
        visible_leds: Some(1),
        shift_color_wheel: Some(false),
        shift_leds: Some(true),
        display: Some(DisplayMethod::Uniform),
        scale: Some(1000.0),
        revs_per_beat: Some(3.0),
        ..Overrides::NONE
    },
];
