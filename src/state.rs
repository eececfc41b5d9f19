//! Title/Game state machine and per-tick dispatch.

use log::info;

use crate::animation::{LEDS_OFF, LedFrame};
use crate::conditioner::RawSample;
use crate::engine::{MotionEngine, Step};
use crate::input::{BUTTON_LEFT, BUTTON_RIGHT, Buttons};
use crate::peripherals::{BallPhysics, Display, LedDriver, SpectralEngine};
use crate::submode::Submode;

const BTN_TITLE_CHOOSE_SUBMODE: u8 = BUTTON_LEFT;
const BTN_TITLE_START_SUBMODE: u8 = BUTTON_RIGHT;
const BTN_GAME_CYCLE_BRIGHTNESS: u8 = BUTTON_LEFT;
const BTN_GAME_BACK_TO_TITLE: u8 = BUTTON_RIGHT;

/// Brightness levels cycled in Game, as channel divisors.
pub const BRIGHTNESS_DIVISORS: [u8; 4] = [1, 2, 4, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    /// Preset selection. Renders only.
    Title,
    /// Motion pipeline running.
    Game,
}

type Handler<L, B, S, D> = fn(&mut ModeController<L, B, S, D>);

/// Operations run for a state on each tick, in order.
struct StateHandlers<L, B, S, D> {
    on_input: Handler<L, B, S, D>,
    on_update: Handler<L, B, S, D>,
    on_render: Handler<L, B, S, D>,
}

/// Owns the engine and collaborators; driven by one periodic tick.
pub struct ModeController<L, B, S, D> {
    engine: MotionEngine,
    submode: Submode,
    state: ModeState,
    previous_state: ModeState,
    buttons: Buttons,
    brightness_index: usize,
    frame: LedFrame,
    now_us: u32,
    mode_start_us: u32,
    state_start_us: u32,
    mode_time_us: u32,
    state_time_us: u32,
    delta_us: u32,
    running: bool,
    leds: L,
    ball: B,
    spectral: S,
    display: D,
}

impl<L, B, S, D> ModeController<L, B, S, D>
where
    L: LedDriver,
    B: BallPhysics,
    S: SpectralEngine,
    D: Display,
{
    /// Enter the mode at `now_us`: Title state, first preset, LEDs off.
    pub fn new(leds: L, ball: B, spectral: S, display: D, now_us: u32) -> Self {
        let submode = Submode::default();
        let mut controller = Self {
            engine: MotionEngine::from_submode(submode),
            submode,
            state: ModeState::Title,
            previous_state: ModeState::Title,
            buttons: Buttons::new(),
            brightness_index: 0,
            frame: LEDS_OFF,
            now_us,
            mode_start_us: now_us,
            state_start_us: now_us,
            mode_time_us: 0,
            state_time_us: 0,
            delta_us: 0,
            running: true,
            leds,
            ball,
            spectral,
            display,
        };

        controller.ball.reset();
        controller.spectral.reset();
        controller.change_state(ModeState::Title);
        controller
    }

    /// Accelerometer callback.
    pub fn on_accel(&mut self, raw: RawSample) {
        self.engine.ingest(raw);
    }

    /// Button callback with the full bitmask.
    pub fn on_buttons(&mut self, state: u8) {
        self.buttons.set(state);
    }

    /// One update cycle: input, then update, then render for the current state.
    pub fn tick(&mut self, now_us: u32) {
        if !self.running {
            return;
        }

        self.now_us = now_us;
        let mode_time_us = now_us.wrapping_sub(self.mode_start_us);
        self.delta_us = mode_time_us.wrapping_sub(self.mode_time_us);
        self.mode_time_us = mode_time_us;
        self.state_time_us = now_us.wrapping_sub(self.state_start_us);

        (Self::handlers(self.state).on_input)(self);
        self.buttons.latch();

        (Self::handlers(self.state).on_update)(self);
        (Self::handlers(self.state).on_render)(self);
    }

    /// Stop reacting to ticks. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.running {
            info!("stopping");
        }
        self.running = false;
    }

    pub fn change_state(&mut self, state: ModeState) {
        info!("state {:?} -> {:?}", self.state, state);

        self.previous_state = self.state;
        self.state = state;
        self.state_start_us = self.now_us;
        self.state_time_us = 0;

        match state {
            ModeState::Title => self.show(LEDS_OFF),
            ModeState::Game => {}
        }
    }

    /// Make `submode` active, resetting all pipeline state.
    pub fn select(&mut self, submode: Submode) {
        self.submode = submode;
        self.engine.select(submode);
        self.ball.reset();
        self.spectral.reset();
    }

    fn handlers(state: ModeState) -> StateHandlers<L, B, S, D> {
        match state {
            ModeState::Title => StateHandlers {
                on_input: Self::title_input,
                on_update: Self::title_update,
                on_render: Self::title_render,
            },
            ModeState::Game => StateHandlers {
                on_input: Self::game_input,
                on_update: Self::game_update,
                on_render: Self::game_render,
            },
        }
    }

    fn title_input(&mut self) {
        if self.buttons.pressed(BTN_TITLE_START_SUBMODE) {
            self.change_state(ModeState::Game);
        } else if self.buttons.pressed(BTN_TITLE_CHOOSE_SUBMODE) {
            self.select(self.submode.next());
            self.change_state(ModeState::Title);
        }
    }

    fn title_update(&mut self) {}

    fn title_render(&mut self) {
        self.display.show_title(self.submode);
    }

    fn game_input(&mut self) {
        if self.buttons.pressed(BTN_GAME_BACK_TO_TITLE) {
            self.change_state(ModeState::Title);
        } else if self.buttons.pressed(BTN_GAME_CYCLE_BRIGHTNESS) {
            self.brightness_index = (self.brightness_index + 1) % BRIGHTNESS_DIVISORS.len();
        }
    }

    fn game_update(&mut self) {
        match self.engine.tick(self.mode_time_us) {
            Step::Leds(frame) => self.show(frame),
            Step::BallPhysics(accel) => {
                let frame = self.ball.update(accel);
                self.show(frame);
            }
            Step::Spectral(sample) => self.spectral.push_sample(sample),
        }
    }

    fn show(&mut self, frame: LedFrame) {
        let divisor = self.brightness_divisor();
        self.frame = frame;
        self.leds.write(&self.frame, divisor);
    }

    fn game_render(&mut self) {
        let readout = self.engine.readout();
        self.display
            .show_readout(&readout, self.engine.conditioner().high_pass());
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn previous_state(&self) -> ModeState {
        self.previous_state
    }

    pub fn submode(&self) -> Submode {
        self.submode
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn brightness_divisor(&self) -> u8 {
        BRIGHTNESS_DIVISORS[self.brightness_index]
    }

    /// Last frame handed to the LED driver.
    pub fn frame(&self) -> &LedFrame {
        &self.frame
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Microseconds since the mode was entered.
    pub fn mode_time_us(&self) -> u32 {
        self.mode_time_us
    }

    /// Microseconds since the current state was entered.
    pub fn state_time_us(&self) -> u32 {
        self.state_time_us
    }

    /// Microseconds between the last two ticks.
    pub fn delta_us(&self) -> u32 {
        self.delta_us
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn ball(&self) -> &B {
        &self.ball
    }

    pub fn spectral(&self) -> &S {
        &self.spectral
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
