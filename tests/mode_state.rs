use shake_color::{
    BUTTON_LEFT, BUTTON_RIGHT, BallPhysics, Display, LEDS_OFF, LedDriver, LedFrame, ModeController,
    ModeState, RGB8, RawSample, Readout, RingBuffer, SpectralEngine, Submode, Vector3,
};

const TICK_US: u32 = 16_000;
const BALL_FRAME: LedFrame = [RGB8 { r: 1, g: 2, b: 3 }; 6];

#[derive(Default)]
struct MockLeds {
    writes: Vec<(LedFrame, u8)>,
}

impl LedDriver for MockLeds {
    fn write(&mut self, frame: &LedFrame, brightness_divisor: u8) {
        self.writes.push((*frame, brightness_divisor));
    }
}

#[derive(Default)]
struct MockBall {
    updates: usize,
    resets: usize,
}

impl BallPhysics for MockBall {
    fn update(&mut self, _accel: Vector3) -> LedFrame {
        self.updates += 1;
        BALL_FRAME
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

#[derive(Default)]
struct MockSpectral {
    samples: Vec<i32>,
    resets: usize,
}

impl SpectralEngine for MockSpectral {
    fn push_sample(&mut self, sample: i32) {
        self.samples.push(sample);
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

#[derive(Default)]
struct MockDisplay {
    titles: Vec<Submode>,
    readouts: usize,
    crossings_shown: usize,
}

impl Display for MockDisplay {
    fn show_title(&mut self, submode: Submode) {
        self.titles.push(submode);
    }

    fn show_readout(&mut self, readout: &Readout, _trace: &RingBuffer<f32, 120>) {
        self.readouts += 1;
        if readout.recent_crossing {
            self.crossings_shown += 1;
        }
    }
}

type Controller = ModeController<MockLeds, MockBall, MockSpectral, MockDisplay>;

struct Harness {
    controller: Controller,
    now_us: u32,
}

impl Harness {
    fn new() -> Self {
        let now_us = 1_000;
        let controller = ModeController::new(
            MockLeds::default(),
            MockBall::default(),
            MockSpectral::default(),
            MockDisplay::default(),
            now_us,
        );
        Self { controller, now_us }
    }

    fn tick(&mut self) {
        self.now_us += TICK_US;
        self.controller.tick(self.now_us);
    }

    /// Press and release a button over two ticks.
    fn press(&mut self, button: u8) {
        self.controller.on_buttons(button);
        self.tick();
        self.controller.on_buttons(0);
        self.tick();
    }

    fn shake(&mut self, ticks: usize) {
        for i in 0..ticks {
            let x = if (i / 8) % 2 == 0 { 600 } else { -600 };
            self.controller.on_accel(RawSample::new(x, 0, 256));
            self.tick();
        }
    }
}

#[test]
fn enters_title_with_leds_off() {
    let harness = Harness::new();
    let controller = &harness.controller;

    assert_eq!(controller.state(), ModeState::Title);
    assert_eq!(controller.submode(), Submode::BeatSpin);
    assert!(controller.is_running());
    assert_eq!(controller.leds().writes, vec![(LEDS_OFF, 1)]);
    assert_eq!(controller.ball().resets, 1);
    assert_eq!(controller.spectral().resets, 1);
}

#[test]
fn title_only_renders() {
    let mut harness = Harness::new();

    harness.shake(20);

    let controller = &harness.controller;
    assert_eq!(controller.display().titles.len(), 20);
    assert_eq!(controller.display().readouts, 0);
    assert_eq!(controller.leds().writes.len(), 1);
    assert_eq!(controller.engine().readout().activity, 0.0);
}

#[test]
fn left_in_title_cycles_presets() {
    let mut harness = Harness::new();

    harness.press(BUTTON_LEFT);
    assert_eq!(harness.controller.submode(), Submode::BeatSelect);
    assert_eq!(harness.controller.state(), ModeState::Title);
    assert_eq!(*harness.controller.engine().config(), Submode::BeatSelect.config());
    assert_eq!(harness.controller.ball().resets, 2);

    // Holding the button does not repeat
    harness.controller.on_buttons(BUTTON_LEFT);
    for _ in 0..5 {
        harness.tick();
    }
    assert_eq!(harness.controller.submode(), Submode::ShockChange);

    harness.controller.on_buttons(0);
    harness.tick();
    for _ in 0..8 {
        harness.press(BUTTON_LEFT);
    }
    assert_eq!(harness.controller.submode(), Submode::BeatSpin);
}

#[test]
fn right_starts_and_leaves_the_game() {
    let mut harness = Harness::new();

    harness.press(BUTTON_RIGHT);
    assert_eq!(harness.controller.state(), ModeState::Game);
    assert_eq!(harness.controller.previous_state(), ModeState::Title);

    harness.shake(100);
    assert!(harness.controller.engine().readout().activity > 0.0);
    assert!(harness.controller.display().readouts >= 100);
    assert!(harness.controller.display().crossings_shown > 0);
    let writes = harness.controller.leds().writes.len();
    assert!(writes > 100);

    harness.press(BUTTON_RIGHT);
    let controller = &harness.controller;
    assert_eq!(controller.state(), ModeState::Title);
    assert_eq!(controller.previous_state(), ModeState::Game);
    assert_eq!(*controller.frame(), LEDS_OFF);
    assert_eq!(controller.leds().writes.last(), Some(&(LEDS_OFF, 1)));
}

#[test]
fn left_in_game_cycles_brightness() {
    let mut harness = Harness::new();
    harness.press(BUTTON_RIGHT);

    let mut seen = Vec::new();
    for _ in 0..4 {
        harness.press(BUTTON_LEFT);
        seen.push(harness.controller.brightness_divisor());
    }

    assert_eq!(seen, vec![2, 4, 8, 1]);
    assert_eq!(harness.controller.submode(), Submode::BeatSpin);

    harness.press(BUTTON_LEFT);
    harness.shake(1);
    let (_, divisor) = harness.controller.leds().writes.last().copied().expect("frame written");
    assert_eq!(divisor, 2);
}

#[test]
fn ball_preset_forwards_to_ball_only() {
    let mut harness = Harness::new();
    harness.controller.select(Submode::RollBall);
    harness.press(BUTTON_RIGHT);

    harness.shake(50);

    let controller = &harness.controller;
    assert!(controller.ball().updates >= 50);
    assert!(controller.spectral().samples.is_empty());
    assert_eq!(controller.leds().writes.last(), Some(&(BALL_FRAME, 1)));
    assert_eq!(controller.engine().readout().best_lag, None);
    assert_eq!(controller.engine().crossing().crossing_count(), 0);
}

#[test]
fn spectral_preset_forwards_samples() {
    let mut harness = Harness::new();
    harness.controller.select(Submode::DftShake);
    harness.press(BUTTON_RIGHT);
    let writes = harness.controller.leds().writes.len();

    harness.shake(50);

    let controller = &harness.controller;
    assert!(controller.spectral().samples.len() >= 50);
    assert!(controller.spectral().samples.iter().any(|&s| s != 0));
    assert_eq!(controller.ball().updates, 0);
    assert_eq!(controller.leds().writes.len(), writes);
}

#[test]
fn clocks_follow_ticks() {
    let mut harness = Harness::new();

    harness.tick();
    assert_eq!(harness.controller.mode_time_us(), TICK_US);
    assert_eq!(harness.controller.delta_us(), TICK_US);

    harness.controller.on_buttons(BUTTON_RIGHT);
    harness.tick();
    assert_eq!(harness.controller.state(), ModeState::Game);
    assert_eq!(harness.controller.state_time_us(), 0);

    harness.tick();
    assert_eq!(harness.controller.state_time_us(), TICK_US);
    assert_eq!(harness.controller.mode_time_us(), 3 * TICK_US);
}

#[test]
fn stop_is_idempotent() {
    let mut harness = Harness::new();
    harness.tick();

    harness.controller.stop();
    harness.controller.stop();
    assert!(!harness.controller.is_running());

    harness.shake(10);
    assert_eq!(harness.controller.display().titles.len(), 1);
    assert_eq!(harness.controller.mode_time_us(), TICK_US);
}
