use std::f64::consts::PI;
use std::ops::Range;

use shake_color::estimators::ACTIVITY_THRESHOLD;
use shake_color::{LED_COUNT, MotionEngine, RGB8, RawSample, Step, Submode, TICK_MS};

const AMPLITUDE: f64 = 300.0;
const SHAKE_HZ: f64 = 2.0;

/// Offset shake along x with a smaller in-phase component on y.
fn shake(tick: u32) -> RawSample {
    let phase = (2.0 * PI * SHAKE_HZ * tick as f64 * TICK_MS as f64 / 1000.0).sin();
    RawSample::new(
        (AMPLITUDE * phase + AMPLITUDE) as i16,
        (0.5 * AMPLITUDE * phase) as i16,
        0,
    )
}

fn run(engine: &mut MotionEngine, ticks: Range<u32>) -> Step {
    let mut last = Step::Spectral(0);
    for tick in ticks {
        engine.ingest(shake(tick));
        last = engine.tick(tick * TICK_MS * 1000);
    }
    last
}

#[test]
fn shaking_at_two_hertz() {
    let mut engine = MotionEngine::from_submode(Submode::BeatSpin);

    run(&mut engine, 0..60);
    assert!(engine.readout().activity > ACTIVITY_THRESHOLD);

    let step = run(&mut engine, 60..120);
    let readout = engine.readout();

    // 2 Hz at 62.5 ticks per second is 31.25 ticks per cycle
    let lag = readout.best_lag.expect("estimator has run");
    assert!((27..=35).contains(&lag), "best lag {}", lag);
    assert!(readout.bpm_from_tau > 100.0 && readout.bpm_from_tau < 140.0);

    assert!(engine.crossing().crossing_count() >= 3);
    assert!(readout.bpm_from_crossing > 0.0);
    assert!(engine.animation().step_count() > 0);

    match step {
        Step::Leds(frame) => {
            let lit = frame.iter().filter(|led| **led != RGB8::default()).count();
            assert_eq!(lit, LED_COUNT);
        }
        other => panic!("expected an LED frame, got {:?}", other),
    }
}

#[test]
fn readout_flags_recent_crossings() {
    let mut engine = MotionEngine::from_submode(Submode::BeatSpin);
    let mut flagged = 0;

    for tick in 0..120 {
        run(&mut engine, tick..tick + 1);
        let readout = engine.readout();
        assert_eq!(readout.recent_crossing, engine.crossing().recent_crossing());
        if readout.recent_crossing {
            flagged += 1;
        }
    }

    assert!(flagged > 0);
    assert!(flagged < 120);
}

#[test]
fn select_discards_history() {
    let mut engine = MotionEngine::from_submode(Submode::BeatSpin);
    run(&mut engine, 0..120);
    assert!(engine.readout().activity > 0.0);

    engine.select(Submode::BeatSelect);

    let readout = engine.readout();
    assert_eq!(readout.activity, 0.0);
    assert_eq!(readout.best_lag, None);
    assert_eq!(readout.bpm_from_crossing, 0.0);
    assert!(!readout.recent_crossing);
    assert_eq!(engine.conditioner().high_pass().abs_sum(120), 0.0);
    assert_eq!(engine.conditioner().norm_low_pass(), 0.0);
    assert_eq!(engine.animation().step_count(), 0);
    assert_eq!(*engine.config(), Submode::BeatSelect.config());
}

#[test]
fn ball_route_skips_estimators() {
    let mut engine = MotionEngine::from_submode(Submode::RollBall);

    let step = run(&mut engine, 0..120);

    assert!(matches!(step, Step::BallPhysics(_)));
    assert_eq!(engine.readout().best_lag, None);
    assert_eq!(engine.crossing().crossing_count(), 0);
    // Conditioning still runs
    assert!(engine.readout().activity > 0.0);
}

#[test]
fn spectral_route_forwards_high_pass() {
    let mut engine = MotionEngine::from_submode(Submode::DftShake);

    let step = run(&mut engine, 0..50);
    let latest = engine.conditioner().high_pass().latest();

    assert_eq!(step, Step::Spectral(latest as i32));
    assert_eq!(engine.readout().best_lag, None);
}
