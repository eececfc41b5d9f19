//! LED animation timed to the estimated tempo.

use smart_leds::RGB8;

use crate::color::hue_color;
use crate::config::Config;
use crate::estimators::ACTIVITY_THRESHOLD;

/// Physical LEDs on the ring.
pub const LED_COUNT: usize = 6;

/// Logical ring position to physical LED: upper left, then anticlockwise
/// through the lower row and back along the upper row.
pub const LED_ORDER: [usize; LED_COUNT] = [0, 5, 4, 3, 2, 1];

/// One colour per physical LED.
pub type LedFrame = [RGB8; LED_COUNT];

pub const LEDS_OFF: LedFrame = [RGB8 { r: 0, g: 0, b: 0 }; LED_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMethod {
    /// Every visible LED shows the mapped colour.
    Uniform,
    /// Visible LEDs spread over the hue wheel, ignoring the mapped colour.
    Rainbow,
}

#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    led_index: usize,
    step_count: u8,
    last_step_us: u32,
    sub_frame: u8,
}

impl AnimationScheduler {
    pub const fn new() -> Self {
        Self {
            led_index: 0,
            step_count: 0,
            last_step_us: 0,
            sub_frame: 0,
        }
    }

    /// Advance timers for this tick. Returns true when a step was taken.
    ///
    /// A step happens once more than `period_ms / LED_COUNT / revs_per_beat`
    /// has elapsed since the previous one and the activity is above the
    /// gate, so one full revolution takes `1 / revs_per_beat` beats.
    pub fn advance(&mut self, now_us: u32, period_ms: f32, activity: f32, config: &Config) -> bool {
        self.sub_frame = if self.sub_frame >= config.sub_frames {
            0
        } else {
            self.sub_frame + 1
        };

        let step_us = 1000.0 * period_ms / LED_COUNT as f32 / config.revs_per_beat;
        let elapsed_us = now_us.wrapping_sub(self.last_step_us);
        let stepped = elapsed_us as f32 > step_us && activity > ACTIVITY_THRESHOLD;

        if stepped {
            self.last_step_us = now_us;
            self.led_index = (self.led_index + 1) % LED_COUNT;
            self.step_count = self.step_count.wrapping_add(1);
        }

        if !config.shift_leds {
            self.led_index = 0;
        }
        if !config.shift_color_wheel {
            self.step_count = 0;
        }

        stepped
    }

    /// Build the frame for this tick from the mapped colour.
    pub fn render(&self, color: RGB8, config: &Config) -> LedFrame {
        let mut frame = LEDS_OFF;
        let visible = config.visible_leds.min(LED_COUNT);

        for i in 0..visible {
            let led = LED_ORDER[(i + self.led_index) % LED_COUNT];
            frame[led] = match config.display {
                DisplayMethod::Uniform => color,
                DisplayMethod::Rainbow => {
                    let hue = ((i * 256 / visible) as u8).wrapping_add(self.step_count);
                    hue_color(hue, 255)
                }
            };
        }

        if config.strobe {
            self.strobe(&mut frame);
        }

        frame
    }

    /// Keep one channel per LED, rotating every two sub-frames.
    fn strobe(&self, frame: &mut LedFrame) {
        for led in frame.iter_mut() {
            match self.sub_frame / 2 {
                0 => {
                    led.g = 0;
                    led.b = 0;
                }
                1 => {
                    led.r = 0;
                    led.b = 0;
                }
                _ => {
                    led.r = 0;
                    led.g = 0;
                }
            }
        }
    }

    pub fn led_index(&self) -> usize {
        self.led_index
    }

    /// Steps taken, wrapping; drives the rainbow hue offset.
    pub fn step_count(&self) -> u8 {
        self.step_count
    }

    pub fn sub_frame(&self) -> u8 {
        self.sub_frame
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
