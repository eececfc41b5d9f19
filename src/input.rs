//! Button edge detection over a bitmask.

pub const BUTTON_LEFT: u8 = 0x01;
pub const BUTTON_RIGHT: u8 = 0x02;

/// Current and previously acted-on button bitmasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    state: u8,
    last: u8,
}

impl Buttons {
    pub const fn new() -> Self {
        Self { state: 0, last: 0 }
    }

    /// Latest bitmask from the button driver.
    pub fn set(&mut self, state: u8) {
        self.state = state;
    }

    /// Mark the current state as handled. Call once per tick after input.
    pub fn latch(&mut self) {
        self.last = self.state;
    }

    /// Newly set since the last latch.
    pub fn pressed(&self, mask: u8) -> bool {
        self.state & mask != 0 && self.last & mask == 0
    }

    /// Newly cleared since the last latch.
    pub fn released(&self, mask: u8) -> bool {
        self.state & mask == 0 && self.last & mask != 0
    }

    pub fn is_down(&self, mask: u8) -> bool {
        self.state & mask != 0
    }

    pub fn is_up(&self, mask: u8) -> bool {
        self.state & mask == 0
    }
}
