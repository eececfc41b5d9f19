//! Tempo estimators.
//!
//! The two estimators are independent and often disagree. Both outputs are
//! reported; neither is used to correct the other.

mod crossing;
mod deviation;

pub use crossing::{
    ACTIVITY_THRESHOLD, CROSSING_WINDOW_LEN, CROSSING_WINDOW_MS, CrossingEstimator,
    INITIAL_PERIOD_MS, RECENT_CROSSING_TICKS,
};
pub use deviation::{ALPHA_DEVIATION, DeviationEstimator, MIN_LAG};
