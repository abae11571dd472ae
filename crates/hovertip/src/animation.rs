//! Opacity animation with selectable easing curves.
//!
//! Time is measured in whole milliseconds and advanced explicitly, so an
//! animation never reads a clock on its own.

use serde::{Deserialize, Serialize};

/// Easing curve type.
///
/// Every curve is monotonic on `[0, 1]`, which keeps a fade monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Exponential ease-in-out.
    ExponentialInOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// A single animated value between a start and an end.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Start value (for interpolation).
    start: f32,
    /// Target value.
    target: f32,
    /// Elapsed time of the running animation.
    elapsed_ms: u64,
    /// Duration of the running animation.
    duration_ms: u64,
    /// Easing function.
    easing: Easing,
    /// True between `start` and completion.
    running: bool,
}

impl Animation {
    /// Creates an idle animation resting at `value`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            start: value,
            target: value,
            elapsed_ms: 0,
            duration_ms: 0,
            easing: Easing::Linear,
            running: false,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns true while the animation is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the easing of the current run.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Milliseconds left until completion, `None` when idle.
    #[must_use]
    pub fn remaining_ms(&self) -> Option<u64> {
        self.running.then(|| self.duration_ms.saturating_sub(self.elapsed_ms))
    }

    /// Starts a run from `from` to `to`.
    ///
    /// Returns true if the run already completed: zero duration or
    /// `from == to` finish synchronously.
    pub fn start(&mut self, from: f32, to: f32, duration_ms: u64, easing: Easing) -> bool {
        self.start = from;
        self.current = from;
        self.target = to;
        self.elapsed_ms = 0;
        self.duration_ms = duration_ms;
        self.easing = easing;
        self.running = true;

        if duration_ms == 0 || (to - from).abs() <= f32::EPSILON {
            self.finish();
            return true;
        }
        false
    }

    /// Swaps the easing curve; a running animation uses it from now on.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
        if self.running {
            self.current = self.sample();
        }
    }

    /// Stops the animation where it is.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.running = false;
    }

    /// Advances the animation by `dt_ms`.
    ///
    /// Returns true if the animation completed during this step.
    pub fn update(&mut self, dt_ms: u64) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);

        if self.elapsed_ms >= self.duration_ms {
            self.finish();
            return true;
        }

        self.current = self.sample();
        false
    }

    fn sample(&self) -> f32 {
        if self.duration_ms == 0 {
            return self.target;
        }
        let progress = self.elapsed_ms as f32 / self.duration_ms as f32;
        let eased = self.easing.apply(progress);
        self.start + (self.target - self.start) * eased
    }

    fn finish(&mut self) {
        // Snap to target when complete
        self.current = self.target;
        self.elapsed_ms = self.duration_ms;
        self.running = false;
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0)
    }
}
