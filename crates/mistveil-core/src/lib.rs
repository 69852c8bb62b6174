//! Core types shared by the mistveil crates.

use serde::{Deserialize, Serialize};

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

/// Animation speed for the ambient effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Display name for the footer.
    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }

    /// Snowfall speed in cells per second.
    pub fn snow_fall_speed(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 2.0,
            AnimationSpeed::Medium => 4.0,
            AnimationSpeed::Fast => 8.0,
        }
    }

    /// Multiplier applied to elapsed time before it reaches the mist mask.
    pub fn mist_time_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.8,
        }
    }

    /// Period of one full bob of the floating label.
    pub fn label_bob_period_ms(self) -> u64 {
        match self {
            AnimationSpeed::Slow => 4000,
            AnimationSpeed::Medium => 2800,
            AnimationSpeed::Fast => 1600,
        }
    }
}

/// Shape of the scroll-to-progress easing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressCurve {
    /// Piecewise remap reproduced as-is, including its jumps at 0.4 and 0.7.
    #[default]
    Exact,
    /// Outer segments rescaled so the curve meets the middle segment.
    Continuous,
}

impl ProgressCurve {
    /// Toggle between the two curves.
    pub fn toggle(self) -> Self {
        match self {
            ProgressCurve::Exact => ProgressCurve::Continuous,
            ProgressCurve::Continuous => ProgressCurve::Exact,
        }
    }

    /// Display name for the footer.
    pub fn name(self) -> &'static str {
        match self {
            ProgressCurve::Exact => "exact",
            ProgressCurve::Continuous => "continuous",
        }
    }
}

/// Configuration of a single mist transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskParameters {
    /// Scroll offset at which the transition begins.
    pub transition_start: f32,
    /// Length of the scroll window over which progress runs 0 to 1.
    pub transition_duration: f32,
    /// Viewport width, in the same units as `viewport_height`.
    pub viewport_width: f32,
    /// Viewport height.
    pub viewport_height: f32,
    /// Scroll-level easing curve.
    pub curve: ProgressCurve,
    /// Apply the in-mask `dramatic_pull` pass on top of the scroll easing.
    pub compound_easing: bool,
}

impl Default for MaskParameters {
    fn default() -> Self {
        Self {
            transition_start: 0.1,
            transition_duration: 0.05,
            viewport_width: 1.0,
            viewport_height: 1.0,
            curve: ProgressCurve::Exact,
            compound_easing: true,
        }
    }
}

impl MaskParameters {
    /// Width over height, with a degenerate viewport treated as square.
    pub fn aspect(&self) -> f32 {
        if self.viewport_width > 0.0 && self.viewport_height > 0.0 {
            self.viewport_width / self.viewport_height
        } else {
            1.0
        }
    }

    /// Set the viewport from a terminal size in cells.
    pub fn with_terminal_size(mut self, columns: u16, rows: u16) -> Self {
        self.viewport_width = columns as f32;
        self.viewport_height = rows as f32 * CELL_ASPECT;
        self
    }

    /// Scroll offset at which progress reaches 1.
    pub fn transition_end(&self) -> f32 {
        self.transition_start + self.transition_duration
    }
}
