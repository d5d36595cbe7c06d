//! Volume control
//!
//! Linear output volume in [0, 1] with a fixed step for increase/decrease.

/// Volume level plus step size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Amount added/removed per step
    step: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Both values are clamped to [0, 1]; NaN becomes 0.
    pub fn new(level: f32, step: f32) -> Self {
        Self {
            level: clamp_unit(level),
            step: clamp_unit(step),
        }
    }

    /// Set volume level
    ///
    /// Clamps to [0, 1]. Returns false (and keeps the old level) for NaN.
    pub fn set(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Current level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Step size
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Change the step size
    pub fn set_step(&mut self, step: f32) {
        self.step = clamp_unit(step);
    }

    /// Level one step up, unclamped
    pub fn raised(&self) -> f32 {
        self.level + self.step
    }

    /// Level one step down, unclamped
    pub fn lowered(&self) -> f32 {
        self.level - self.step
    }

    /// Level in dB for display
    ///
    /// 1.0 is 0 dB; silence floors at -60 dB.
    pub fn to_db(&self) -> f32 {
        if self.level <= 0.001 {
            -60.0
        } else {
            (20.0 * self.level.log10()).max(-60.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8, 0.1)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
