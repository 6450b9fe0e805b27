//! Balance meter
//!
//! Player characters sit between two opposing principles on a symmetric
//! track; non-player characters track a single principle from zero up.
//! `min <= current <= max` holds after every operation here.

use serde::{Deserialize, Serialize};

/// The named principles a meter is anchored to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Principles {
    /// Negative values lean left, positive lean right
    Opposed { left: String, right: String },
    Single { principle: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub principles: Principles,
    pub current: i32,
    pub min: i32,
    pub max: i32,
}

impl Balance {
    /// Two-principle meter on `[-limit, limit]`, centered
    pub fn opposed(left: impl Into<String>, right: impl Into<String>, limit: i32) -> Self {
        let limit = limit.abs();
        Self {
            principles: Principles::Opposed {
                left: left.into(),
                right: right.into(),
            },
            current: 0,
            min: -limit,
            max: limit,
        }
    }

    /// One-principle meter on `[0, max]`, empty
    pub fn single(principle: impl Into<String>, max: i32) -> Self {
        Self {
            principles: Principles::Single {
                principle: principle.into(),
            },
            current: 0,
            min: 0,
            max: max.max(0),
        }
    }

    /// Move the meter by `delta`, clamped to the range
    pub fn shift(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta).clamp(self.min, self.max);
    }

    /// Set the meter directly, clamped to the range
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(self.min, self.max);
    }

    /// Swap in new principles and range, keeping `current` where it fits
    pub fn rebase(&mut self, principles: Principles, min: i32, max: i32) {
        self.principles = principles;
        self.min = min.min(max);
        self.max = max.max(min);
        self.current = self.current.clamp(self.min, self.max);
    }

    pub fn is_centered(&self) -> bool {
        self.current == 0
    }

    /// "Center", or the principle being leaned toward and by how much
    pub fn describe(&self) -> String {
        if self.current == 0 {
            return "Center".to_string();
        }
        let amount = self.current.abs();
        match &self.principles {
            Principles::Opposed { left, right } => {
                if self.current < 0 {
                    format!("{left} {amount}")
                } else {
                    format!("{right} {amount}")
                }
            }
            Principles::Single { principle } => format!("{principle} {amount}"),
        }
    }
}
