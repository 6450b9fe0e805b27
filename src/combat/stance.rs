//! Stance resolution
//!
//! A stance is the resolved outcome of a two-die roll. It is derived data:
//! the only way to change one is to resolve another roll.

use crate::combat::constants::{
    FULL_HIT_THRESHOLD, MAX_STANCE_ROLL, MIN_STANCE_ROLL, PARTIAL_HIT_THRESHOLD, STANCE_DIE_SIDES,
};
use crate::core::error::{ExchangeError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A validated stance total in 2..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StanceRoll(u8);

impl StanceRoll {
    /// Accept a manually entered total; anything outside 2..=12 is rejected
    pub fn new(value: i64) -> Result<Self> {
        if (MIN_STANCE_ROLL as i64..=MAX_STANCE_ROLL as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ExchangeError::StanceOutOfRange(value))
        }
    }

    /// Roll two independent dice and sum them
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = rng.gen_range(1..=STANCE_DIE_SIDES);
        let second = rng.gen_range(1..=STANCE_DIE_SIDES);
        Self(first + second)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Outcome band of a stance roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanceTier {
    /// 6 or less
    Miss,
    /// 7-9
    Partial,
    /// 10+
    Full,
}

impl StanceTier {
    pub fn from_total(total: u8) -> Self {
        if total >= FULL_HIT_THRESHOLD {
            StanceTier::Full
        } else if total >= PARTIAL_HIT_THRESHOLD {
            StanceTier::Partial
        } else {
            StanceTier::Miss
        }
    }
}

/// Resolved stance for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stance {
    /// The raw two-die total
    pub result: u8,
    /// Flat technique count, used for NPCs
    pub techniques_allowed: u32,
    /// Basic or mastered techniques a PC may use
    pub can_use_basic_mastered: u32,
    /// Whether a PC may use a learned or practiced technique
    pub can_use_learned_practiced: bool,
    /// Set only on a miss: the character must shift balance to act
    pub requires_balance_shift: bool,
}

impl Stance {
    pub fn tier(&self) -> StanceTier {
        StanceTier::from_total(self.result)
    }
}

/// Resolve a stance total into what it permits
pub fn resolve_stance(roll: StanceRoll) -> Stance {
    let result = roll.value();
    match StanceTier::from_total(result) {
        StanceTier::Miss => Stance {
            result,
            techniques_allowed: 0,
            can_use_basic_mastered: 0,
            can_use_learned_practiced: false,
            requires_balance_shift: true,
        },
        StanceTier::Partial => Stance {
            result,
            techniques_allowed: 1,
            can_use_basic_mastered: 1,
            can_use_learned_practiced: false,
            requires_balance_shift: false,
        },
        StanceTier::Full => Stance {
            result,
            techniques_allowed: 2,
            can_use_basic_mastered: 2,
            can_use_learned_practiced: true,
            requires_balance_shift: false,
        },
    }
}

/// Roll 2d6 and resolve the total
pub fn roll_stance<R: Rng + ?Sized>(rng: &mut R) -> Stance {
    resolve_stance(StanceRoll::roll(rng))
}
