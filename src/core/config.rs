//! Exchange configuration with documented defaults
//!
//! The numbers the rules engine treats as table-tunable live here. A config
//! is owned by the `ExchangeState` it parameterises; there is no global copy.

use crate::core::error::{ExchangeError, Result};
use crate::core::types::NpcTier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fatigue and balance limits for one NPC tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Fatigue boxes before the NPC is taken out
    pub max_fatigue: i32,
    /// Top of the NPC's one-sided balance track
    pub max_balance: i32,
}

/// Configuration for the exchange tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Player characters allowed on the roster at once
    pub max_pcs: usize,

    /// Non-player characters allowed on the roster at once
    pub max_npcs: usize,

    /// Fatigue boxes for a player character
    pub pc_max_fatigue: i32,

    /// A PC balance meter runs from `-pc_balance_limit` to `+pc_balance_limit`
    pub pc_balance_limit: i32,

    pub minor: TierLimits,
    pub moderate: TierLimits,
    pub major: TierLimits,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_pcs: 6,
            max_npcs: 6,
            pc_max_fatigue: 5,
            pc_balance_limit: 3,
            minor: TierLimits {
                max_fatigue: 3,
                max_balance: 1,
            },
            moderate: TierLimits {
                max_fatigue: 5,
                max_balance: 2,
            },
            major: TierLimits {
                max_fatigue: 5,
                max_balance: 3,
            },
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self, tier: NpcTier) -> TierLimits {
        match tier {
            NpcTier::Minor => self.minor,
            NpcTier::Moderate => self.moderate,
            NpcTier::Major => self.major,
        }
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExchangeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_pcs == 0 || self.max_npcs == 0 {
            return Err(ExchangeError::InvalidConfig(
                "roster caps must be at least 1".into(),
            ));
        }

        if self.pc_max_fatigue <= 0 || self.pc_balance_limit <= 0 {
            return Err(ExchangeError::InvalidConfig(format!(
                "pc_max_fatigue ({}) and pc_balance_limit ({}) must be positive",
                self.pc_max_fatigue, self.pc_balance_limit
            )));
        }

        for (name, limits) in [
            ("minor", self.minor),
            ("moderate", self.moderate),
            ("major", self.major),
        ] {
            if limits.max_fatigue <= 0 {
                return Err(ExchangeError::InvalidConfig(format!(
                    "{name}.max_fatigue must be positive"
                )));
            }
            if !(1..=3).contains(&limits.max_balance) {
                return Err(ExchangeError::InvalidConfig(format!(
                    "{name}.max_balance ({}) must be within 1..=3",
                    limits.max_balance
                )));
            }
        }

        Ok(())
    }
}
