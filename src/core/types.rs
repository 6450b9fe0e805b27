//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for characters on the roster
    CharacterId
);
uuid_id!(
    /// Unique identifier for a temporary status effect
    StatusId
);
uuid_id!(
    /// Unique identifier for a roll modifier
    ModifierId
);
uuid_id!(
    /// Unique identifier for a technique a player character knows
    TechniqueId
);
uuid_id!(
    /// Unique identifier for a saved character template
    TemplateId
);

/// Which roster a character belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Pc,
    Npc,
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterKind::Pc => write!(f, "PC"),
            CharacterKind::Npc => write!(f, "NPC"),
        }
    }
}

/// Combat approach chosen for the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Approach {
    DefendManeuver,
    AdvanceAttack,
    EvadeObserve,
    #[default]
    None,
}

impl Approach {
    /// Approaches a character can actually act with
    pub const ACTIVE: [Approach; 3] = [
        Approach::DefendManeuver,
        Approach::AdvanceAttack,
        Approach::EvadeObserve,
    ];

    /// Action priority, lower goes first. `None` never acts.
    pub fn priority(&self) -> Option<u8> {
        match self {
            Approach::DefendManeuver => Some(1),
            Approach::AdvanceAttack => Some(2),
            Approach::EvadeObserve => Some(3),
            Approach::None => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Approach::DefendManeuver => "Defend & Maneuver",
            Approach::AdvanceAttack => "Advance & Attack",
            Approach::EvadeObserve => "Evade & Observe",
            Approach::None => "Not Acting",
        }
    }

    /// Parse the kebab-case key or a short alias (`defend`, `attack`, `evade`)
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "defend-maneuver" | "defend" | "dm" => Some(Approach::DefendManeuver),
            "advance-attack" | "attack" | "advance" | "aa" => Some(Approach::AdvanceAttack),
            "evade-observe" | "evade" | "observe" | "eo" => Some(Approach::EvadeObserve),
            "none" => Some(Approach::None),
            _ => None,
        }
    }
}

/// NPC difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NpcTier {
    Minor,
    #[default]
    Moderate,
    Major,
}

impl NpcTier {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "minor" => Some(NpcTier::Minor),
            "moderate" => Some(NpcTier::Moderate),
            "major" => Some(NpcTier::Major),
            _ => None,
        }
    }
}
