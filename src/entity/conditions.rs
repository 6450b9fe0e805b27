//! Conditions, temporary statuses and roll modifiers

use crate::combat::constants::FAVORED_STATUS;
use crate::core::types::{ModifierId, StatusId};
use serde::{Deserialize, Serialize};

/// Named condition a character can mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Afraid,
    Angry,
    Guilty,
    Insecure,
    Troubled,
    Foolish,
    Desperate,
    Jaded,
    Despondent,
    Hopeless,
    Frantic,
    Disgusted,
    Morose,
    Manic,
    Offended,
    Humiliated,
    Fixated,
    Frustrated,
    Vengeful,
    Stubborn,
    Distracted,
    Overbearing,
    Zealous,
    Overconfident,
}

impl ConditionType {
    /// The five conditions every player character carries
    pub const PC_DEFAULTS: [ConditionType; 5] = [
        ConditionType::Afraid,
        ConditionType::Angry,
        ConditionType::Guilty,
        ConditionType::Insecure,
        ConditionType::Troubled,
    ];

    pub fn all() -> &'static [ConditionType] {
        &[
            ConditionType::Afraid,
            ConditionType::Angry,
            ConditionType::Guilty,
            ConditionType::Insecure,
            ConditionType::Troubled,
            ConditionType::Foolish,
            ConditionType::Desperate,
            ConditionType::Jaded,
            ConditionType::Despondent,
            ConditionType::Hopeless,
            ConditionType::Frantic,
            ConditionType::Disgusted,
            ConditionType::Morose,
            ConditionType::Manic,
            ConditionType::Offended,
            ConditionType::Humiliated,
            ConditionType::Fixated,
            ConditionType::Frustrated,
            ConditionType::Vengeful,
            ConditionType::Stubborn,
            ConditionType::Distracted,
            ConditionType::Overbearing,
            ConditionType::Zealous,
            ConditionType::Overconfident,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionType::Afraid => "afraid",
            ConditionType::Angry => "angry",
            ConditionType::Guilty => "guilty",
            ConditionType::Insecure => "insecure",
            ConditionType::Troubled => "troubled",
            ConditionType::Foolish => "foolish",
            ConditionType::Desperate => "desperate",
            ConditionType::Jaded => "jaded",
            ConditionType::Despondent => "despondent",
            ConditionType::Hopeless => "hopeless",
            ConditionType::Frantic => "frantic",
            ConditionType::Disgusted => "disgusted",
            ConditionType::Morose => "morose",
            ConditionType::Manic => "manic",
            ConditionType::Offended => "offended",
            ConditionType::Humiliated => "humiliated",
            ConditionType::Fixated => "fixated",
            ConditionType::Frustrated => "frustrated",
            ConditionType::Vengeful => "vengeful",
            ConditionType::Stubborn => "stubborn",
            ConditionType::Distracted => "distracted",
            ConditionType::Overbearing => "overbearing",
            ConditionType::Zealous => "zealous",
            ConditionType::Overconfident => "overconfident",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(input))
    }
}

/// A condition slot on a character sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionType,
    pub marked: bool,
}

impl Condition {
    pub fn unmarked(kind: ConditionType) -> Self {
        Self { kind, marked: false }
    }

    /// Unmarked slots for each of the given condition types
    pub fn slots(kinds: &[ConditionType]) -> Vec<Condition> {
        kinds.iter().copied().map(Condition::unmarked).collect()
    }
}

/// Temporary named effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: StatusId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Added to the flat NPC technique count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techniques_modifier: Option<i32>,
}

impl Status {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StatusId::new(),
            name: name.into(),
            description: String::new(),
            techniques_modifier: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_techniques_modifier(mut self, modifier: i32) -> Self {
        self.techniques_modifier = Some(modifier);
        self
    }

    pub fn is_favored(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(FAVORED_STATUS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Applies to the next roll only
    Forward,
    /// Applies until removed
    Ongoing,
}

/// Numeric roll modifier. Informational; the technique math never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub id: ModifierId,
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Modifier {
    pub fn new(kind: ModifierKind, value: i32) -> Self {
        Self {
            id: ModifierId::new(),
            kind,
            value,
            applies_to: None,
            description: String::new(),
        }
    }

    pub fn applying_to(mut self, target: impl Into<String>) -> Self {
        self.applies_to = Some(target.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
