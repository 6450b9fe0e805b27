//! Character records
//!
//! Player and non-player characters share one record; the variant-only
//! fields live in `CharacterDetails`, serialized under a `type` tag.

use crate::combat::stance::Stance;
use crate::core::config::ExchangeConfig;
use crate::core::error::{ExchangeError, Result};
use crate::core::types::{Approach, CharacterId, CharacterKind, NpcTier};
use crate::entity::balance::{Balance, Principles};
use crate::entity::conditions::{Condition, ConditionType, Modifier, Status};
use crate::entity::playbook::{principles_for, DEFAULT_PRINCIPLES};
use crate::techniques::{CharacterTechnique, SelectedTechnique};
use serde::{Deserialize, Serialize};

/// Snapshot taken at creation; restored between exchanges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseState {
    pub fatigue: i32,
    pub balance: Balance,
    pub conditions: Vec<Condition>,
    pub statuses: Vec<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PcDetails {
    /// Archetype name, e.g. "The Bold"
    pub playbook: String,
    #[serde(default)]
    pub training: Vec<String>,
    /// Techniques the character permanently knows
    #[serde(default)]
    pub techniques: Vec<CharacterTechnique>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<NpcTier>,
    /// Advanced techniques this NPC may select
    #[serde(default)]
    pub available_techniques: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CharacterDetails {
    Pc(PcDetails),
    Npc(NpcDetails),
}

impl CharacterDetails {
    pub fn kind(&self) -> CharacterKind {
        match self {
            CharacterDetails::Pc(_) => CharacterKind::Pc,
            CharacterDetails::Npc(_) => CharacterKind::Npc,
        }
    }
}

/// A character on the exchange roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    // Exchange state
    pub approach: Approach,
    pub stance: Option<Stance>,
    #[serde(default)]
    pub techniques_modifier: i32,
    #[serde(default)]
    pub selected_techniques: Vec<SelectedTechnique>,

    // Resources
    pub fatigue: i32,
    pub max_fatigue: i32,
    pub balance: Balance,

    // Status
    pub conditions: Vec<Condition>,
    pub statuses: Vec<Status>,
    pub modifiers: Vec<Modifier>,

    pub base_state: BaseState,

    #[serde(flatten)]
    pub details: CharacterDetails,
}

impl Character {
    pub fn kind(&self) -> CharacterKind {
        self.details.kind()
    }

    pub fn is_pc(&self) -> bool {
        self.kind() == CharacterKind::Pc
    }

    pub fn as_pc(&self) -> Option<&PcDetails> {
        match &self.details {
            CharacterDetails::Pc(pc) => Some(pc),
            CharacterDetails::Npc(_) => None,
        }
    }

    pub fn as_pc_mut(&mut self) -> Option<&mut PcDetails> {
        match &mut self.details {
            CharacterDetails::Pc(pc) => Some(pc),
            CharacterDetails::Npc(_) => None,
        }
    }

    pub fn as_npc(&self) -> Option<&NpcDetails> {
        match &self.details {
            CharacterDetails::Npc(npc) => Some(npc),
            CharacterDetails::Pc(_) => None,
        }
    }

    pub fn condition(&self, kind: ConditionType) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }

    pub fn marked_conditions(&self) -> impl Iterator<Item = ConditionType> + '_ {
        self.conditions.iter().filter(|c| c.marked).map(|c| c.kind)
    }

    /// Taken out once every fatigue box is filled
    pub fn is_exhausted(&self) -> bool {
        self.fatigue >= self.max_fatigue
    }
}

/// Everything needed to put a new character on the roster
///
/// Drafts are also what templates store, so loading a template and filling
/// in a form go through the same `build` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub fatigue: i32,
    /// Overrides the PC or tier default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fatigue: Option<i32>,
    /// Overrides the playbook or NPC default principles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principles: Option<Principles>,
    #[serde(default)]
    pub balance: i32,
    /// `None` gives the five standard conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<ConditionType>>,
    /// Conditions already marked when the character enters play
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marked: Vec<ConditionType>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(flatten)]
    pub details: CharacterDetails,
}

impl CharacterDraft {
    pub fn pc(name: impl Into<String>, playbook: impl Into<String>) -> Self {
        Self::with_details(
            name,
            CharacterDetails::Pc(PcDetails {
                playbook: playbook.into(),
                training: Vec::new(),
                techniques: Vec::new(),
            }),
        )
    }

    pub fn npc(name: impl Into<String>, difficulty: NpcTier) -> Self {
        Self::with_details(
            name,
            CharacterDetails::Npc(NpcDetails {
                role: None,
                difficulty: Some(difficulty),
                available_techniques: Vec::new(),
            }),
        )
    }

    fn with_details(name: impl Into<String>, details: CharacterDetails) -> Self {
        Self {
            name: name.into(),
            image_url: None,
            fatigue: 0,
            max_fatigue: None,
            principles: None,
            balance: 0,
            conditions: None,
            marked: Vec::new(),
            statuses: Vec::new(),
            details,
        }
    }

    pub fn kind(&self) -> CharacterKind {
        self.details.kind()
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn max_fatigue(mut self, max: i32) -> Self {
        self.max_fatigue = Some(max);
        self
    }

    pub fn opposed_principles(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.principles = Some(Principles::Opposed {
            left: left.into(),
            right: right.into(),
        });
        self
    }

    pub fn principle(mut self, principle: impl Into<String>) -> Self {
        self.principles = Some(Principles::Single {
            principle: principle.into(),
        });
        self
    }

    pub fn conditions(mut self, conditions: &[ConditionType]) -> Self {
        self.conditions = Some(conditions.to_vec());
        self
    }

    pub fn marked(mut self, conditions: &[ConditionType]) -> Self {
        self.marked = conditions.to_vec();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.statuses.push(status);
        self
    }

    /// PC only; ignored for NPC drafts
    pub fn training(mut self, training: &[&str]) -> Self {
        if let CharacterDetails::Pc(pc) = &mut self.details {
            pc.training = training.iter().map(|t| t.trim().to_string()).collect();
        }
        self
    }

    /// PC only; ignored for NPC drafts
    pub fn technique(mut self, technique: CharacterTechnique) -> Self {
        if let CharacterDetails::Pc(pc) = &mut self.details {
            pc.techniques.push(technique);
        }
        self
    }

    /// NPC only; ignored for PC drafts
    pub fn role(mut self, role: impl Into<String>) -> Self {
        if let CharacterDetails::Npc(npc) = &mut self.details {
            npc.role = Some(role.into());
        }
        self
    }

    /// NPC only; ignored for PC drafts
    pub fn available_techniques(mut self, names: &[&str]) -> Self {
        if let CharacterDetails::Npc(npc) = &mut self.details {
            npc.available_techniques = names.iter().map(|n| n.to_string()).collect();
        }
        self
    }

    /// Rebuild a draft that recreates `character` as it was created
    pub fn from_character(character: &Character) -> Self {
        let base = &character.base_state;
        let mut details = character.details.clone();
        if let CharacterDetails::Pc(pc) = &mut details {
            // Known techniques get fresh ids when the draft is instantiated again
            pc.techniques = pc
                .techniques
                .iter()
                .map(|t| CharacterTechnique::new(t.name.clone(), t.mastery))
                .collect();
        }
        Self {
            name: character.name.clone(),
            image_url: character.image_url.clone(),
            fatigue: base.fatigue,
            max_fatigue: Some(character.max_fatigue),
            principles: Some(base.balance.principles.clone()),
            balance: base.balance.current,
            conditions: Some(base.conditions.iter().map(|c| c.kind).collect()),
            marked: base.conditions.iter().filter(|c| c.marked).map(|c| c.kind).collect(),
            statuses: base.statuses.clone(),
            details,
        }
    }

    /// Reject drafts that cannot produce a valid record
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_fatigue {
            if max < 1 {
                return Err(ExchangeError::InvalidRecord(format!(
                    "{}: max fatigue {} is below 1",
                    self.name, max
                )));
            }
        }
        Ok(())
    }

    /// Create the character, capturing its base state
    pub fn build(&self, config: &ExchangeConfig) -> Character {
        let (max_fatigue, balance) = match &self.details {
            CharacterDetails::Pc(pc) => {
                let limit = config.pc_balance_limit;
                let principles = match &self.principles {
                    Some(p @ Principles::Opposed { .. }) => p.clone(),
                    _ => {
                        let (left, right) = principles_for(&pc.playbook);
                        Principles::Opposed {
                            left: left.to_string(),
                            right: right.to_string(),
                        }
                    }
                };
                let balance = Balance {
                    principles,
                    current: 0,
                    min: -limit,
                    max: limit,
                };
                (self.max_fatigue.unwrap_or(config.pc_max_fatigue), balance)
            }
            CharacterDetails::Npc(npc) => {
                let limits = config.tier(npc.difficulty.unwrap_or_default());
                let principle = match &self.principles {
                    Some(Principles::Single { principle }) => principle.clone(),
                    Some(Principles::Opposed { left, .. }) => left.clone(),
                    None => DEFAULT_PRINCIPLES.0.to_string(),
                };
                (
                    self.max_fatigue.unwrap_or(limits.max_fatigue),
                    Balance::single(principle, limits.max_balance),
                )
            }
        };

        let max_fatigue = max_fatigue.max(1);
        let fatigue = self.fatigue.clamp(0, max_fatigue);
        let mut balance = balance;
        balance.set(self.balance);

        let mut conditions = match &self.conditions {
            Some(kinds) => Condition::slots(kinds),
            None => Condition::slots(&ConditionType::PC_DEFAULTS),
        };
        for kind in &self.marked {
            match conditions.iter_mut().find(|c| c.kind == *kind) {
                Some(slot) => slot.marked = true,
                None => conditions.push(Condition { kind: *kind, marked: true }),
            }
        }

        let base_state = BaseState {
            fatigue,
            balance: balance.clone(),
            conditions: conditions.clone(),
            statuses: self.statuses.clone(),
        };

        Character {
            id: CharacterId::new(),
            name: self.name.trim().to_string(),
            image_url: self.image_url.clone().filter(|url| !url.trim().is_empty()),
            approach: Approach::None,
            stance: None,
            techniques_modifier: 0,
            selected_techniques: Vec::new(),
            fatigue,
            max_fatigue,
            balance,
            conditions,
            statuses: self.statuses.clone(),
            modifiers: Vec::new(),
            base_state,
            details: self.details.clone(),
        }
    }
}
