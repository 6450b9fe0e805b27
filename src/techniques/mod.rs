//! Technique catalog and per-character technique records
//!
//! The catalog is static reference data. Player characters bind catalog
//! names to a mastery level; every character keeps an exchange-scoped list
//! of selected techniques.

pub mod catalog;

pub use catalog::TECHNIQUE_CATALOG;

use crate::core::types::{Approach, TechniqueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How demanding a technique is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Basic,
    Advanced,
}

/// Training affinity a technique belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Training {
    Universal,
    Air,
    Water,
    Earth,
    Fire,
    Weapons,
    Technology,
    Group,
}

impl Training {
    pub fn label(&self) -> &'static str {
        match self {
            Training::Universal => "universal",
            Training::Air => "air",
            Training::Water => "water",
            Training::Earth => "earth",
            Training::Fire => "fire",
            Training::Weapons => "weapons",
            Training::Technology => "technology",
            Training::Group => "group",
        }
    }

    /// Case-insensitive parse of a training label
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        [
            Training::Universal,
            Training::Air,
            Training::Water,
            Training::Earth,
            Training::Fire,
            Training::Weapons,
            Training::Technology,
            Training::Group,
        ]
        .into_iter()
        .find(|t| t.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Training {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog entry - read-only
#[derive(Debug, Clone, Serialize)]
pub struct Technique {
    pub name: &'static str,
    pub complexity: Complexity,
    pub training: Training,
    pub approaches: &'static [Approach],
}

impl Technique {
    pub fn is_basic(&self) -> bool {
        self.complexity == Complexity::Basic
    }

    pub fn usable_with(&self, approach: Approach) -> bool {
        self.approaches.contains(&approach)
    }

    /// Basic and universal techniques need no training; anything else needs a
    /// matching entry in the character's training list (case-insensitive).
    pub fn trainable_by(&self, training: &[String]) -> bool {
        if self.is_basic() || self.training == Training::Universal {
            return true;
        }
        training
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(self.training.label()))
    }
}

/// Look up a catalog entry by name (case-insensitive)
pub fn find_technique(name: &str) -> Option<&'static Technique> {
    let name = name.trim();
    TECHNIQUE_CATALOG
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Catalog entries usable with `approach`, optionally restricted to one affinity
pub fn techniques_for(approach: Approach, training: Option<Training>) -> Vec<&'static Technique> {
    TECHNIQUE_CATALOG
        .iter()
        .filter(|t| t.usable_with(approach))
        .filter(|t| training.map_or(true, |wanted| t.training == wanted))
        .collect()
}

/// The basic techniques every character can fall back on for `approach`
pub fn basic_techniques(approach: Approach) -> Vec<&'static Technique> {
    TECHNIQUE_CATALOG
        .iter()
        .filter(|t| t.is_basic() && t.usable_with(approach))
        .collect()
}

/// How well a player character knows a technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mastery {
    Learned,
    Practiced,
    Mastered,
}

impl Mastery {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "learned" => Some(Mastery::Learned),
            "practiced" => Some(Mastery::Practiced),
            "mastered" => Some(Mastery::Mastered),
            _ => None,
        }
    }
}

/// A technique a player character permanently knows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTechnique {
    pub id: TechniqueId,
    pub name: String,
    pub mastery: Mastery,
}

impl CharacterTechnique {
    pub fn new(name: impl Into<String>, mastery: Mastery) -> Self {
        Self {
            id: TechniqueId::new(),
            name: name.into(),
            mastery,
        }
    }
}

/// Effective level a technique is used at this exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionLevel {
    Basic,
    Learned,
    Practiced,
    Mastered,
}

impl SelectionLevel {
    /// Counts against the basic/mastered allowance
    pub fn is_basic_or_mastered(&self) -> bool {
        matches!(self, SelectionLevel::Basic | SelectionLevel::Mastered)
    }
}

impl From<Mastery> for SelectionLevel {
    fn from(mastery: Mastery) -> Self {
        match mastery {
            Mastery::Learned => SelectionLevel::Learned,
            Mastery::Practiced => SelectionLevel::Practiced,
            Mastery::Mastered => SelectionLevel::Mastered,
        }
    }
}

/// A technique committed for the current exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTechnique {
    /// Known-technique id, or `basic:<name>` for ad-hoc basic uses
    pub source_id: String,
    pub name: String,
    pub level: SelectionLevel,
    /// Only learned techniques cost fatigue; the caller applies it
    pub costs_fatigue: bool,
}

impl SelectedTechnique {
    pub fn basic(technique: &Technique) -> Self {
        Self {
            source_id: basic_source_id(technique.name),
            name: technique.name.to_string(),
            level: SelectionLevel::Basic,
            costs_fatigue: false,
        }
    }

    pub fn known(technique: &CharacterTechnique) -> Self {
        Self {
            source_id: technique.id.to_string(),
            name: technique.name.clone(),
            level: technique.mastery.into(),
            costs_fatigue: technique.mastery == Mastery::Learned,
        }
    }
}

/// Synthetic source id for a technique used without being known
pub fn basic_source_id(name: &str) -> String {
    format!("basic:{}", name.to_ascii_lowercase().replace(' ', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_technique_is_case_insensitive() {
        let t = find_technique("stone shield").unwrap();
        assert_eq!(t.name, "Stone Shield");
        assert_eq!(t.training, Training::Earth);
        assert!(find_technique("Not A Technique").is_none());
    }

    #[test]
    fn test_techniques_for_filters_by_approach_and_training() {
        let fire_attacks = techniques_for(Approach::AdvanceAttack, Some(Training::Fire));
        assert!(!fire_attacks.is_empty());
        assert!(fire_attacks
            .iter()
            .all(|t| t.training == Training::Fire && t.usable_with(Approach::AdvanceAttack)));

        assert!(techniques_for(Approach::None, None).is_empty());
    }

    #[test]
    fn test_every_approach_has_basic_techniques() {
        for approach in Approach::ACTIVE {
            let basics = basic_techniques(approach);
            assert_eq!(basics.len(), 3, "{:?}", approach);
            assert!(basics.iter().all(|t| t.training == Training::Universal));
        }
    }

    #[test]
    fn test_trainable_by() {
        let blast = find_technique("Lightning Blast").unwrap();
        assert!(!blast.trainable_by(&[]));
        assert!(!blast.trainable_by(&["Water".to_string()]));
        assert!(blast.trainable_by(&["FIRE".to_string()]));

        let strike = find_technique("Strike").unwrap();
        assert!(strike.trainable_by(&[]));
    }

    #[test]
    fn test_known_selection_fatigue_cost() {
        let learned = CharacterTechnique::new("Flame Knives", Mastery::Learned);
        let practiced = CharacterTechnique::new("Flame Knives", Mastery::Practiced);
        assert!(SelectedTechnique::known(&learned).costs_fatigue);
        assert!(!SelectedTechnique::known(&practiced).costs_fatigue);
        assert_eq!(SelectedTechnique::known(&practiced).level, SelectionLevel::Practiced);
    }

    #[test]
    fn test_basic_source_id() {
        assert_eq!(basic_source_id("Seize a Position"), "basic:seize-a-position");
    }
}
