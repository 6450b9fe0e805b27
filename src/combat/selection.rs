//! Technique selection gate
//!
//! A technique joins `selected_techniques` only if the character's current
//! stance, approach, training and allowance permit it. Rejections leave the
//! character untouched.

use crate::combat::availability::{availability, techniques_allowed};
use crate::core::error::{ExchangeError, Result, SelectionRejection};
use crate::core::types::TechniqueId;
use crate::entity::character::{Character, CharacterDetails, NpcDetails, PcDetails};
use crate::techniques::{
    find_technique, SelectedTechnique, SelectionLevel, Technique, TECHNIQUE_CATALOG,
};
use tracing::debug;

/// What the caller wants to add
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechniqueChoice {
    /// A technique the player character knows, used at its mastery
    Known(TechniqueId),
    /// A technique by catalog name. PCs use it at their mastery if they know
    /// it, otherwise only as an ad-hoc basic use.
    Named(String),
}

impl TechniqueChoice {
    pub fn named(name: impl Into<String>) -> Self {
        TechniqueChoice::Named(name.into())
    }
}

/// Validate a choice without changing anything
pub fn check_selection(character: &Character, choice: &TechniqueChoice) -> Result<SelectedTechnique> {
    if character.stance.is_none() {
        return Err(SelectionRejection::NoStance.into());
    }

    match &character.details {
        CharacterDetails::Pc(pc) => check_pc(character, pc, choice),
        CharacterDetails::Npc(npc) => check_npc(character, npc, choice),
    }
}

/// Validate a choice and append it to the character's selections
pub fn select_technique(character: &mut Character, choice: &TechniqueChoice) -> Result<SelectedTechnique> {
    match check_selection(character, choice) {
        Ok(selected) => {
            debug!(character = %character.name, technique = %selected.name, level = ?selected.level, "technique selected");
            character.selected_techniques.push(selected.clone());
            Ok(selected)
        }
        Err(err) => {
            debug!(character = %character.name, ?choice, %err, "technique selection rejected");
            Err(err)
        }
    }
}

/// Catalog entries this character could be offered right now: approach
/// compatible, and trained (PC) or basic/whitelisted (NPC).
pub fn offered_techniques(character: &Character) -> Vec<&'static Technique> {
    TECHNIQUE_CATALOG
        .iter()
        .filter(|t| t.usable_with(character.approach))
        .filter(|t| match &character.details {
            CharacterDetails::Pc(pc) => t.trainable_by(&pc.training),
            CharacterDetails::Npc(npc) => npc_may_use(npc, t),
        })
        .collect()
}

fn check_pc(character: &Character, pc: &PcDetails, choice: &TechniqueChoice) -> Result<SelectedTechnique> {
    let (technique, selected) = match choice {
        TechniqueChoice::Known(id) => {
            let known = pc
                .techniques
                .iter()
                .find(|t| t.id == *id)
                .ok_or_else(|| ExchangeError::UnknownTechnique(id.to_string()))?;
            (lookup(&known.name)?, SelectedTechnique::known(known))
        }
        TechniqueChoice::Named(name) => {
            let technique = lookup(name)?;
            let known = pc
                .techniques
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(technique.name));
            match known {
                Some(known) => (technique, SelectedTechnique::known(known)),
                None if technique.is_basic() => (technique, SelectedTechnique::basic(technique)),
                None => {
                    return Err(SelectionRejection::NotAvailable {
                        technique: technique.name.to_string(),
                    }
                    .into())
                }
            }
        }
    };

    ensure_not_selected(character, &selected)?;
    ensure_approach(character, technique)?;

    if !technique.trainable_by(&pc.training) {
        return Err(SelectionRejection::TrainingMissing {
            technique: technique.name.to_string(),
            training: technique.training.to_string(),
        }
        .into());
    }

    let allowance = availability(
        character.stance.as_ref(),
        &character.statuses,
        character.techniques_modifier,
    );

    if selected.level.is_basic_or_mastered() {
        // A miss still allows one use once balance has been shifted
        let limit = if allowance.requires_balance_shift {
            allowance.basic_mastered_count.max(1)
        } else {
            allowance.basic_mastered_count
        };
        if character.selected_techniques.len() as u32 >= limit {
            return Err(SelectionRejection::BasicMasteredLimit { limit }.into());
        }
    } else if !allowance.can_use_learned_or_practiced {
        return Err(SelectionRejection::LearnedPracticedNotAllowed.into());
    }

    Ok(selected)
}

fn check_npc(character: &Character, npc: &NpcDetails, choice: &TechniqueChoice) -> Result<SelectedTechnique> {
    let TechniqueChoice::Named(name) = choice else {
        return Err(ExchangeError::NotApplicable(
            "non-player characters select techniques by name".into(),
        ));
    };

    let technique = lookup(name)?;
    if !npc_may_use(npc, technique) {
        return Err(SelectionRejection::NotAvailable {
            technique: technique.name.to_string(),
        }
        .into());
    }

    let selected = SelectedTechnique {
        level: if technique.is_basic() {
            SelectionLevel::Basic
        } else {
            SelectionLevel::Mastered
        },
        ..SelectedTechnique::basic(technique)
    };

    ensure_not_selected(character, &selected)?;
    ensure_approach(character, technique)?;

    let limit = techniques_allowed(
        character.stance.as_ref(),
        character.techniques_modifier,
        &character.statuses,
    );
    if character.selected_techniques.len() as u32 >= limit {
        return Err(SelectionRejection::TechniqueLimit { limit }.into());
    }

    Ok(selected)
}

fn lookup(name: &str) -> Result<&'static Technique> {
    find_technique(name).ok_or_else(|| ExchangeError::UnknownTechnique(name.to_string()))
}

fn npc_may_use(npc: &NpcDetails, technique: &Technique) -> bool {
    technique.is_basic()
        || npc
            .available_techniques
            .iter()
            .any(|name| name.trim().eq_ignore_ascii_case(technique.name))
}

fn ensure_not_selected(character: &Character, selected: &SelectedTechnique) -> Result<()> {
    if character
        .selected_techniques
        .iter()
        .any(|t| t.source_id == selected.source_id)
    {
        return Err(SelectionRejection::AlreadySelected {
            technique: selected.name.clone(),
        }
        .into());
    }
    Ok(())
}

fn ensure_approach(character: &Character, technique: &Technique) -> Result<()> {
    if !technique.usable_with(character.approach) {
        return Err(SelectionRejection::ApproachIncompatible {
            technique: technique.name.to_string(),
        }
        .into());
    }
    Ok(())
}
