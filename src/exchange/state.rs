//! The current exchange: both rosters plus the round/phase clock
//!
//! One `ExchangeState` value is owned by the caller and passed to every
//! operation. Id-addressed operations return `CharacterNotFound` for ids on
//! neither roster and leave every entry untouched.

use crate::combat::availability::{availability, techniques_allowed, TechniqueAvailability};
use crate::combat::order::{action_order, ActionOrderEntry};
use crate::combat::selection::{offered_techniques, select_technique, TechniqueChoice};
use crate::combat::stance::{resolve_stance, Stance, StanceRoll};
use crate::core::config::ExchangeConfig;
use crate::core::error::{ExchangeError, Result};
use crate::core::types::{Approach, CharacterId, CharacterKind, ModifierId, StatusId, TechniqueId};
use crate::entity::character::{Character, CharacterDraft};
use crate::entity::conditions::{ConditionType, Modifier, Status};
use crate::exchange::phase::{Phase, PhaseClock};
use crate::techniques::{CharacterTechnique, Mastery, SelectedTechnique, Technique};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeState {
    pub pcs: Vec<Character>,
    pub npcs: Vec<Character>,
    #[serde(flatten)]
    pub clock: PhaseClock,
    #[serde(skip)]
    config: ExchangeConfig,
}

impl Default for ExchangeState {
    fn default() -> Self {
        Self::new(ExchangeConfig::default())
    }
}

impl ExchangeState {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            pcs: Vec::new(),
            npcs: Vec::new(),
            clock: PhaseClock::new(),
            config,
        }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.clock.round
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    pub fn add_pc(&mut self, draft: &CharacterDraft) -> Result<CharacterId> {
        if draft.kind() != CharacterKind::Pc {
            return Err(ExchangeError::NotApplicable(format!(
                "{} is not a player character",
                draft.name
            )));
        }
        self.insert(draft)
    }

    pub fn add_npc(&mut self, draft: &CharacterDraft) -> Result<CharacterId> {
        if draft.kind() != CharacterKind::Npc {
            return Err(ExchangeError::NotApplicable(format!(
                "{} is not a non-player character",
                draft.name
            )));
        }
        self.insert(draft)
    }

    /// Add a draft to whichever roster its kind belongs to
    pub fn add_character(&mut self, draft: &CharacterDraft) -> Result<CharacterId> {
        self.insert(draft)
    }

    fn insert(&mut self, draft: &CharacterDraft) -> Result<CharacterId> {
        let kind = draft.kind();
        let (roster, cap) = match kind {
            CharacterKind::Pc => (&mut self.pcs, self.config.max_pcs),
            CharacterKind::Npc => (&mut self.npcs, self.config.max_npcs),
        };

        if roster.len() >= cap {
            warn!(%kind, cap, name = %draft.name, "roster full, character not added");
            return Err(ExchangeError::RosterFull { kind, cap });
        }

        let character = draft.build(&self.config);
        let id = character.id;
        info!(%kind, %id, name = %character.name, "character added");
        roster.push(character);
        Ok(id)
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Result<Character> {
        for roster in [&mut self.pcs, &mut self.npcs] {
            if let Some(index) = roster.iter().position(|c| c.id == id) {
                let removed = roster.remove(index);
                info!(%id, name = %removed.name, "character removed");
                return Ok(removed);
            }
        }
        debug!(%id, "remove: no such character");
        Err(ExchangeError::CharacterNotFound(id))
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.pcs
            .iter_mut()
            .chain(self.npcs.iter_mut())
            .find(|c| c.id == id)
    }

    /// PCs then NPCs, each in insertion order
    pub fn characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.pcs.iter().chain(self.npcs.iter())
    }

    /// First character whose name matches, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        let name = name.trim();
        self.characters().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Empty both rosters and restart the clock
    pub fn clear_exchange(&mut self) {
        self.pcs.clear();
        self.npcs.clear();
        self.clock.reset_phase();
        info!("exchange cleared");
    }

    fn with_character<T>(&mut self, id: CharacterId, f: impl FnOnce(&mut Character) -> T) -> Result<T> {
        match self.character_mut(id) {
            Some(character) => Ok(f(character)),
            None => {
                debug!(%id, "no such character");
                Err(ExchangeError::CharacterNotFound(id))
            }
        }
    }

    fn try_with_character<T>(
        &mut self,
        id: CharacterId,
        f: impl FnOnce(&mut Character) -> Result<T>,
    ) -> Result<T> {
        self.with_character(id, f)?
    }

    fn get(&self, id: CharacterId) -> Result<&Character> {
        self.character(id)
            .ok_or(ExchangeError::CharacterNotFound(id))
    }

    // ------------------------------------------------------------------
    // Character operations by id
    // ------------------------------------------------------------------

    pub fn rename(&mut self, id: CharacterId, name: &str) -> Result<()> {
        let name = name.trim().to_string();
        self.with_character(id, |c| c.name = name)
    }

    pub fn set_approach(&mut self, id: CharacterId, approach: Approach) -> Result<()> {
        self.with_character(id, |c| c.set_approach(approach))
    }

    /// Roll two dice for `id` and store the resolved stance
    pub fn roll_stance_for<R: Rng + ?Sized>(&mut self, id: CharacterId, rng: &mut R) -> Result<Stance> {
        self.try_with_character(id, |c| {
            let roll = StanceRoll::roll(rng);
            let stance = resolve_stance(roll);
            c.set_stance(stance);
            debug!(name = %c.name, roll = roll.value(), tier = ?stance.tier(), "stance rolled");
            Ok(stance)
        })
    }

    /// Store a manually entered total; out-of-range totals are rejected
    pub fn set_stance_for(&mut self, id: CharacterId, total: i64) -> Result<Stance> {
        self.try_with_character(id, |c| c.enter_stance(total))
    }

    pub fn clear_stance(&mut self, id: CharacterId) -> Result<()> {
        self.with_character(id, Character::clear_stance)
    }

    pub fn adjust_fatigue(&mut self, id: CharacterId, delta: i32) -> Result<i32> {
        self.with_character(id, |c| {
            c.adjust_fatigue(delta);
            c.fatigue
        })
    }

    pub fn adjust_balance(&mut self, id: CharacterId, delta: i32) -> Result<i32> {
        self.with_character(id, |c| {
            c.adjust_balance(delta);
            c.balance.current
        })
    }

    /// Returns whether the character had a slot for the condition
    pub fn toggle_condition(&mut self, id: CharacterId, kind: ConditionType) -> Result<bool> {
        self.with_character(id, |c| c.toggle_condition(kind))
    }

    pub fn add_status(&mut self, id: CharacterId, status: Status) -> Result<StatusId> {
        self.with_character(id, |c| {
            let status_id = status.id;
            c.add_status(status);
            status_id
        })
    }

    pub fn remove_status(&mut self, id: CharacterId, status_id: StatusId) -> Result<Option<Status>> {
        self.with_character(id, |c| c.remove_status(status_id))
    }

    pub fn add_modifier(&mut self, id: CharacterId, modifier: Modifier) -> Result<ModifierId> {
        self.with_character(id, |c| {
            let modifier_id = modifier.id;
            c.add_modifier(modifier);
            modifier_id
        })
    }

    pub fn remove_modifier(&mut self, id: CharacterId, modifier_id: ModifierId) -> Result<Option<Modifier>> {
        self.with_character(id, |c| c.remove_modifier(modifier_id))
    }

    pub fn set_techniques_modifier(&mut self, id: CharacterId, modifier: i32) -> Result<()> {
        self.with_character(id, |c| c.set_techniques_modifier(modifier))
    }

    pub fn select_technique(&mut self, id: CharacterId, choice: &TechniqueChoice) -> Result<SelectedTechnique> {
        self.try_with_character(id, |c| select_technique(c, choice))
    }

    pub fn deselect_technique(&mut self, id: CharacterId, source_id: &str) -> Result<bool> {
        self.with_character(id, |c| c.deselect_technique(source_id))
    }

    pub fn clear_selected_techniques(&mut self, id: CharacterId) -> Result<()> {
        self.with_character(id, Character::clear_selected_techniques)
    }

    pub fn reset_character_to_base(&mut self, id: CharacterId) -> Result<()> {
        self.with_character(id, Character::reset_to_base)
    }

    /// Reset every character on both rosters
    pub fn reset_all_to_base(&mut self) {
        for character in self.pcs.iter_mut().chain(self.npcs.iter_mut()) {
            character.reset_to_base();
        }
        info!("all characters reset to base state");
    }

    pub fn set_playbook(&mut self, id: CharacterId, playbook: &str) -> Result<()> {
        self.try_with_character(id, |c| c.set_playbook(playbook))
    }

    pub fn add_training(&mut self, id: CharacterId, training: &str) -> Result<()> {
        self.try_with_character(id, |c| {
            c.add_training(training)?;
            debug!(name = %c.name, training = training.trim(), "training added");
            Ok(())
        })
    }

    pub fn learn_technique(&mut self, id: CharacterId, name: &str, mastery: Mastery) -> Result<TechniqueId> {
        self.try_with_character(id, |c| c.learn_technique(name, mastery))
    }

    pub fn forget_technique(&mut self, id: CharacterId, technique_id: TechniqueId) -> Result<CharacterTechnique> {
        self.try_with_character(id, |c| c.forget_technique(technique_id))
    }

    pub fn set_mastery(&mut self, id: CharacterId, technique_id: TechniqueId, mastery: Mastery) -> Result<()> {
        self.try_with_character(id, |c| c.set_mastery(technique_id, mastery))
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    pub fn availability_for(&self, id: CharacterId) -> Result<TechniqueAvailability> {
        let c = self.get(id)?;
        Ok(availability(c.stance.as_ref(), &c.statuses, c.techniques_modifier))
    }

    pub fn techniques_allowed_for(&self, id: CharacterId) -> Result<u32> {
        let c = self.get(id)?;
        Ok(techniques_allowed(c.stance.as_ref(), c.techniques_modifier, &c.statuses))
    }

    pub fn offered_techniques(&self, id: CharacterId) -> Result<Vec<&'static Technique>> {
        Ok(offered_techniques(self.get(id)?))
    }

    pub fn action_order(&self) -> Vec<ActionOrderEntry> {
        action_order(self.characters())
    }

    // ------------------------------------------------------------------
    // Phase clock
    // ------------------------------------------------------------------

    pub fn next_phase(&mut self) -> Phase {
        let previous = self.clock.phase;
        let phase = self.clock.next_phase();
        info!(from = %previous, to = %phase, round = self.clock.round, "phase advanced");
        phase
    }

    pub fn reset_phase(&mut self) {
        self.clock.reset_phase();
        info!("phase reset to setup, round 1");
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot under the given config. Each record is checked
    /// and its stored values pulled back into range.
    pub fn from_json(json: &str, config: ExchangeConfig) -> Result<Self> {
        let mut state: ExchangeState = serde_json::from_str(json)?;
        let rosters = [
            (&mut state.pcs, CharacterKind::Pc, config.max_pcs),
            (&mut state.npcs, CharacterKind::Npc, config.max_npcs),
        ];
        for (roster, kind, cap) in rosters {
            if roster.len() > cap {
                return Err(ExchangeError::RosterFull { kind, cap });
            }
            for character in roster.iter_mut() {
                if character.kind() != kind {
                    return Err(ExchangeError::InvalidRecord(format!(
                        "{} is on the {} roster",
                        character.name, kind
                    )));
                }
                character.restore_invariants()?;
            }
        }
        state.config = config;
        info!(pcs = state.pcs.len(), npcs = state.npcs.len(), "snapshot restored");
        Ok(state)
    }
}
