//! Bounded state transitions on a character record
//!
//! Every mutator keeps the record inside its invariants: fatigue in
//! `0..=max_fatigue`, balance within its meter, unknown condition types
//! ignored.

use crate::combat::stance::{resolve_stance, Stance, StanceRoll};
use crate::core::error::{ExchangeError, Result};
use crate::core::types::{Approach, ModifierId, StatusId, TechniqueId};
use crate::entity::balance::Principles;
use crate::entity::character::Character;
use crate::entity::conditions::{ConditionType, Modifier, Status};
use crate::entity::playbook::principles_for;
use crate::techniques::{find_technique, CharacterTechnique, Mastery};

impl Character {
    /// Add `delta` to fatigue, clamped to `0..=max_fatigue`
    pub fn adjust_fatigue(&mut self, delta: i32) {
        self.fatigue = self.fatigue.saturating_add(delta).clamp(0, self.max_fatigue);
    }

    /// Shift the balance meter by `delta`, clamped to its range
    pub fn adjust_balance(&mut self, delta: i32) {
        self.balance.shift(delta);
    }

    /// Flip a condition's mark. Returns false (and changes nothing) when the
    /// character has no slot for that condition.
    pub fn toggle_condition(&mut self, kind: ConditionType) -> bool {
        match self.conditions.iter_mut().find(|c| c.kind == kind) {
            Some(condition) => {
                condition.marked = !condition.marked;
                true
            }
            None => false,
        }
    }

    /// Restore the creation snapshot and clear all exchange-transient state
    pub fn reset_to_base(&mut self) {
        self.fatigue = self.base_state.fatigue;
        self.balance = self.base_state.balance.clone();
        self.conditions = self.base_state.conditions.clone();
        self.statuses = self.base_state.statuses.clone();
        self.approach = Approach::None;
        self.stance = None;
        self.techniques_modifier = 0;
        self.selected_techniques.clear();
        self.modifiers.clear();
    }

    /// Check a record read back from storage and pull its stored values into
    /// range. Broken ranges are rejected; the stance is re-derived from its
    /// roll total.
    pub fn restore_invariants(&mut self) -> Result<()> {
        if self.max_fatigue < 1 {
            return Err(ExchangeError::InvalidRecord(format!(
                "{}: max fatigue {} is below 1",
                self.name, self.max_fatigue
            )));
        }
        for balance in [&self.balance, &self.base_state.balance] {
            if balance.min > balance.max {
                return Err(ExchangeError::InvalidRecord(format!(
                    "{}: balance range {}..={} is empty",
                    self.name, balance.min, balance.max
                )));
            }
        }

        self.fatigue = self.fatigue.clamp(0, self.max_fatigue);
        self.base_state.fatigue = self.base_state.fatigue.clamp(0, self.max_fatigue);
        self.balance.set(self.balance.current);
        self.base_state.balance.set(self.base_state.balance.current);
        if let Some(stance) = self.stance {
            self.stance = Some(resolve_stance(StanceRoll::new(i64::from(stance.result))?));
        }
        Ok(())
    }

    /// Add a training type to a PC; already known training is kept once
    pub fn add_training(&mut self, training: &str) -> Result<()> {
        let pc = self.as_pc_mut().ok_or_else(|| {
            ExchangeError::NotApplicable("only player characters have training".into())
        })?;
        let training = training.trim();
        if !pc.training.iter().any(|t| t.eq_ignore_ascii_case(training)) {
            pc.training.push(training.to_string());
        }
        Ok(())
    }

    pub fn set_approach(&mut self, approach: Approach) {
        self.approach = approach;
    }

    /// Replace the stance. Selected techniques are left alone.
    pub fn set_stance(&mut self, stance: Stance) {
        self.stance = Some(stance);
    }

    /// Resolve a manually entered total and store it as the stance
    pub fn enter_stance(&mut self, total: i64) -> Result<Stance> {
        let stance = resolve_stance(StanceRoll::new(total)?);
        self.set_stance(stance);
        Ok(stance)
    }

    pub fn clear_stance(&mut self) {
        self.stance = None;
    }

    pub fn set_techniques_modifier(&mut self, modifier: i32) {
        self.techniques_modifier = modifier;
    }

    pub fn adjust_techniques_modifier(&mut self, delta: i32) {
        self.techniques_modifier = self.techniques_modifier.saturating_add(delta);
    }

    pub fn add_status(&mut self, status: Status) {
        self.statuses.push(status);
    }

    pub fn remove_status(&mut self, id: StatusId) -> Option<Status> {
        let index = self.statuses.iter().position(|s| s.id == id)?;
        Some(self.statuses.remove(index))
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    pub fn remove_modifier(&mut self, id: ModifierId) -> Option<Modifier> {
        let index = self.modifiers.iter().position(|m| m.id == id)?;
        Some(self.modifiers.remove(index))
    }

    pub fn clear_selected_techniques(&mut self) {
        self.selected_techniques.clear();
    }

    /// Drop one selection by source id
    pub fn deselect_technique(&mut self, source_id: &str) -> bool {
        let before = self.selected_techniques.len();
        self.selected_techniques.retain(|t| t.source_id != source_id);
        self.selected_techniques.len() != before
    }

    /// Change a PC's playbook. The live meter takes the new principles and
    /// keeps its value, clamped to the range. The base state is untouched.
    pub fn set_playbook(&mut self, playbook: &str) -> Result<()> {
        let pc = self.as_pc_mut().ok_or_else(|| {
            ExchangeError::NotApplicable("only player characters have a playbook".into())
        })?;
        pc.playbook = playbook.trim().to_string();

        let (left, right) = principles_for(playbook);
        let (min, max) = (self.balance.min, self.balance.max);
        self.balance.rebase(
            Principles::Opposed {
                left: left.to_string(),
                right: right.to_string(),
            },
            min,
            max,
        );
        Ok(())
    }

    /// Teach a PC a catalog technique
    pub fn learn_technique(&mut self, name: &str, mastery: Mastery) -> Result<TechniqueId> {
        let technique =
            find_technique(name).ok_or_else(|| ExchangeError::UnknownTechnique(name.to_string()))?;
        let pc = self.as_pc_mut().ok_or_else(|| {
            ExchangeError::NotApplicable("only player characters learn techniques".into())
        })?;

        if let Some(existing) = pc
            .techniques
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(technique.name))
        {
            existing.mastery = existing.mastery.max(mastery);
            return Ok(existing.id);
        }

        let known = CharacterTechnique::new(technique.name, mastery);
        let id = known.id;
        pc.techniques.push(known);
        Ok(id)
    }

    pub fn forget_technique(&mut self, id: TechniqueId) -> Result<CharacterTechnique> {
        let pc = self.as_pc_mut().ok_or_else(|| {
            ExchangeError::NotApplicable("only player characters know techniques".into())
        })?;
        let index = pc
            .techniques
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ExchangeError::UnknownTechnique(id.to_string()))?;
        Ok(pc.techniques.remove(index))
    }

    pub fn set_mastery(&mut self, id: TechniqueId, mastery: Mastery) -> Result<()> {
        let pc = self.as_pc_mut().ok_or_else(|| {
            ExchangeError::NotApplicable("only player characters know techniques".into())
        })?;
        let technique = pc
            .techniques
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ExchangeError::UnknownTechnique(id.to_string()))?;
        technique.mastery = mastery;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::ExchangeConfig;
    use crate::core::error::ExchangeError;
    use crate::core::types::{Approach, NpcTier};
    use crate::entity::character::{Character, CharacterDraft};
    use crate::entity::conditions::{ConditionType, Modifier, ModifierKind, Status};
    use crate::techniques::{find_technique, Mastery, SelectedTechnique};

    fn pc() -> Character {
        CharacterDraft::pc("Aang", "The Successor").build(&ExchangeConfig::default())
    }

    #[test]
    fn test_fatigue_clamps() {
        let mut c = pc();
        c.adjust_fatigue(-1);
        assert_eq!(c.fatigue, 0);
        c.adjust_fatigue(4);
        assert_eq!(c.fatigue, 4);
        c.adjust_fatigue(10);
        assert_eq!(c.fatigue, c.max_fatigue);
        c.adjust_fatigue(1);
        assert_eq!(c.fatigue, c.max_fatigue);
        assert!(c.is_exhausted());
    }

    #[test]
    fn test_balance_at_min_stays() {
        let mut c = pc();
        c.adjust_balance(-3);
        assert_eq!(c.balance.current, -3);
        c.adjust_balance(-1);
        assert_eq!(c.balance.current, -3);
    }

    #[test]
    fn test_toggle_condition() {
        let mut c = pc();
        assert!(c.toggle_condition(ConditionType::Angry));
        assert!(c.condition(ConditionType::Angry).unwrap().marked);
        assert!(c.toggle_condition(ConditionType::Angry));
        assert!(!c.condition(ConditionType::Angry).unwrap().marked);
    }

    #[test]
    fn test_toggle_missing_condition_is_noop() {
        let mut c = pc();
        let before = c.clone();
        assert!(!c.toggle_condition(ConditionType::Zealous));
        assert_eq!(c, before);
    }

    #[test]
    fn test_reset_to_base_clears_transient_state() {
        let mut c = pc();
        c.adjust_fatigue(3);
        c.adjust_balance(2);
        c.toggle_condition(ConditionType::Afraid);
        c.add_status(Status::new("Impaired"));
        c.add_modifier(Modifier::new(ModifierKind::Forward, 1));
        c.set_approach(Approach::AdvanceAttack);
        c.enter_stance(11).unwrap();
        c.set_techniques_modifier(2);
        c.selected_techniques
            .push(SelectedTechnique::basic(find_technique("Strike").unwrap()));

        c.reset_to_base();

        assert_eq!(c.fatigue, 0);
        assert_eq!(c.balance.current, 0);
        assert!(c.marked_conditions().next().is_none());
        assert!(c.statuses.is_empty());
        assert!(c.modifiers.is_empty());
        assert_eq!(c.approach, Approach::None);
        assert!(c.stance.is_none());
        assert_eq!(c.techniques_modifier, 0);
        assert!(c.selected_techniques.is_empty());
    }

    #[test]
    fn test_reset_restores_independent_copy() {
        let mut c = pc();
        c.reset_to_base();
        c.toggle_condition(ConditionType::Guilty);
        assert!(c.base_state.conditions.iter().all(|cond| !cond.marked));
    }

    #[test]
    fn test_enter_stance_rejects_out_of_range() {
        let mut c = pc();
        c.enter_stance(8).unwrap();
        let before = c.clone();
        assert!(matches!(c.enter_stance(13), Err(ExchangeError::StanceOutOfRange(13))));
        assert_eq!(c, before);
    }

    #[test]
    fn test_remove_status_and_modifier() {
        let mut c = pc();
        let status = Status::new("Favored");
        let status_id = status.id;
        c.add_status(status);
        let modifier = Modifier::new(ModifierKind::Ongoing, -1).applying_to("intimidate");
        let modifier_id = modifier.id;
        c.add_modifier(modifier);

        assert!(c.remove_status(status_id).is_some());
        assert!(c.remove_status(status_id).is_none());
        assert!(c.remove_modifier(modifier_id).is_some());
        assert!(c.modifiers.is_empty());
    }

    #[test]
    fn test_set_playbook_rederives_principles() {
        let mut c = pc();
        c.adjust_balance(2);
        c.set_playbook("The Hammer").unwrap();
        assert_eq!(c.balance.describe(), "Care 2");
        assert_eq!(c.as_pc().unwrap().playbook, "The Hammer");
        // base state keeps its original principles
        assert_ne!(c.base_state.balance.principles, c.balance.principles);
    }

    #[test]
    fn test_set_playbook_on_npc_fails() {
        let mut npc = CharacterDraft::npc("Trader", NpcTier::Minor).build(&ExchangeConfig::default());
        assert!(matches!(npc.set_playbook("The Bold"), Err(ExchangeError::NotApplicable(_))));
    }

    #[test]
    fn test_learn_technique() {
        let mut c = pc();
        let id = c.learn_technique("air cushion", Mastery::Learned).unwrap();
        let known = &c.as_pc().unwrap().techniques;
        assert_eq!(known.len(), 1);
        assert_eq!(known[0].name, "Air Cushion");

        // learning again keeps the higher mastery and the same id
        let again = c.learn_technique("Air Cushion", Mastery::Practiced).unwrap();
        assert_eq!(again, id);
        assert_eq!(c.as_pc().unwrap().techniques[0].mastery, Mastery::Practiced);

        c.set_mastery(id, Mastery::Mastered).unwrap();
        assert_eq!(c.as_pc().unwrap().techniques[0].mastery, Mastery::Mastered);

        assert!(c.forget_technique(id).is_ok());
        assert!(c.as_pc().unwrap().techniques.is_empty());
    }

    #[test]
    fn test_learn_unknown_technique_leaves_record() {
        let mut c = pc();
        let before = c.clone();
        assert!(matches!(
            c.learn_technique("Bloodbending", Mastery::Learned),
            Err(ExchangeError::UnknownTechnique(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_add_training_once() {
        let mut c = pc();
        c.add_training("Air").unwrap();
        c.add_training(" air ").unwrap();
        assert_eq!(c.as_pc().unwrap().training, vec!["Air".to_string()]);

        let mut npc = CharacterDraft::npc("Trader", NpcTier::Minor).build(&ExchangeConfig::default());
        assert!(matches!(npc.add_training("Fire"), Err(ExchangeError::NotApplicable(_))));
    }

    #[test]
    fn test_restore_invariants_clamps_stored_values() {
        let mut c = pc();
        c.enter_stance(11).unwrap();
        c.fatigue = 42;
        c.base_state.fatigue = -2;
        c.balance.current = 9;
        if let Some(stance) = c.stance.as_mut() {
            stance.can_use_basic_mastered = 7;
        }

        c.restore_invariants().unwrap();
        assert_eq!(c.fatigue, c.max_fatigue);
        assert_eq!(c.base_state.fatigue, 0);
        assert_eq!(c.balance.current, 3);
        assert_eq!(c.stance.unwrap().can_use_basic_mastered, 2);
    }

    #[test]
    fn test_restore_invariants_rejects_broken_ranges() {
        let mut c = pc();
        c.balance.min = 5;
        assert!(matches!(c.restore_invariants(), Err(ExchangeError::InvalidRecord(_))));

        let mut c = pc();
        c.max_fatigue = 0;
        assert!(matches!(c.restore_invariants(), Err(ExchangeError::InvalidRecord(_))));

        let mut c = pc();
        c.enter_stance(7).unwrap();
        if let Some(stance) = c.stance.as_mut() {
            stance.result = 40;
        }
        assert!(matches!(c.restore_invariants(), Err(ExchangeError::StanceOutOfRange(40))));
    }
}
