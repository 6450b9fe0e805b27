//! Action order
//!
//! Defend & Maneuver acts first, then Advance & Attack, then Evade & Observe.
//! Characters with no approach are left out. Ties keep roster order.

use crate::core::types::{Approach, CharacterId, CharacterKind};
use crate::entity::character::Character;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOrderEntry {
    pub character_id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
    pub approach: Approach,
    pub priority: u8,
}

/// Derive the acting order from a roster
pub fn action_order<'a, I>(roster: I) -> Vec<ActionOrderEntry>
where
    I: IntoIterator<Item = &'a Character>,
{
    let mut entries: Vec<ActionOrderEntry> = roster
        .into_iter()
        .filter_map(|c| {
            let priority = c.approach.priority()?;
            Some(ActionOrderEntry {
                character_id: c.id,
                name: c.name.clone(),
                kind: c.kind(),
                approach: c.approach,
                priority,
            })
        })
        .collect();

    // sort_by_key is stable
    entries.sort_by_key(|e| e.priority);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExchangeConfig;
    use crate::core::types::NpcTier;
    use crate::entity::character::CharacterDraft;

    fn with_approach(name: &str, approach: Approach) -> Character {
        let mut c = CharacterDraft::pc(name, "The Bold").build(&ExchangeConfig::default());
        c.set_approach(approach);
        c
    }

    #[test]
    fn test_order_by_priority_with_stable_ties() {
        let roster = vec![
            with_approach("A", Approach::DefendManeuver),
            with_approach("B", Approach::AdvanceAttack),
            with_approach("C", Approach::None),
            with_approach("D", Approach::DefendManeuver),
        ];

        let names: Vec<_> = action_order(&roster).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "D", "B"]);
    }

    #[test]
    fn test_evade_acts_last() {
        let roster = vec![
            with_approach("Scout", Approach::EvadeObserve),
            with_approach("Brawler", Approach::AdvanceAttack),
        ];
        let order = action_order(&roster);
        assert_eq!(order[0].name, "Brawler");
        assert_eq!(order[0].priority, 2);
        assert_eq!(order[1].priority, 3);
    }

    #[test]
    fn test_mixed_roster_keeps_kind() {
        let mut npc = CharacterDraft::npc("Soldier", NpcTier::Minor).build(&ExchangeConfig::default());
        npc.set_approach(Approach::DefendManeuver);
        let pc = with_approach("Aang", Approach::DefendManeuver);

        let order = action_order([&pc, &npc]);
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].kind, CharacterKind::Pc);
        assert_eq!(order[1].kind, CharacterKind::Npc);
        assert_eq!(order[1].character_id, npc.id);
    }

    #[test]
    fn test_empty_roster() {
        let roster: Vec<Character> = Vec::new();
        assert!(action_order(&roster).is_empty());
    }
}
