//! Technique availability
//!
//! Two independent counts:
//! - `availability` is the structured player-character allowance
//!   (basic/mastered count, learned/practiced gate, balance shift).
//! - `techniques_allowed` is the flat NPC count, which also sums every
//!   status's technique modifier.

use crate::combat::stance::Stance;
use crate::entity::conditions::Status;
use serde::{Deserialize, Serialize};

/// What a player character may use this exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueAvailability {
    pub basic_mastered_count: u32,
    pub can_use_learned_or_practiced: bool,
    pub requires_balance_shift: bool,
    /// Human-readable summary; never read back by the engine
    pub message: String,
}

impl TechniqueAvailability {
    fn roll_first() -> Self {
        Self {
            basic_mastered_count: 0,
            can_use_learned_or_practiced: false,
            requires_balance_shift: false,
            message: "Roll stance first".to_string(),
        }
    }
}

/// Player-character allowance for the current stance
pub fn availability(
    stance: Option<&Stance>,
    statuses: &[Status],
    techniques_modifier: i32,
) -> TechniqueAvailability {
    let Some(stance) = stance else {
        return TechniqueAvailability::roll_first();
    };

    let favored = i64::from(statuses.iter().any(Status::is_favored));
    let count = i64::from(stance.can_use_basic_mastered) + i64::from(techniques_modifier) + favored;
    let basic_mastered_count = count.clamp(0, i64::from(u32::MAX)) as u32;

    let can_use_learned_or_practiced = stance.can_use_learned_practiced;
    let requires_balance_shift = stance.requires_balance_shift;

    let message = if requires_balance_shift {
        "Miss: shift your balance to use one basic or mastered technique".to_string()
    } else if can_use_learned_or_practiced {
        format!(
            "Use one learned or practiced technique, or up to {} basic/mastered",
            basic_mastered_count
        )
    } else if basic_mastered_count > 0 {
        format!("Use up to {} basic/mastered technique(s)", basic_mastered_count)
    } else {
        "No techniques available".to_string()
    };

    TechniqueAvailability {
        basic_mastered_count,
        can_use_learned_or_practiced,
        requires_balance_shift,
        message,
    }
}

/// Flat NPC technique count: stance + manual modifier + every status modifier
pub fn techniques_allowed(stance: Option<&Stance>, techniques_modifier: i32, statuses: &[Status]) -> u32 {
    let Some(stance) = stance else {
        return 0;
    };

    let status_total: i64 = statuses
        .iter()
        .map(|s| i64::from(s.techniques_modifier.unwrap_or(0)))
        .sum();
    let total = i64::from(stance.techniques_allowed) + i64::from(techniques_modifier) + status_total;
    total.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::stance::{resolve_stance, StanceRoll};

    fn stance(total: i64) -> Stance {
        resolve_stance(StanceRoll::new(total).unwrap())
    }

    #[test]
    fn test_no_stance_means_roll_first() {
        let result = availability(None, &[], 3);
        assert_eq!(result.basic_mastered_count, 0);
        assert!(!result.can_use_learned_or_practiced);
        assert!(!result.requires_balance_shift);
        assert_eq!(result.message, "Roll stance first");
        assert_eq!(techniques_allowed(None, 3, &[]), 0);
    }

    #[test]
    fn test_favored_adds_one() {
        let statuses = vec![Status::new("Favored")];
        let result = availability(Some(&stance(8)), &statuses, 0);
        assert_eq!(result.basic_mastered_count, 2);
    }

    #[test]
    fn test_favored_counts_once() {
        let statuses = vec![Status::new("Favored"), Status::new("favored")];
        let result = availability(Some(&stance(8)), &statuses, 0);
        assert_eq!(result.basic_mastered_count, 2);
    }

    #[test]
    fn test_negative_modifier_floors_at_zero() {
        let result = availability(Some(&stance(7)), &[], -5);
        assert_eq!(result.basic_mastered_count, 0);
        assert_eq!(result.message, "No techniques available");
    }

    #[test]
    fn test_message_priority() {
        let miss = availability(Some(&stance(4)), &[Status::new("Favored")], 0);
        assert!(miss.requires_balance_shift);
        assert!(miss.message.starts_with("Miss"));

        let full = availability(Some(&stance(11)), &[], 0);
        assert!(full.message.contains("learned or practiced"));
        assert!(full.message.contains('2'));

        let partial = availability(Some(&stance(9)), &[], 1);
        assert_eq!(partial.message, "Use up to 2 basic/mastered technique(s)");
    }

    #[test]
    fn test_pc_formula_ignores_status_modifiers() {
        let statuses = vec![Status::new("Inspired").with_techniques_modifier(2)];
        let result = availability(Some(&stance(8)), &statuses, 0);
        assert_eq!(result.basic_mastered_count, 1);
    }

    #[test]
    fn test_npc_formula_sums_status_modifiers() {
        let statuses = vec![
            Status::new("Inspired").with_techniques_modifier(2),
            Status::new("Impaired").with_techniques_modifier(-1),
            Status::new("Favored"),
        ];
        assert_eq!(techniques_allowed(Some(&stance(8)), 0, &statuses), 2);
        assert_eq!(techniques_allowed(Some(&stance(12)), 1, &statuses), 4);
        assert_eq!(techniques_allowed(Some(&stance(3)), -2, &statuses), 0);
    }
}
