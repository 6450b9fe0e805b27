//! Exchange integration tests
//!
//! Drives a full exchange through the public API, plus property checks on
//! stance tiers, clamping, resets and action order.

use exchange_tracker::combat::{
    availability, resolve_stance, techniques_allowed, Stance, StanceRoll, TechniqueChoice,
};
use exchange_tracker::core::config::ExchangeConfig;
use exchange_tracker::core::error::{ExchangeError, SelectionRejection};
use exchange_tracker::core::types::{Approach, CharacterId, NpcTier};
use exchange_tracker::entity::{CharacterDraft, ConditionType, Status};
use exchange_tracker::exchange::{ExchangeState, Phase};
use exchange_tracker::techniques::{CharacterTechnique, Mastery, SelectionLevel};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn stance(total: i64) -> Stance {
    resolve_stance(StanceRoll::new(total).unwrap())
}

fn approach_strategy() -> impl Strategy<Value = Approach> {
    prop_oneof![
        Just(Approach::DefendManeuver),
        Just(Approach::AdvanceAttack),
        Just(Approach::EvadeObserve),
        Just(Approach::None),
    ]
}

#[test]
fn test_full_exchange_round() {
    let mut state = ExchangeState::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let aang = state
        .add_pc(
            &CharacterDraft::pc("Aang", "The Successor")
                .training(&["Air"])
                .technique(CharacterTechnique::new("Air Cushion", Mastery::Practiced)),
        )
        .unwrap();
    let toph = state
        .add_pc(&CharacterDraft::pc("Toph", "The Adamant").training(&["Earth"]))
        .unwrap();
    let guard = state
        .add_npc(&CharacterDraft::npc("Town Guard", NpcTier::Minor).principle("Duty"))
        .unwrap();

    // setup -> approach
    assert_eq!(state.next_phase(), Phase::Approach);
    state.set_approach(aang, Approach::EvadeObserve).unwrap();
    state.set_approach(toph, Approach::AdvanceAttack).unwrap();
    state.set_approach(guard, Approach::DefendManeuver).unwrap();

    let order: Vec<CharacterId> = state.action_order().iter().map(|e| e.character_id).collect();
    assert_eq!(order, vec![guard, toph, aang]);

    // approach -> stance
    assert_eq!(state.next_phase(), Phase::Stance);
    for id in [aang, toph, guard] {
        let rolled = state.roll_stance_for(id, &mut rng).unwrap();
        assert!((2..=12).contains(&rolled.result));
    }
    // table override for a known outcome
    state.set_stance_for(toph, 10).unwrap();

    // stance -> action
    assert_eq!(state.next_phase(), Phase::Action);
    let selected = state
        .select_technique(toph, &TechniqueChoice::named("Smash"))
        .unwrap();
    assert_eq!(selected.level, SelectionLevel::Basic);
    state
        .select_technique(toph, &TechniqueChoice::named("Strike"))
        .unwrap();
    assert!(state
        .select_technique(toph, &TechniqueChoice::named("Pressure"))
        .is_err());

    state.adjust_fatigue(toph, 1).unwrap();
    state.adjust_balance(guard, 1).unwrap();
    state.toggle_condition(aang, ConditionType::Guilty).unwrap();

    // action -> resolution -> setup of the next round
    assert_eq!(state.next_phase(), Phase::Resolution);
    assert_eq!(state.next_phase(), Phase::Setup);
    assert_eq!(state.round(), 2);

    state.reset_all_to_base();
    for c in state.characters() {
        assert_eq!(c.approach, Approach::None);
        assert!(c.stance.is_none());
        assert!(c.selected_techniques.is_empty());
        assert_eq!(c.fatigue, 0);
        assert_eq!(c.balance.current, 0);
    }
}

#[test]
fn test_capacity_is_enforced_per_kind() {
    let mut state = ExchangeState::default();
    for i in 0..6 {
        state
            .add_pc(&CharacterDraft::pc(format!("Hero {}", i), "The Bold"))
            .unwrap();
    }
    let snapshot = state.to_json().unwrap();

    let err = state
        .add_pc(&CharacterDraft::pc("Hero 7", "The Bold"))
        .unwrap_err();
    assert!(matches!(err, ExchangeError::RosterFull { cap: 6, .. }));
    assert_eq!(state.to_json().unwrap(), snapshot);

    state
        .add_npc(&CharacterDraft::npc("Villain", NpcTier::Major))
        .unwrap();
    assert_eq!(state.npcs.len(), 1);
}

#[test]
fn test_missing_technique_leaves_character_intact() {
    let mut state = ExchangeState::default();
    let id = state
        .add_pc(&CharacterDraft::pc("Katara", "The Icon").training(&["Water"]))
        .unwrap();
    state.set_approach(id, Approach::AdvanceAttack).unwrap();
    state.set_stance_for(id, 11).unwrap();
    state
        .select_technique(id, &TechniqueChoice::named("Strike"))
        .unwrap();

    let before = state.character(id).cloned().unwrap();
    assert!(matches!(
        state.select_technique(id, &TechniqueChoice::named("Bloodbending")),
        Err(ExchangeError::UnknownTechnique(_))
    ));
    assert!(matches!(
        state.learn_technique(id, "Bloodbending", Mastery::Mastered),
        Err(ExchangeError::UnknownTechnique(_))
    ));
    assert_eq!(state.character(id), Some(&before));
}

#[test]
fn test_learned_technique_after_full_hit() {
    let mut state = ExchangeState::default();
    let id = state
        .add_pc(&CharacterDraft::pc("Katara", "The Icon").training(&["Water"]))
        .unwrap();
    let technique = state
        .learn_technique(id, "Crushing Grip of Seas", Mastery::Learned)
        .unwrap();
    state.set_approach(id, Approach::AdvanceAttack).unwrap();

    state.set_stance_for(id, 8).unwrap();
    let err = state
        .select_technique(id, &TechniqueChoice::Known(technique))
        .unwrap_err();
    assert!(matches!(
        err,
        ExchangeError::SelectionRejected(SelectionRejection::LearnedPracticedNotAllowed)
    ));

    state.set_stance_for(id, 12).unwrap();
    let selected = state
        .select_technique(id, &TechniqueChoice::Known(technique))
        .unwrap();
    assert!(selected.costs_fatigue);

    state.set_mastery(id, technique, Mastery::Mastered).unwrap();
    state.clear_selected_techniques(id).unwrap();
    let selected = state
        .select_technique(id, &TechniqueChoice::Known(technique))
        .unwrap();
    assert_eq!(selected.level, SelectionLevel::Mastered);
    assert!(!selected.costs_fatigue);
}

#[test]
fn test_npc_and_pc_counts_diverge() {
    let mut state = ExchangeState::default();
    let pc = state.add_pc(&CharacterDraft::pc("Zuko", "The Successor")).unwrap();
    let inspired = Status::new("Inspired").with_techniques_modifier(2);
    state.add_status(pc, inspired).unwrap();
    state.set_stance_for(pc, 8).unwrap();

    assert_eq!(state.availability_for(pc).unwrap().basic_mastered_count, 1);
    assert_eq!(state.techniques_allowed_for(pc).unwrap(), 3);
}

#[test]
fn test_favored_property_example() {
    let result = availability(Some(&stance(8)), &[Status::new("Favored")], 0);
    assert_eq!(result.basic_mastered_count, 2);
}

#[test]
fn test_action_order_property_example() {
    let mut state = ExchangeState::default();
    let mut ids = Vec::new();
    for (name, approach) in [
        ("A", Approach::DefendManeuver),
        ("B", Approach::AdvanceAttack),
        ("C", Approach::None),
        ("D", Approach::DefendManeuver),
    ] {
        let id = state.add_pc(&CharacterDraft::pc(name, "The Bold")).unwrap();
        state.set_approach(id, approach).unwrap();
        ids.push(id);
    }

    let order: Vec<CharacterId> = state.action_order().iter().map(|e| e.character_id).collect();
    assert_eq!(order, vec![ids[0], ids[3], ids[1]]);
}

#[test]
fn test_phase_cycle_property_example() {
    let mut state = ExchangeState::default();
    state.clock.round = 4;
    state.clock.phase = Phase::Resolution;
    state.next_phase();
    assert_eq!(state.phase(), Phase::Setup);
    assert_eq!(state.round(), 5);
}

proptest! {
    #[test]
    fn prop_stance_tiers(total in 2i64..=12) {
        let s = stance(total);
        if total <= 6 {
            prop_assert!(s.requires_balance_shift);
            prop_assert_eq!(s.can_use_basic_mastered, 0);
        } else if total <= 9 {
            prop_assert_eq!(s.can_use_basic_mastered, 1);
            prop_assert!(!s.can_use_learned_practiced);
        } else {
            prop_assert_eq!(s.can_use_basic_mastered, 2);
            prop_assert!(s.can_use_learned_practiced);
        }
    }

    #[test]
    fn prop_out_of_range_stance_rejected(total in prop_oneof![i64::MIN..2i64, 13i64..i64::MAX]) {
        prop_assert!(StanceRoll::new(total).is_err());
    }

    #[test]
    fn prop_fatigue_and_balance_stay_in_range(deltas in prop::collection::vec(-10i32..10, 0..30)) {
        let mut pc = CharacterDraft::pc("Sokka", "The Bold").build(&ExchangeConfig::default());
        for delta in deltas {
            pc.adjust_fatigue(delta);
            pc.adjust_balance(delta);
            prop_assert!((0..=pc.max_fatigue).contains(&pc.fatigue));
            prop_assert!((pc.balance.min..=pc.balance.max).contains(&pc.balance.current));
        }
    }

    #[test]
    fn prop_reset_is_idempotent(fatigue in -5i32..10, balance in -5i32..5, total in 2i64..=12) {
        let mut pc = CharacterDraft::pc("Suki", "The Guardian").build(&ExchangeConfig::default());
        pc.adjust_fatigue(fatigue);
        pc.adjust_balance(balance);
        pc.toggle_condition(ConditionType::Troubled);
        pc.enter_stance(total).unwrap();
        pc.set_techniques_modifier(balance);

        pc.reset_to_base();
        let once = pc.clone();
        pc.reset_to_base();
        prop_assert_eq!(pc, once);
    }

    #[test]
    fn prop_action_order_sorted_and_stable(approaches in prop::collection::vec(approach_strategy(), 0..12)) {
        let config = ExchangeConfig::default();
        let roster: Vec<_> = approaches
            .iter()
            .enumerate()
            .map(|(i, approach)| {
                let mut c = CharacterDraft::pc(format!("C{}", i), "The Bold").build(&config);
                c.set_approach(*approach);
                c
            })
            .collect();

        let order = exchange_tracker::combat::action_order(&roster);
        let acting = approaches.iter().filter(|a| **a != Approach::None).count();
        prop_assert_eq!(order.len(), acting);

        for pair in order.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                let first = roster.iter().position(|c| c.id == pair[0].character_id);
                let second = roster.iter().position(|c| c.id == pair[1].character_id);
                prop_assert!(first < second);
            }
        }
    }

    #[test]
    fn prop_npc_count_never_negative(total in 2i64..=12, modifier in -20i32..20) {
        let s = stance(total);
        let allowed = techniques_allowed(Some(&s), modifier, &[]);
        let expected = (i64::from(s.techniques_allowed) + i64::from(modifier)).max(0);
        prop_assert_eq!(i64::from(allowed), expected);
    }
}
