//! Characters and the bounded state they carry through an exchange

pub mod balance;
pub mod character;
pub mod conditions;
pub mod mutations;
pub mod playbook;

pub use balance::{Balance, Principles};
pub use character::{BaseState, Character, CharacterDetails, CharacterDraft, NpcDetails, PcDetails};
pub use conditions::{Condition, ConditionType, Modifier, ModifierKind, Status};
