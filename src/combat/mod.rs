//! Exchange combat rules
//!
//! Stance resolution, technique allowance, the selection gate and action
//! order. Everything here is pure or mutates a single character record.

pub mod availability;
pub mod constants;
pub mod order;
pub mod selection;
pub mod stance;

pub use availability::{availability, techniques_allowed, TechniqueAvailability};
pub use order::{action_order, ActionOrderEntry};
pub use selection::{check_selection, offered_techniques, select_technique, TechniqueChoice};
pub use stance::{resolve_stance, roll_stance, Stance, StanceRoll, StanceTier};
