pub mod config;
pub mod error;
pub mod types;

pub use config::{ExchangeConfig, TierLimits};
pub use error::{ExchangeError, Result, SelectionRejection};
pub use types::{Approach, CharacterId, CharacterKind, ModifierId, NpcTier, StatusId, TechniqueId, TemplateId};
