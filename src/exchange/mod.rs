//! Exchange state: rosters, round counter and phase cycle

pub mod phase;
pub mod state;

pub use phase::{Phase, PhaseClock};
pub use state::ExchangeState;
