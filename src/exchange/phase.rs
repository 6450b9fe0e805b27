//! Exchange phase cycle
//!
//! setup -> approach -> stance -> action -> resolution -> setup (round + 1).
//! No transition is guarded; checking that everyone has an approach before
//! leaving the approach phase is up to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Approach,
    Stance,
    Action,
    Resolution,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Setup,
        Phase::Approach,
        Phase::Stance,
        Phase::Action,
        Phase::Resolution,
    ];

    /// The following phase, and whether the cycle wrapped
    pub fn next(self) -> (Phase, bool) {
        match self {
            Phase::Setup => (Phase::Approach, false),
            Phase::Approach => (Phase::Stance, false),
            Phase::Stance => (Phase::Action, false),
            Phase::Action => (Phase::Resolution, false),
            Phase::Resolution => (Phase::Setup, true),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Approach => "Choose Approach",
            Phase::Stance => "Roll Stance",
            Phase::Action => "Take Action",
            Phase::Resolution => "Resolution",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Approach => "approach",
            Phase::Stance => "stance",
            Phase::Action => "action",
            Phase::Resolution => "resolution",
        };
        f.write_str(name)
    }
}

/// Shared round/phase counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseClock {
    pub round: u32,
    pub phase: Phase,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self {
            round: 1,
            phase: Phase::Setup,
        }
    }
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one phase; wrapping past resolution starts the next round
    pub fn next_phase(&mut self) -> Phase {
        let (next, wrapped) = self.phase.next();
        if wrapped {
            self.round = self.round.saturating_add(1);
        }
        self.phase = next;
        next
    }

    /// Hard reset to setup, round 1
    pub fn reset_phase(&mut self) {
        *self = Self::default();
    }
}
