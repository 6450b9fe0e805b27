//! Static technique definitions - the catalog all characters reference

use crate::core::types::Approach;
use crate::techniques::{Complexity, Technique, Training};

const DM: &[Approach] = &[Approach::DefendManeuver];
const AA: &[Approach] = &[Approach::AdvanceAttack];
const EO: &[Approach] = &[Approach::EvadeObserve];
const DM_EO: &[Approach] = &[Approach::DefendManeuver, Approach::EvadeObserve];
const AA_EO: &[Approach] = &[Approach::AdvanceAttack, Approach::EvadeObserve];

const fn basic(name: &'static str, approaches: &'static [Approach]) -> Technique {
    Technique {
        name,
        complexity: Complexity::Basic,
        training: Training::Universal,
        approaches,
    }
}

const fn advanced(
    name: &'static str,
    training: Training,
    approaches: &'static [Approach],
) -> Technique {
    Technique {
        name,
        complexity: Complexity::Advanced,
        training,
        approaches,
    }
}

/// Global technique catalog - names are unique
pub static TECHNIQUE_CATALOG: &[Technique] = &[
    // Basic techniques, one set per approach
    basic("Ready", DM),
    basic("Retaliate", DM),
    basic("Seize a Position", DM),
    basic("Strike", AA),
    basic("Pressure", AA),
    basic("Smash", AA),
    basic("Commit", EO),
    basic("Test Balance", EO),
    basic("Obscure", EO),
    // Universal
    advanced("Charge", Training::Universal, AA),
    advanced("Forceful Blow", Training::Universal, AA),
    advanced("Duck and Twist", Training::Universal, DM_EO),
    advanced("Sense Environment", Training::Universal, EO),
    advanced("Rapid Assessment", Training::Universal, EO),
    // Weapons
    advanced("Feint", Training::Weapons, AA_EO),
    advanced("Turn the Tables", Training::Weapons, DM),
    advanced("Pinpoint Thrust", Training::Weapons, AA),
    // Technology
    advanced("Jolt", Training::Technology, AA),
    advanced("Collect Materials", Training::Technology, EO),
    advanced("Wind Up", Training::Technology, DM),
    // Air
    advanced("Air Cushion", Training::Air, DM),
    advanced("Gust of Wind", Training::Air, AA),
    advanced("Ride the Wind", Training::Air, EO),
    // Water
    advanced("Crushing Grip of Seas", Training::Water, AA),
    advanced("Stream the Water", Training::Water, DM),
    advanced("Ice Slick", Training::Water, EO),
    // Earth
    advanced("Earth Armor", Training::Earth, DM),
    advanced("Stone Shield", Training::Earth, DM),
    advanced("Metal Bindings", Training::Earth, AA),
    advanced("Seismic Sense", Training::Earth, EO),
    // Fire
    advanced("Lightning Blast", Training::Fire, AA),
    advanced("Flame Knives", Training::Fire, AA),
    advanced("Smoke Screen", Training::Fire, EO),
    advanced("Fire Wall", Training::Fire, DM),
    // Group
    advanced("Overwhelm", Training::Group, AA),
    advanced("Focused Fire", Training::Group, AA),
    advanced("Swarm", Training::Group, AA),
    advanced("Protect Objective", Training::Group, DM),
    advanced("Coordination", Training::Group, DM),
    advanced("Shield Wall", Training::Group, DM),
    advanced("Surround", Training::Group, DM),
    advanced("Spread Out", Training::Group, EO),
    advanced("Test Defenses", Training::Group, EO),
    advanced("Scatter and Regroup", Training::Group, EO),
];
