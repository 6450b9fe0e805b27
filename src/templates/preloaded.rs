//! Ready-made NPC templates
//!
//! Stock antagonists and groups from the core book. Listed conditions are the
//! slots the NPC has, and each enters play already marked.

use crate::core::types::NpcTier;
use crate::entity::character::CharacterDraft;
use crate::entity::conditions::ConditionType;
use crate::templates::SavedTemplate;

use crate::entity::conditions::ConditionType::*;

/// Prepended to every preloaded template name
pub const TEMPLATE_PREFIX: &str = "NPC: ";

/// Static definition of a preloaded NPC
#[derive(Debug, Clone, Copy)]
pub struct PreloadedNpc {
    pub name: &'static str,
    pub role: &'static str,
    pub tier: NpcTier,
    pub max_fatigue: i32,
    pub conditions: &'static [ConditionType],
    pub techniques: &'static [&'static str],
    pub principle: &'static str,
}

impl PreloadedNpc {
    pub fn template_name(&self) -> String {
        format!("{}{}", TEMPLATE_PREFIX, self.name)
    }

    pub fn draft(&self) -> CharacterDraft {
        CharacterDraft::npc(self.name, self.tier)
            .role(self.role)
            .max_fatigue(self.max_fatigue)
            .conditions(self.conditions)
            .marked(self.conditions)
            .principle(self.principle)
            .available_techniques(self.techniques)
    }
}

const fn npc(
    name: &'static str,
    role: &'static str,
    tier: NpcTier,
    max_fatigue: i32,
    conditions: &'static [ConditionType],
    techniques: &'static [&'static str],
    principle: &'static str,
) -> PreloadedNpc {
    PreloadedNpc {
        name,
        role,
        tier,
        max_fatigue,
        conditions,
        techniques,
        principle,
    }
}

pub static PRELOADED_NPCS: &[PreloadedNpc] = &[
    // Minor
    npc("Town Guard", "A local guard", NpcTier::Minor, 3, &[Troubled], &[], "Control"),
    npc("Village Hunter", "A skilled trapper and hunter", NpcTier::Minor, 3, &[Angry], &[], "Control"),
    npc("Trader", "A traveling merchant", NpcTier::Minor, 3, &[Afraid], &[], "Control"),
    npc("Shopkeeper", "An owner of a successful city shop", NpcTier::Minor, 3, &[Insecure], &[], "Control"),
    npc("Tough Bruiser", "Local muscle", NpcTier::Minor, 3, &[Afraid], &[], "Control"),
    npc("Soldier", "A trained grunt of a larger unit", NpcTier::Minor, 3, &[Guilty], &[], "Control"),
    // Major
    npc(
        "Outlaw Captain",
        "A leader of pirates, bandits, or criminals",
        NpcTier::Major,
        5,
        &[Angry, Afraid, Foolish],
        &["Sense Environment", "Duck and Twist"],
        "Survival",
    ),
    npc(
        "Champion Pit-Fighter",
        "A champion pit-fighter",
        NpcTier::Major,
        5,
        &[Angry, Desperate, Guilty],
        &["Charge", "Forceful Blow"],
        "Discipline",
    ),
    npc(
        "Military Commander",
        "A trained and capable military commander",
        NpcTier::Major,
        5,
        &[Angry, Jaded, Troubled],
        &["Rapid Assessment"],
        "Duty",
    ),
    npc(
        "Noble",
        "A member of the ruling class",
        NpcTier::Major,
        5,
        &[Despondent, Hopeless, Insecure],
        &[],
        "Freedom",
    ),
    npc(
        "Political Leader",
        "A local mayor, magistrate, or governor",
        NpcTier::Major,
        5,
        &[Afraid, Frantic, Insecure],
        &[],
        "Community",
    ),
    // Master
    npc(
        "Accomplished General",
        "A weaponmaster in command of extensive forces",
        NpcTier::Major,
        10,
        &[Afraid, Angry, Disgusted, Guilty, Morose],
        &["Feint", "Turn the Tables", "Pinpoint Thrust"],
        "Ambition",
    ),
    npc(
        "Obsessive Inventor",
        "A creator of dangerous and innovative devices",
        NpcTier::Major,
        10,
        &[Afraid, Angry, Insecure, Manic, Offended],
        &["Jolt", "Collect Materials", "Wind Up"],
        "Progress",
    ),
    npc(
        "Rebel Leader",
        "A rebel war leader in the Earth Kingdom",
        NpcTier::Major,
        10,
        &[Afraid, Angry, Guilty, Hopeless, Humiliated],
        &["Earth Armor", "Stone Shield"],
        "Justice",
    ),
    npc(
        "Triad Leader",
        "An infamous firebending Republic City criminal",
        NpcTier::Major,
        10,
        &[Afraid, Fixated, Frustrated, Insecure, Vengeful],
        &["Lightning Blast", "Flame Knives"],
        "Role",
    ),
    npc(
        "Water Tribe Chief",
        "An experienced and trusted Water Tribe leader",
        NpcTier::Major,
        10,
        &[Angry, Guilty, Insecure, Stubborn, Troubled],
        &["Crushing Grip of Seas", "Stream the Water"],
        "Tradition",
    ),
    // Groups
    npc(
        "Small Mob",
        "A small mob of minor thugs",
        NpcTier::Major,
        5,
        &[Angry, Insecure, Troubled],
        &["Overwhelm"],
        "Retribution",
    ),
    npc(
        "Military Squad",
        "A small squad of trained soldiers",
        NpcTier::Major,
        5,
        &[Afraid, Guilty, Insecure],
        &["Focused Fire", "Protect Objective"],
        "Duty",
    ),
    npc(
        "Palace Guards",
        "A medium group of trained guards, eager to serve",
        NpcTier::Major,
        10,
        &[Afraid, Angry, Desperate, Guilty, Humiliated],
        &["Coordination", "Shield Wall", "Swarm"],
        "Loyalty",
    ),
    npc(
        "Republic City Police Squad",
        "A medium group of Metalbenders",
        NpcTier::Major,
        10,
        &[Distracted, Overbearing, Guilty, Troubled, Zealous],
        &["Metal Bindings", "Spread Out", "Test Defenses"],
        "Results",
    ),
    npc(
        "Elite Rebels",
        "A medium group of elite revolutionaries",
        NpcTier::Major,
        10,
        &[Afraid, Guilty, Hopeless, Insecure, Overconfident],
        &["Scatter and Regroup", "Swarm", "Surround"],
        "Freedom",
    ),
];

/// Fresh template records for every preloaded NPC
pub fn preloaded_templates() -> Vec<SavedTemplate> {
    PRELOADED_NPCS
        .iter()
        .map(|npc| SavedTemplate::new(npc.template_name(), npc.draft()))
        .collect()
}
