//! Playbook archetypes and the balance principles they anchor

/// Principles used when a playbook is not in the table
pub const DEFAULT_PRINCIPLES: (&str, &str) = ("Control", "Freedom");

/// (playbook, left principle, right principle)
pub static PLAYBOOKS: &[(&str, &str, &str)] = &[
    ("The Adamant", "Restraint", "Results"),
    ("The Bold", "Loyalty", "Confidence"),
    ("The Guardian", "Self-Reliance", "Trust"),
    ("The Hammer", "Force", "Care"),
    ("The Icon", "Role", "Freedom"),
    ("The Idealist", "Forgiveness", "Action"),
    ("The Pillar", "Support", "Independence"),
    ("The Prodigy", "Excellence", "Community"),
    ("The Rogue", "Friendship", "Survival"),
    ("The Successor", "Tradition", "Progress"),
];

/// Principle pair for a playbook. Matching ignores case and a leading "The".
pub fn principles_for(playbook: &str) -> (&'static str, &'static str) {
    let wanted = normalize(playbook);
    PLAYBOOKS
        .iter()
        .find(|(name, _, _)| normalize(name) == wanted)
        .map(|(_, left, right)| (*left, *right))
        .unwrap_or(DEFAULT_PRINCIPLES)
}

pub fn is_known_playbook(playbook: &str) -> bool {
    let wanted = normalize(playbook);
    PLAYBOOKS.iter().any(|(name, _, _)| normalize(name) == wanted)
}

fn normalize(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    lower.strip_prefix("the ").unwrap_or(&lower).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_playbook() {
        assert_eq!(principles_for("The Hammer"), ("Force", "Care"));
        assert_eq!(principles_for("hammer"), ("Force", "Care"));
        assert!(is_known_playbook("the icon"));
    }

    #[test]
    fn test_unknown_playbook_falls_back() {
        assert_eq!(principles_for("The Tinkerer"), DEFAULT_PRINCIPLES);
        assert!(!is_known_playbook("The Tinkerer"));
    }
}
