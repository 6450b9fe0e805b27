//! Combat rules constants - all fixed thresholds in one place

/// Faces on each stance die
pub const STANCE_DIE_SIDES: u8 = 6;

/// Lowest and highest possible two-die stance totals
pub const MIN_STANCE_ROLL: u8 = 2;
pub const MAX_STANCE_ROLL: u8 = 12;

/// Lowest total that counts as a partial hit (7-9)
pub const PARTIAL_HIT_THRESHOLD: u8 = 7;

/// Lowest total that counts as a full hit (10+)
pub const FULL_HIT_THRESHOLD: u8 = 10;

/// Status name that grants one extra basic/mastered technique
pub const FAVORED_STATUS: &str = "Favored";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_ordered() {
        assert!(MIN_STANCE_ROLL < PARTIAL_HIT_THRESHOLD);
        assert!(PARTIAL_HIT_THRESHOLD < FULL_HIT_THRESHOLD);
        assert!(FULL_HIT_THRESHOLD <= MAX_STANCE_ROLL);
        assert_eq!(MAX_STANCE_ROLL, STANCE_DIE_SIDES * 2);
    }
}
