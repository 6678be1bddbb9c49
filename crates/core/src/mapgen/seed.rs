//! Per-level seed derivation so each depth generates independently of play.

pub(crate) fn derive_level_seed(run_seed: u64, dungeon_level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(dungeon_level).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_seed_changes_when_inputs_change() {
        let baseline = derive_level_seed(99, 2);
        assert_ne!(baseline, derive_level_seed(98, 2));
        assert_ne!(baseline, derive_level_seed(99, 3));
        assert_eq!(baseline, derive_level_seed(99, 2));
    }
}
