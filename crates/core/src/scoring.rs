//! Scoring module - classic line-clear points, levels and gravity period
//!
//! The level used as the multiplier is always the level *before* the clear
//! being scored is counted.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows at `level` (0-based).
///
/// Anything outside 1..=4 scores nothing.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Points for a clear of `cleared` rows when `lines_before` lines had been
/// cleared so far.
pub fn calculate_clear_score(cleared: usize, lines_before: u32) -> u32 {
    calculate_line_score(cleared, calculate_level(lines_before))
}

/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity period for a level: `max(100, 1000 - level * 100)` milliseconds
pub fn gravity_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_out_of_table_clears_score_nothing() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_multiplier_uses_level_before_clear() {
        // 6 lines -> level 0, a four-line clear is worth exactly 1200.
        assert_eq!(calculate_clear_score(4, 6), 1200);
        // 9 lines -> still level 0 even though the clear crosses 10.
        assert_eq!(calculate_clear_score(1, 9), 40);
        // 10 lines -> level 1.
        assert_eq!(calculate_clear_score(1, 10), 80);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }

    #[test]
    fn test_gravity_intervals() {
        assert_eq!(gravity_interval_ms(0), 1000);
        assert_eq!(gravity_interval_ms(1), 900);
        assert_eq!(gravity_interval_ms(5), 500);
        assert_eq!(gravity_interval_ms(9), 100);
        assert_eq!(gravity_interval_ms(10), 100);
        assert_eq!(gravity_interval_ms(u32::MAX), 100);
    }

    proptest! {
        #[test]
        fn gravity_never_speeds_past_floor(level in any::<u32>()) {
            let ms = gravity_interval_ms(level);
            prop_assert!((DROP_INTERVAL_MIN_MS..=BASE_DROP_MS).contains(&ms));
            prop_assert!(gravity_interval_ms(level.saturating_add(1)) <= ms);
        }

        #[test]
        fn clear_score_scales_with_level(cleared in 1usize..=4, lines in 0u32..10_000) {
            let level = calculate_level(lines);
            prop_assert_eq!(
                calculate_clear_score(cleared, lines),
                LINE_SCORES[cleared] * (level + 1)
            );
        }
    }
}
