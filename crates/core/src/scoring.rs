//! Scoring module - line clear points, drop bonuses and the speed curve
//!
//! All functions are pure and read their constants from [`Rules`].
//! Arithmetic saturates so long sessions never wrap.

use crate::rules::Rules;

/// Points for clearing `lines` rows at once at `level`.
///
/// Zero rows, or more than four (only reachable on a pre-filled board), score
/// nothing.
pub fn line_clear_score(rules: &Rules, lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    rules.line_scores[lines].saturating_mul(level)
}

/// Points for moving a piece down `cells` rows by hand.
/// Soft and hard drops are not level-scaled.
pub fn drop_score(rules: &Rules, cells: u32, hard_drop: bool) -> u32 {
    let per_cell = if hard_drop {
        rules.hard_drop_points
    } else {
        rules.soft_drop_points
    };
    cells.saturating_mul(per_cell)
}

/// Level earned by a total line count. A zero `lines_per_level` counts as 1.
pub fn level_for_lines(rules: &Rules, lines: u32) -> u32 {
    (lines / rules.lines_per_level.max(1)).saturating_add(rules.initial_level)
}

/// Gravity interval at `level`, clamped to the minimum.
/// Level 1 runs at `initial_drop_ms`.
pub fn drop_interval_ms(rules: &Rules, level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    rules
        .initial_drop_ms
        .saturating_sub(steps.saturating_mul(rules.drop_decrement_ms))
        .max(rules.min_drop_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_classic_table() {
        let rules = Rules::default();
        assert_eq!(line_clear_score(&rules, 0, 1), 0);
        assert_eq!(line_clear_score(&rules, 1, 1), 100);
        assert_eq!(line_clear_score(&rules, 2, 1), 300);
        assert_eq!(line_clear_score(&rules, 3, 1), 500);
        assert_eq!(line_clear_score(&rules, 4, 1), 800);
        assert_eq!(line_clear_score(&rules, 5, 1), 0);
    }

    #[test]
    fn test_line_clear_score_scales_with_level() {
        let rules = Rules::default();
        assert_eq!(line_clear_score(&rules, 1, 3), 300);
        assert_eq!(line_clear_score(&rules, 4, 10), 8000);
    }

    #[test]
    fn test_drop_score() {
        let rules = Rules::default();
        assert_eq!(drop_score(&rules, 5, false), 5);
        assert_eq!(drop_score(&rules, 5, true), 10);
        assert_eq!(drop_score(&rules, 0, true), 0);
    }

    #[test]
    fn test_level_for_lines() {
        let rules = Rules::default();
        assert_eq!(level_for_lines(&rules, 0), 1);
        assert_eq!(level_for_lines(&rules, 9), 1);
        assert_eq!(level_for_lines(&rules, 10), 2);
        assert_eq!(level_for_lines(&rules, 95), 10);
    }

    #[test]
    fn test_drop_interval_curve() {
        let rules = Rules::default();
        assert_eq!(drop_interval_ms(&rules, 1), 1000);
        assert_eq!(drop_interval_ms(&rules, 2), 900);
        assert_eq!(drop_interval_ms(&rules, 5), 600);
        assert_eq!(drop_interval_ms(&rules, 10), 100);
        assert_eq!(drop_interval_ms(&rules, 11), 100);
        assert_eq!(drop_interval_ms(&rules, 500), 100);
    }

    #[test]
    fn test_custom_rules_flow_through() {
        let rules = Rules {
            lines_per_level: 5,
            initial_drop_ms: 800,
            drop_decrement_ms: 50,
            min_drop_ms: 200,
            ..Rules::default()
        };
        assert_eq!(level_for_lines(&rules, 12), 3);
        assert_eq!(drop_interval_ms(&rules, 3), 700);
        assert_eq!(drop_interval_ms(&rules, 40), 200);
    }

    #[test]
    fn test_higher_starting_level_starts_faster() {
        let rules = Rules {
            initial_level: 3,
            ..Rules::default()
        };
        assert_eq!(level_for_lines(&rules, 0), 3);
        assert_eq!(drop_interval_ms(&rules, 3), 800);
    }

    #[test]
    fn test_zero_lines_per_level_does_not_divide_by_zero() {
        let rules = Rules {
            lines_per_level: 0,
            ..Rules::default()
        };
        assert_eq!(level_for_lines(&rules, 0), 1);
        assert_eq!(level_for_lines(&rules, 3), 4);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_interval_never_rises_and_stays_clamped(level in 1u32..1000) {
            let rules = Rules::default();
            let here = drop_interval_ms(&rules, level);
            let next = drop_interval_ms(&rules, level + 1);
            prop_assert!(next <= here);
            prop_assert!(here >= rules.min_drop_ms);
            prop_assert!(here <= rules.initial_drop_ms);
        }
    }
}
