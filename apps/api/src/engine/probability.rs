//! Callback probability — maps a 0–100 match score to the estimated chance of
//! an interview invitation, then nudges it for structural fit and critical gaps.
//!
//! Everything here is pure and total: out-of-range inputs are clamped.

/// Lowest probability the engine ever reports.
pub const PROBABILITY_FLOOR: i32 = 0;

/// Highest probability the engine ever reports.
pub const PROBABILITY_CEILING: i32 = 100;

/// Added when the resume passes the structural / ATS-parseability gate.
pub const STRUCTURAL_FIT_BONUS: i32 = 5;

/// Subtracted when at least one critical skill is still missing.
pub const CRITICAL_GAP_PENALTY: i32 = 5;

/// The base probability always trails the match score by at least this much.
pub const CALLBACK_SCORE_MARGIN: i32 = 5;

/// Piecewise-linear curve: `(score_from, score_to, probability_from, probability_to)`.
/// Segment ends line up so the floored curve is monotone non-decreasing.
const CALLBACK_CURVE: &[(f64, f64, f64, f64)] = &[
    (0.0, 30.0, 10.0, 25.0),
    (30.0, 50.0, 25.0, 45.0),
    (50.0, 70.0, 45.0, 70.0),
    (70.0, 85.0, 70.0, 87.0),
    (85.0, 100.0, 87.0, 95.0),
];

/// Clamps any score or probability into `[0, 100]`.
pub fn clamp_percent(value: i32) -> i32 {
    value.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}

/// Base callback probability for a match score.
///
/// Monotone non-decreasing in `score`: 0 maps to 0, 100 maps to 95.
pub fn base_callback_probability(score: i32) -> i32 {
    let score = clamp_percent(score);
    let s = f64::from(score);

    let (from, to, p_from, p_to) = CALLBACK_CURVE
        .iter()
        .copied()
        .find(|(from, to, _, _)| s >= *from && s < *to)
        .unwrap_or(CALLBACK_CURVE[CALLBACK_CURVE.len() - 1]);

    let curve = (p_from + ((s - from) / (to - from)) * (p_to - p_from)).floor() as i32;

    clamp_percent(curve.min(score - CALLBACK_SCORE_MARGIN))
}

/// Adjusts a base probability for qualitative signals.
///
/// Passing an empty `unresolved_critical_skills` previews the "all critical
/// gaps fixed" state without re-running the analysis.
pub fn adjust_probability(
    base: i32,
    structural_fit: bool,
    unresolved_critical_skills: &[String],
) -> i32 {
    let mut probability = clamp_percent(base);

    if structural_fit {
        probability += STRUCTURAL_FIT_BONUS;
    }
    if !unresolved_critical_skills.is_empty() {
        probability -= CRITICAL_GAP_PENALTY;
    }

    clamp_percent(probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_probability_is_monotone() {
        let mut previous = base_callback_probability(0);
        for score in 1..=100 {
            let current = base_callback_probability(score);
            assert!(
                current >= previous,
                "score {score}: {current} < previous {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_base_probability_floor_and_ceiling() {
        assert_eq!(base_callback_probability(0), PROBABILITY_FLOOR);
        assert_eq!(base_callback_probability(100), 95);
    }

    #[test]
    fn test_base_probability_segment_joints() {
        assert_eq!(base_callback_probability(30), 25);
        assert_eq!(base_callback_probability(50), 45);
        // curve gives 70 but the score margin caps it at 65
        assert_eq!(base_callback_probability(70), 65);
        assert_eq!(base_callback_probability(85), 80);
    }

    #[test]
    fn test_base_probability_trails_score() {
        for score in 5..=100 {
            assert!(base_callback_probability(score) <= score - CALLBACK_SCORE_MARGIN);
        }
        assert_eq!(base_callback_probability(20), 15);
    }

    #[test]
    fn test_base_probability_clamps_out_of_range_scores() {
        assert_eq!(base_callback_probability(-40), base_callback_probability(0));
        assert_eq!(base_callback_probability(250), base_callback_probability(100));
    }

    #[test]
    fn test_adjust_adds_bonus_for_structural_fit() {
        assert_eq!(adjust_probability(60, true, &[]), 60 + STRUCTURAL_FIT_BONUS);
        assert_eq!(adjust_probability(60, false, &[]), 60);
    }

    #[test]
    fn test_adjust_penalises_unresolved_critical_skills() {
        let missing = vec!["Kubernetes".to_string()];
        assert_eq!(adjust_probability(60, false, &missing), 60 - CRITICAL_GAP_PENALTY);
        assert_eq!(adjust_probability(0, false, &missing), PROBABILITY_FLOOR);
    }

    #[test]
    fn test_adjust_never_leaves_bounds() {
        let missing = vec!["Rust".to_string(), "Kafka".to_string()];
        let none: &[String] = &[];
        for base in [-500, -1, 0, 3, 50, 97, 100, 101, 900] {
            for fit in [true, false] {
                for skills in [none, &missing[..]] {
                    let p = adjust_probability(base, fit, skills);
                    assert!((0..=100).contains(&p), "base {base} fit {fit}: {p}");
                }
            }
        }
    }

    #[test]
    fn test_adjust_caps_at_ceiling() {
        assert_eq!(adjust_probability(98, true, &[]), PROBABILITY_CEILING);
    }
}
