use crate::config::GradingConfig;
use serde::Deserialize;
use std::fmt;

/// Letter grade for a game, best first. `Na` is reserved for games that
/// could not be scored at all and is never produced by the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "N/A")]
    Na,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::Na => "N/A",
        };
        f.write_str(label)
    }
}

/// Map a total score to a grade: the first (highest) step whose threshold
/// the total meets wins, boundary values included. Totals below every step
/// land on the last (floor) grade.
pub fn assign_grade(total_score: f64, grading: &GradingConfig) -> Grade {
    for step in &grading.thresholds {
        if total_score >= step.min_total {
            return step.grade;
        }
    }
    grading.thresholds.last().map(|s| s.grade).unwrap_or(Grade::D)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_belongs_to_higher_grade() {
        let grading = GradingConfig::default();
        assert_eq!(assign_grade(0.93, &grading), Grade::APlus);
        assert_eq!(assign_grade(0.85, &grading), Grade::A);
        assert_eq!(assign_grade(0.80, &grading), Grade::BPlus);
        assert_eq!(assign_grade(0.65, &grading), Grade::C);
    }

    #[test]
    fn test_just_below_boundary_drops_a_step() {
        let grading = GradingConfig::default();
        assert_eq!(assign_grade(0.9299, &grading), Grade::A);
        assert_eq!(assign_grade(0.6499, &grading), Grade::D);
    }

    #[test]
    fn test_monotonic_step_function() {
        let grading = GradingConfig::default();
        let mut previous = assign_grade(0.0, &grading);
        let mut total = 0.0;
        while total <= 1.0 {
            let grade = assign_grade(total, &grading);
            // Grade ordering puts better grades first, so monotone
            // non-decreasing totals must never worsen the grade.
            assert!(grade <= previous, "{} worsened at {}", grade, total);
            previous = grade;
            total += 0.005;
        }
    }

    #[test]
    fn test_floor_grade() {
        let grading = GradingConfig::default();
        assert_eq!(assign_grade(0.0, &grading), Grade::D);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::Na.to_string(), "N/A");
    }
}
