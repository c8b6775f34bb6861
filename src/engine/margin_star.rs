use crate::config::{ScoringConfig, WeightConfig};
use crate::engine::safe_ratio;
use crate::feed::types::{BoxScoreLine, PlayByPlayEvent};

/// Seconds-remaining window treated as "the closing stretch" of the final
/// period when computing the average margin diagnostic.
const CLOSING_STRETCH_SECONDS: u16 = 300;

/// Margin and star-performance scores, or an explicit marker that the data
/// needed to compute them was missing. The orchestrator pattern-matches
/// this instead of catching an error, so one bad game cannot abort a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginStarScore {
    Available {
        /// Mean absolute margin over the closing stretch of the final period.
        average_margin: f64,
        margin_score: f64,
        max_points: u32,
        star_count: u32,
        star_score: f64,
    },
    Unavailable,
}

/// Final-margin closeness: full weight for a tied finish, decaying
/// exponentially toward zero as the final gap widens.
fn margin_closeness(final_abs_margin: f64, scale: f64) -> f64 {
    (-final_abs_margin / scale).exp()
}

/// Score the final margin and individual star performances. Requires a
/// final margin in the play-by-play and a non-empty box score; anything
/// less is `Unavailable`.
pub fn score_margin_and_stars(
    events: &[PlayByPlayEvent],
    box_score: &[BoxScoreLine],
    weights: &WeightConfig,
    scoring: &ScoringConfig,
) -> MarginStarScore {
    let Some(final_margin) = events.iter().rev().find_map(|e| e.margin) else {
        return MarginStarScore::Unavailable;
    };
    if box_score.is_empty() {
        return MarginStarScore::Unavailable;
    }

    let margin_score = weights.margin_weight
        * margin_closeness(final_margin.abs() as f64, scoring.margin_scale);

    let final_period = events.iter().map(|e| e.period).max().unwrap_or(0);
    let mut closing_sum = 0.0;
    let mut closing_count = 0usize;
    for event in events {
        if event.period == final_period && event.clock_seconds <= CLOSING_STRETCH_SECONDS {
            if let Some(margin) = event.margin {
                closing_sum += margin.abs() as f64;
                closing_count += 1;
            }
        }
    }
    let average_margin = safe_ratio(closing_sum, closing_count as f64);

    let max_points = box_score.iter().map(|line| line.pts).max().unwrap_or(0);
    let star_count = box_score
        .iter()
        .filter(|line| line.pts >= scoring.star_points_threshold)
        .count() as u32;
    let star_score = safe_ratio(star_count as f64, scoring.star_norm as f64).min(1.0)
        * weights.star_performance_weight;

    MarginStarScore::Available {
        average_margin,
        margin_score,
        max_points,
        star_count,
        star_score,
    }
}
