use crate::config::Config;
use crate::engine::buzzer_beater::score_buzzer_beaters;
use crate::engine::grade::{assign_grade, Grade};
use crate::engine::lead_changes::{score_extra_periods, score_lead_changes};
use crate::engine::margin_star::{score_margin_and_stars, MarginStarScore};
use crate::engine::period::score_periods;
use crate::engine::shooting::{score_shooting, BaselineStats};
use chrono::NaiveDate;

use crate::feed::types::{BoxScoreLine, GameSummary, PlayByPlayEvent};

/// Complete scoring record for one game. Constructed once by
/// `analyze_game`, immutable afterward; the presentation layer rounds its
/// numeric fields when building display rows.
#[derive(Debug, Clone)]
pub struct GameScoreResult {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub matchup: String,
    pub period_scores: f64,
    pub extra_periods: f64,
    pub lead_changes: f64,
    pub buzzer_beater: f64,
    pub fg3_pct: f64,
    pub star_performance: f64,
    pub margin: f64,
    pub total_score: f64,
    pub grade: Grade,
    /// Mean absolute margin over the closing stretch of the final period.
    pub average_margin: f64,
    pub lead_change_count: u32,
    pub max_points: u32,
}

impl GameScoreResult {
    /// Zeroed, ungradeable record for a game with no usable play-by-play.
    fn empty(summary: &GameSummary) -> Self {
        Self {
            game_id: summary.game_id.clone(),
            game_date: summary.game_date,
            matchup: summary.matchup.clone(),
            period_scores: 0.0,
            extra_periods: 0.0,
            lead_changes: 0.0,
            buzzer_beater: 0.0,
            fg3_pct: 0.0,
            star_performance: 0.0,
            margin: 0.0,
            total_score: 0.0,
            grade: Grade::Na,
            average_margin: 0.0,
            lead_change_count: 0,
            max_points: 0,
        }
    }
}

/// Score one game. The scorers are independent (each reads only the raw
/// tables) so their order is arbitrary; the total is the exact sum of the
/// sub-scores. An empty play-by-play short-circuits to a zeroed `N/A`
/// record instead of an error, and a game whose box score cannot support
/// the margin/star computation keeps its other sub-scores and zeroes the
/// affected ones.
pub fn analyze_game(
    summary: &GameSummary,
    events: &[PlayByPlayEvent],
    box_score: &[BoxScoreLine],
    baseline: Option<BaselineStats>,
    config: &Config,
) -> GameScoreResult {
    if events.is_empty() {
        tracing::debug!(game_id = %summary.game_id, "no play-by-play data, returning N/A result");
        return GameScoreResult::empty(summary);
    }

    let weights = &config.weights;
    let scoring = &config.scoring;

    let periods = score_periods(events, weights, scoring);
    let (_, extra_periods) = score_extra_periods(events, weights.extra_period_weight);
    let (lead_change_count, lead_changes) =
        score_lead_changes(events, weights.lead_change_weight, scoring.lead_change_norm);
    let (_, buzzer_beater) =
        score_buzzer_beaters(events, weights.buzzer_beater_weight, scoring.buzzer_seconds);
    let shooting = score_shooting(box_score, baseline, weights.fg3_pct_weight);

    let (average_margin, margin, max_points, star_performance) =
        match score_margin_and_stars(events, box_score, weights, scoring) {
            MarginStarScore::Available {
                average_margin,
                margin_score,
                max_points,
                star_score,
                ..
            } => (average_margin, margin_score, max_points, star_score),
            MarginStarScore::Unavailable => {
                tracing::warn!(
                    game_id = %summary.game_id,
                    "margin/star data unavailable, zeroing those scores"
                );
                (0.0, 0.0, 0, 0.0)
            }
        };

    let total_score = periods.component
        + extra_periods
        + lead_changes
        + buzzer_beater
        + shooting.score
        + star_performance
        + margin;
    let grade = assign_grade(total_score, &config.grading);

    GameScoreResult {
        game_id: summary.game_id.clone(),
        game_date: summary.game_date,
        matchup: summary.matchup.clone(),
        period_scores: periods.component,
        extra_periods,
        lead_changes,
        buzzer_beater,
        fg3_pct: shooting.score,
        star_performance,
        margin,
        total_score,
        grade,
        average_margin,
        lead_change_count,
        max_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::GameStatus;

    fn summary() -> GameSummary {
        GameSummary {
            game_id: "0022400567".to_string(),
            game_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            matchup: "BOS @ LAL".to_string(),
            status: GameStatus::Final,
        }
    }

    fn event(period: u8, clock_seconds: u16, margin: i32) -> PlayByPlayEvent {
        PlayByPlayEvent {
            period,
            margin: Some(margin),
            clock_seconds,
            description: "Jump Shot".to_string(),
        }
    }

    fn line(pts: u32) -> BoxScoreLine {
        BoxScoreLine {
            player: "Player".to_string(),
            team: "LAL".to_string(),
            fgm: 8,
            fga: 16,
            fg3m: 2,
            fg3a: 6,
            pts,
        }
    }

    #[test]
    fn test_empty_play_by_play_short_circuits() {
        let result = analyze_game(&summary(), &[], &[line(30)], None, &Config::default());
        assert_eq!(result.grade, Grade::Na);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.period_scores, 0.0);
        assert_eq!(result.margin, 0.0);
        assert_eq!(result.fg3_pct, 0.0);
        assert_eq!(result.game_id, "0022400567");
    }

    #[test]
    fn test_total_is_exact_sum_of_sub_scores() {
        let events: Vec<_> = (1..=4u8)
            .flat_map(|p| (0..8).map(move |i| event(p, 700 - i * 80, (i as i32) - 4)))
            .collect();
        let result = analyze_game(
            &summary(),
            &events,
            &[line(38), line(22)],
            None,
            &Config::default(),
        );
        let sum = result.period_scores
            + result.extra_periods
            + result.lead_changes
            + result.buzzer_beater
            + result.fg3_pct
            + result.star_performance
            + result.margin;
        assert!((result.total_score - sum).abs() < 1e-12);
        assert_ne!(result.grade, Grade::Na);
    }

    #[test]
    fn test_unavailable_margin_star_keeps_other_scores() {
        // Box score missing: margin/star zero out, shooting degrades to 0
        // (no attempts), but period and lead-change scores survive.
        let events: Vec<_> = (1..=4u8)
            .flat_map(|p| (0..8).map(move |i| event(p, 700 - i * 80, if i % 2 == 0 { 2 } else { -2 })))
            .collect();
        let result = analyze_game(&summary(), &events, &[], None, &Config::default());
        assert_eq!(result.margin, 0.0);
        assert_eq!(result.star_performance, 0.0);
        assert_eq!(result.max_points, 0);
        assert_eq!(result.average_margin, 0.0);
        assert!(result.period_scores > 0.0);
        assert!(result.lead_changes > 0.0);
        assert_ne!(result.grade, Grade::Na);
    }

    #[test]
    fn test_perfect_game_grades_high() {
        // Tied on every event, lead changes aplenty, an overtime, two
        // 40-point performances, baseline-topping shooting.
        let mut events: Vec<_> = (1..=4u8)
            .flat_map(|p| (0..20).map(move |i| event(p, 700 - i * 35, if i % 2 == 0 { 1 } else { -1 })))
            .collect();
        events.extend((0..10).map(|i| event(5, 290 - i * 29, if i % 2 == 0 { 1 } else { -1 })));
        events.push(event(5, 2, 0));
        let result = analyze_game(
            &summary(),
            &events,
            &[line(41), line(40)],
            None,
            &Config::default(),
        );
        // Margin finished tied -> full 0.25; stars 0.1; extra periods 0.05;
        // lead changes 0.05; shooting vs itself 0.05; periods near 0.5 but
        // for the +-1 mean margin.
        assert!(result.total_score > 0.9, "got {}", result.total_score);
        assert!(result.grade <= Grade::A, "got {}", result.grade);
    }

    #[test]
    fn test_sub_scores_bounded_by_weights() {
        let config = Config::default();
        let mut events: Vec<_> = (1..=4u8)
            .flat_map(|p| (0..50).map(move |i| event(p, 700u16.saturating_sub(i * 14), if i % 2 == 0 { 1 } else { -1 })))
            .collect();
        events.extend((0..30).map(|i| event(5 + (i / 10) as u8, 290u16.saturating_sub((i % 10) * 29), 0)));
        let result = analyze_game(
            &summary(),
            &events,
            &[line(50), line(45), line(40)],
            None,
            &config,
        );
        let w = &config.weights;
        assert!(result.period_scores <= w.max_total_score + 1e-12);
        assert!(result.extra_periods <= w.extra_period_weight + 1e-12);
        assert!(result.lead_changes <= w.lead_change_weight + 1e-12);
        assert!(result.buzzer_beater <= w.buzzer_beater_weight + 1e-12);
        assert!(result.fg3_pct <= w.fg3_pct_weight + 1e-12);
        assert!(result.star_performance <= w.star_performance_weight + 1e-12);
        assert!(result.margin <= w.margin_weight + 1e-12);
    }
}
