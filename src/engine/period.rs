use crate::config::{ScoringConfig, WeightConfig};
use crate::engine::safe_ratio;
use crate::feed::types::PlayByPlayEvent;

/// Outcome of the period pass: mean absolute margin averaged over the
/// regulation periods that actually occurred, and the capped period
/// component of the total score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodScores {
    pub average_abs_margin: f64,
    pub component: f64,
}

/// Closeness of a period in [0, 1]: 1.0 when the margin sat at zero on
/// every event, decaying exponentially as the mean absolute margin grows.
fn closeness(mean_abs_margin: f64, scale: f64) -> f64 {
    (-mean_abs_margin / scale).exp()
}

/// Score the four regulation periods. Each period's share is its configured
/// weight scaled by `max_total_score`; the summed component is clamped to
/// `max_total_score`. Overtime events (period >= 5) are ignored here; they
/// belong to the extra-period scorer. A period with no margin-bearing events
/// contributes nothing and does not count toward the periods-seen average.
pub fn score_periods(
    events: &[PlayByPlayEvent],
    weights: &WeightConfig,
    scoring: &ScoringConfig,
) -> PeriodScores {
    let mut component = 0.0;
    let mut periods_seen = 0u32;
    let mut mean_sum = 0.0;

    for (idx, weight) in weights.period_weights.iter().enumerate() {
        let period = idx as u8 + 1;
        let mut abs_sum = 0.0;
        let mut count = 0usize;
        for event in events.iter().filter(|e| e.period == period) {
            if let Some(margin) = event.margin {
                abs_sum += margin.abs() as f64;
                count += 1;
            }
        }
        if count == 0 {
            continue;
        }
        periods_seen += 1;
        let mean_abs_margin = abs_sum / count as f64;
        mean_sum += mean_abs_margin;
        component +=
            weight * weights.max_total_score * closeness(mean_abs_margin, scoring.period_margin_scale);
    }

    PeriodScores {
        average_abs_margin: safe_ratio(mean_sum, periods_seen as f64),
        component: component.min(weights.max_total_score),
    }
}
