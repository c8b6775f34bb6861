use crate::engine::safe_ratio;
use crate::feed::types::BoxScoreLine;

/// Rolling baseline for shooting efficiency: the best per-game aggregate
/// percentages observed across a recent set of games. Computed once per
/// batch and shared read-only by every analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineStats {
    pub max_fg_pct: f64,
    pub max_fg3_pct: f64,
}

impl BaselineStats {
    /// Build from per-game box-score tables. Returns `None` for an empty
    /// set so callers can fall back to the analyzed game's own numbers.
    pub fn from_games(games: &[Vec<BoxScoreLine>]) -> Option<Self> {
        if games.is_empty() {
            return None;
        }
        let mut max_fg_pct = 0.0f64;
        let mut max_fg3_pct = 0.0f64;
        for lines in games {
            let (fg_pct, fg3_pct) = aggregate_percentages(lines);
            max_fg_pct = max_fg_pct.max(fg_pct);
            max_fg3_pct = max_fg3_pct.max(fg3_pct);
        }
        Some(Self {
            max_fg_pct,
            max_fg3_pct,
        })
    }
}

/// Game-level FG% and 3P%: summed makes over summed attempts across every
/// player line, zero when a denominator is zero.
pub fn aggregate_percentages(lines: &[BoxScoreLine]) -> (f64, f64) {
    let (mut fgm, mut fga, mut fg3m, mut fg3a) = (0u32, 0u32, 0u32, 0u32);
    for line in lines {
        fgm += line.fgm;
        fga += line.fga;
        fg3m += line.fg3m;
        fg3a += line.fg3a;
    }
    (
        safe_ratio(fgm as f64, fga as f64),
        safe_ratio(fg3m as f64, fg3a as f64),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingScore {
    pub max_fg_pct: f64,
    pub max_fg3_pct: f64,
    pub score: f64,
}

/// Shooting-efficiency sub-score: this game's 3P% as a fraction of the best
/// 3P% seen recently, clipped to [0, 1], times the weight. An absent
/// baseline normalizes against the game itself (ratio 1); a zero baseline
/// maximum scores 0 rather than dividing by zero.
pub fn score_shooting(
    lines: &[BoxScoreLine],
    baseline: Option<BaselineStats>,
    weight: f64,
) -> ShootingScore {
    let (fg_pct, fg3_pct) = aggregate_percentages(lines);
    let (max_fg_pct, max_fg3_pct) = match baseline {
        Some(stats) => (stats.max_fg_pct, stats.max_fg3_pct),
        None => (fg_pct, fg3_pct),
    };
    let score = safe_ratio(fg3_pct, max_fg3_pct).clamp(0.0, 1.0) * weight;
    ShootingScore {
        max_fg_pct,
        max_fg3_pct,
        score,
    }
}
