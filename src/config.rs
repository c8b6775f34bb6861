use crate::engine::grade::Grade;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Weights for the excitement sub-scores. Each sub-score is bounded by its
/// weight; the period component is bounded by `max_total_score`.
#[derive(Debug, Deserialize, Clone)]
pub struct WeightConfig {
    /// One weight per regulation quarter. Overtime periods never hit this
    /// lookup; they go through `extra_period_weight` instead.
    pub period_weights: [f64; 4],
    pub extra_period_weight: f64,
    pub lead_change_weight: f64,
    pub buzzer_beater_weight: f64,
    pub fg3_pct_weight: f64,
    pub star_performance_weight: f64,
    pub margin_weight: f64,
    pub max_total_score: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            period_weights: [0.33, 0.33, 0.34, 0.0],
            extra_period_weight: 0.05,
            lead_change_weight: 0.05,
            buzzer_beater_weight: 0.0,
            fg3_pct_weight: 0.05,
            star_performance_weight: 0.1,
            margin_weight: 0.25,
            max_total_score: 0.50,
        }
    }
}

/// Policy constants for the individual scorers.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    /// Decay scale (points) of the per-period closeness curve.
    #[serde(default = "default_period_margin_scale")]
    pub period_margin_scale: f64,
    /// Decay scale (points) of the final-margin closeness curve.
    #[serde(default = "default_margin_scale")]
    pub margin_scale: f64,
    /// Lead-change count that earns full credit.
    #[serde(default = "default_lead_change_norm")]
    pub lead_change_norm: u32,
    /// Clock window (seconds remaining) for buzzer-beater detection.
    #[serde(default = "default_buzzer_seconds")]
    pub buzzer_seconds: u16,
    /// Individual point total that counts as a star performance.
    #[serde(default = "default_star_points")]
    pub star_points_threshold: u32,
    /// Star-performance count that earns full credit.
    #[serde(default = "default_star_norm")]
    pub star_norm: u32,
}

fn default_period_margin_scale() -> f64 {
    10.0
}
fn default_margin_scale() -> f64 {
    7.0
}
fn default_lead_change_norm() -> u32 {
    12
}
fn default_buzzer_seconds() -> u16 {
    24
}
fn default_star_points() -> u32 {
    35
}
fn default_star_norm() -> u32 {
    2
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            period_margin_scale: default_period_margin_scale(),
            margin_scale: default_margin_scale(),
            lead_change_norm: default_lead_change_norm(),
            buzzer_seconds: default_buzzer_seconds(),
            star_points_threshold: default_star_points(),
            star_norm: default_star_norm(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GradingConfig {
    /// Descending steps; grading picks the first one the total meets
    /// (inclusive lower bound). The last step is the floor grade.
    pub thresholds: Vec<GradeStep>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GradeStep {
    pub min_total: f64,
    pub grade: Grade,
}

impl Default for GradingConfig {
    fn default() -> Self {
        let steps = [
            (0.93, Grade::APlus),
            (0.85, Grade::A),
            (0.80, Grade::BPlus),
            (0.75, Grade::B),
            (0.70, Grade::CPlus),
            (0.65, Grade::C),
            (0.0, Grade::D),
        ];
        Self {
            thresholds: steps
                .into_iter()
                .map(|(min_total, grade)| GradeStep { min_total, grade })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_scoreboard_url")]
    pub scoreboard_url: String,
    /// Template; `{game_id}` is substituted per request.
    #[serde(default = "default_play_by_play_url")]
    pub play_by_play_url: String,
    #[serde(default = "default_box_score_url")]
    pub box_score_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// Batch size; these games' box scores double as the shooting baseline.
    #[serde(default = "default_recent_games")]
    pub recent_games: usize,
}

fn default_scoreboard_url() -> String {
    "https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json".to_string()
}
fn default_play_by_play_url() -> String {
    "https://cdn.nba.com/static/json/liveData/playbyplay/playbyplay_{game_id}.json".to_string()
}
fn default_box_score_url() -> String {
    "https://cdn.nba.com/static/json/liveData/boxscore/boxscore_{game_id}.json".to_string()
}
fn default_request_timeout() -> u64 {
    5000
}
fn default_recent_games() -> usize {
    20
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            scoreboard_url: default_scoreboard_url(),
            play_by_play_url: default_play_by_play_url(),
            box_score_url: default_box_score_url(),
            request_timeout_ms: default_request_timeout(),
            recent_games: default_recent_games(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weight maps the scorers cannot honor. Weights must be
    /// non-negative, period weights must sum to <= 1 so the capped period
    /// component stays meaningful, and grade steps must descend strictly.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let named = [
            ("extra_period_weight", w.extra_period_weight),
            ("lead_change_weight", w.lead_change_weight),
            ("buzzer_beater_weight", w.buzzer_beater_weight),
            ("fg3_pct_weight", w.fg3_pct_weight),
            ("star_performance_weight", w.star_performance_weight),
            ("margin_weight", w.margin_weight),
            ("max_total_score", w.max_total_score),
        ];
        for (name, value) in named {
            if value < 0.0 {
                anyhow::bail!("{} must be non-negative, got {}", name, value);
            }
        }
        if w.period_weights.iter().any(|&p| p < 0.0) {
            anyhow::bail!("period_weights must be non-negative: {:?}", w.period_weights);
        }
        let period_sum: f64 = w.period_weights.iter().sum();
        if period_sum > 1.0 + 1e-9 {
            anyhow::bail!("period_weights must sum to <= 1, got {}", period_sum);
        }
        if self.scoring.period_margin_scale <= 0.0 || self.scoring.margin_scale <= 0.0 {
            anyhow::bail!("closeness decay scales must be positive");
        }
        if self.scoring.lead_change_norm == 0 || self.scoring.star_norm == 0 {
            anyhow::bail!("normalization counts must be positive");
        }
        if self.grading.thresholds.is_empty() {
            anyhow::bail!("grading.thresholds cannot be empty");
        }
        for pair in self.grading.thresholds.windows(2) {
            if pair[1].min_total >= pair[0].min_total {
                anyhow::bail!(
                    "grading.thresholds must descend strictly: {} then {}",
                    pair[0].min_total,
                    pair[1].min_total
                );
            }
        }
        Ok(())
    }
}
