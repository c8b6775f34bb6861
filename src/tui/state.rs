use crate::engine::{GameScoreResult, Grade};
use std::collections::VecDeque;
use std::time::Instant;

const MAX_LOGS: usize = 200;

/// Data shown by the dashboard. Produced by the analysis task, consumed
/// read-only by the render loop; selection and sort order live in the TUI's
/// own view state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub game_date: String,
    pub fetching: bool,
    pub rows: Vec<ResultRow>,
    pub logs: VecDeque<LogEntry>,
    pub start_time: Instant,
}

/// One analyzed game, numbers rounded to two decimals for display.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub game_id: String,
    pub game_date: String,
    pub teams: String,
    pub period_scores: f64,
    pub extra_periods: f64,
    pub lead_changes: f64,
    pub buzzer_beater: f64,
    pub fg3_pct: f64,
    pub star_performance: f64,
    pub margin: f64,
    pub total_score: f64,
    pub grade: Grade,
    pub average_margin: f64,
    pub lead_change_count: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ResultRow {
    pub fn from_result(result: &GameScoreResult) -> Self {
        Self {
            game_id: result.game_id.clone(),
            game_date: result.game_date.format("%Y-%m-%d").to_string(),
            teams: result.matchup.clone(),
            period_scores: round2(result.period_scores),
            extra_periods: round2(result.extra_periods),
            lead_changes: round2(result.lead_changes),
            buzzer_beater: round2(result.buzzer_beater),
            fg3_pct: round2(result.fg3_pct),
            star_performance: round2(result.star_performance),
            margin: round2(result.margin),
            total_score: round2(result.total_score),
            grade: result.grade,
            average_margin: round2(result.average_margin),
            lead_change_count: result.lead_change_count,
            max_points: result.max_points,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            game_date: String::new(),
            fetching: false,
            rows: Vec::new(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            start_time: Instant::now(),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let m = secs / 60;
        let s = secs % 60;
        format!("{}m {:02}s", m, s)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
