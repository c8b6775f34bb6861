pub mod render;
pub mod state;

use crate::config::WeightConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::{AppState, ResultRow};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::watch;

/// Commands the TUI can send back to the analysis task.
#[derive(Debug, Clone)]
pub enum TuiCommand {
    Quit,
    Refresh,
}

/// Sub-score ceilings, used to scale the breakdown bars.
#[derive(Debug, Clone, Copy)]
pub struct Ceilings {
    pub period: f64,
    pub extra_period: f64,
    pub lead_change: f64,
    pub buzzer_beater: f64,
    pub fg3_pct: f64,
    pub star: f64,
    pub margin: f64,
}

impl From<&WeightConfig> for Ceilings {
    fn from(weights: &WeightConfig) -> Self {
        Self {
            period: weights.max_total_score,
            extra_period: weights.extra_period_weight,
            lead_change: weights.lead_change_weight,
            buzzer_beater: weights.buzzer_beater_weight,
            fg3_pct: weights.fg3_pct_weight,
            star: weights.star_performance_weight,
            margin: weights.margin_weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortMode {
    Date,
    Total,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Date => "date",
            SortMode::Total => "total",
        }
    }

    fn toggle(&mut self) {
        *self = match self {
            SortMode::Date => SortMode::Total,
            SortMode::Total => SortMode::Date,
        };
    }
}

/// Selection and ordering are view concerns; the analysis task never sees
/// them.
pub struct ViewState {
    pub selected: usize,
    pub sort: SortMode,
    pub ceilings: Ceilings,
}

impl ViewState {
    pub fn new(ceilings: Ceilings) -> Self {
        Self {
            selected: 0,
            sort: SortMode::Date,
            ceilings,
        }
    }

    /// Rows in display order. `Date` keeps the feed order (already newest
    /// first); `Total` ranks the most exciting games first.
    pub fn ordered<'a>(&self, rows: &'a [ResultRow]) -> Vec<&'a ResultRow> {
        let mut ordered: Vec<&ResultRow> = rows.iter().collect();
        if self.sort == SortMode::Total {
            ordered.sort_by(|a, b| {
                b.total_score
                    .partial_cmp(&a.total_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        ordered
    }
}

/// Run the dashboard. Reads state from `state_rx`, sends commands on
/// `cmd_tx`; returns when the user quits.
pub async fn run_tui(
    state_rx: watch::Receiver<AppState>,
    cmd_tx: tokio::sync::mpsc::Sender<TuiCommand>,
    ceilings: Ceilings,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx, ceilings).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<AppState>,
    cmd_tx: tokio::sync::mpsc::Sender<TuiCommand>,
    ceilings: Ceilings,
) -> Result<()> {
    let mut view = ViewState::new(ceilings);
    loop {
        let state = state_rx.borrow().clone();
        if view.selected >= state.rows.len() {
            view.selected = state.rows.len().saturating_sub(1);
        }
        terminal.draw(|f| render::draw(f, &state, &view))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => {
                            let _ = cmd_tx.send(TuiCommand::Quit).await;
                            return Ok(());
                        }
                        KeyCode::Char('r') => {
                            let _ = cmd_tx.send(TuiCommand::Refresh).await;
                        }
                        KeyCode::Char('s') => view.sort.toggle(),
                        KeyCode::Up => view.selected = view.selected.saturating_sub(1),
                        KeyCode::Down => {
                            if view.selected + 1 < state.rows.len() {
                                view.selected += 1;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        // Redraw when the analysis task publishes new state, or on the next
        // poll tick, whichever comes first.
        let _ = tokio::time::timeout(Duration::from_millis(100), state_rx.changed()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grade;

    fn row(teams: &str, total_score: f64) -> ResultRow {
        ResultRow {
            game_id: teams.to_string(),
            game_date: "2025-01-15".to_string(),
            teams: teams.to_string(),
            period_scores: 0.0,
            extra_periods: 0.0,
            lead_changes: 0.0,
            buzzer_beater: 0.0,
            fg3_pct: 0.0,
            star_performance: 0.0,
            margin: 0.0,
            total_score,
            grade: Grade::C,
            average_margin: 0.0,
            lead_change_count: 0,
            max_points: 0,
        }
    }

    #[test]
    fn test_sort_by_total_ranks_descending() {
        let rows = vec![row("a", 0.4), row("b", 0.9), row("c", 0.6)];
        let mut view = ViewState::new(Ceilings::from(&WeightConfig::default()));
        view.sort = SortMode::Total;
        let ordered = view.ordered(&rows);
        let teams: Vec<&str> = ordered.iter().map(|r| r.teams.as_str()).collect();
        assert_eq!(teams, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_date_sort_keeps_feed_order() {
        let rows = vec![row("a", 0.4), row("b", 0.9)];
        let view = ViewState::new(Ceilings::from(&WeightConfig::default()));
        let ordered = view.ordered(&rows);
        assert_eq!(ordered[0].teams, "a");
    }
}
