use anyhow::Result;
use courtside::config::Config;
use courtside::engine::shooting::BaselineStats;
use courtside::engine::{analyze_game, GameScoreResult};
use courtside::feed::nba_stats::NbaStatsFeed;
use courtside::feed::types::{BoxScoreLine, GameStatus, GameSummary, PlayByPlayEvent};
use courtside::feed::GameDataFeed;
use courtside::tui::state::{AppState, ResultRow};
use courtside::tui::{run_tui, Ceilings, TuiCommand};
use std::path::Path;
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file so tracing output doesn't fight the alternate screen.
    let log_file = std::fs::File::create("courtside.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("courtside=info")),
        )
        .with_writer(log_file)
        .init();

    let config = Config::load(Path::new("config.toml"))?;
    let feed = NbaStatsFeed::new(config.feed.clone())?;
    let ceilings = Ceilings::from(&config.weights);

    let (state_tx, state_rx) = watch::channel(AppState::new());
    let (cmd_tx, cmd_rx) = mpsc::channel::<TuiCommand>(16);

    let analysis = tokio::spawn(analysis_task(feed, config, state_tx, cmd_rx));
    run_tui(state_rx, cmd_tx, ceilings).await?;
    analysis.abort();

    Ok(())
}

/// Fetch and score one batch per run, then sit idle until the TUI asks for
/// a refresh or quits.
async fn analysis_task(
    feed: NbaStatsFeed,
    config: Config,
    state_tx: watch::Sender<AppState>,
    mut cmd_rx: mpsc::Receiver<TuiCommand>,
) {
    loop {
        run_batch(&feed, &config, &state_tx).await;
        match cmd_rx.recv().await {
            Some(TuiCommand::Refresh) => continue,
            Some(TuiCommand::Quit) | None => return,
        }
    }
}

/// One fetched game, ready for scoring. Fetch failures leave the tables
/// empty so the game still shows up as a zeroed N/A row.
struct FetchedGame {
    summary: GameSummary,
    events: Vec<PlayByPlayEvent>,
    box_score: Vec<BoxScoreLine>,
}

async fn run_batch(feed: &NbaStatsFeed, config: &Config, state_tx: &watch::Sender<AppState>) {
    state_tx.send_modify(|state| {
        state.fetching = true;
        state.push_log("info", "fetching scoreboard".to_string());
    });

    let summaries = match feed.fetch_scoreboard().await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!(error = %e, "scoreboard fetch failed");
            state_tx.send_modify(|state| {
                state.fetching = false;
                state.push_log("error", format!("scoreboard fetch failed: {e:#}"));
            });
            return;
        }
    };

    if let Some(first) = summaries.first() {
        let date = first.game_date.format("%Y-%m-%d").to_string();
        state_tx.send_modify(|state| state.game_date = date);
    }

    let mut finals: Vec<GameSummary> = summaries
        .into_iter()
        .filter(|s| s.status == GameStatus::Final)
        .collect();
    finals.truncate(config.feed.recent_games);

    if finals.is_empty() {
        state_tx.send_modify(|state| {
            state.fetching = false;
            state.push_log("warn", "no completed games on the scoreboard".to_string());
        });
        return;
    }

    let mut fetched = Vec::with_capacity(finals.len());
    for summary in finals {
        let events = match feed.fetch_play_by_play(&summary.game_id).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(game_id = %summary.game_id, error = %e, "play-by-play fetch failed");
                state_tx.send_modify(|state| {
                    state.push_log("warn", format!("{}: play-by-play fetch failed", summary.matchup));
                });
                Vec::new()
            }
        };
        let box_score = match feed.fetch_box_score(&summary.game_id).await {
            Ok(box_score) => box_score,
            Err(e) => {
                tracing::warn!(game_id = %summary.game_id, error = %e, "box score fetch failed");
                state_tx.send_modify(|state| {
                    state.push_log("warn", format!("{}: box score fetch failed", summary.matchup));
                });
                Vec::new()
            }
        };
        fetched.push(FetchedGame {
            summary,
            events,
            box_score,
        });
    }

    // The batch's own box scores double as the rolling shooting baseline,
    // computed once and shared read-only by every analysis.
    let baseline_tables: Vec<Vec<BoxScoreLine>> = fetched
        .iter()
        .filter(|game| !game.box_score.is_empty())
        .map(|game| game.box_score.clone())
        .collect();
    let baseline = BaselineStats::from_games(&baseline_tables);

    let results: Vec<GameScoreResult> = fetched
        .iter()
        .map(|game| analyze_game(&game.summary, &game.events, &game.box_score, baseline, config))
        .collect();

    state_tx.send_modify(|state| {
        for result in &results {
            state.push_log(
                "info",
                format!(
                    "{} -> {:.2} ({})",
                    result.matchup, result.total_score, result.grade
                ),
            );
        }
        state.rows = results.iter().map(ResultRow::from_result).collect();
        state.fetching = false;
    });
    tracing::info!(games = results.len(), "batch analyzed");
}
