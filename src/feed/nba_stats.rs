use super::types::{
    parse_iso_clock, BoxScoreLine, GameStatus, GameSummary, PlayByPlayEvent,
};
use super::GameDataFeed;
use crate::config::FeedConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Feed against the NBA stats CDN (unauthenticated JSON endpoints).
pub struct NbaStatsFeed {
    client: Client,
    config: FeedConfig,
}

impl NbaStatsFeed {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    async fn get_json(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request failed: {}", url))?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("stats feed returned {} for {}", status, url);
        }
        resp.text().await.context("failed to read stats feed body")
    }
}

#[async_trait]
impl GameDataFeed for NbaStatsFeed {
    async fn fetch_scoreboard(&self) -> Result<Vec<GameSummary>> {
        let body = self.get_json(&self.config.scoreboard_url).await?;
        parse_scoreboard(&body)
    }

    async fn fetch_play_by_play(&self, game_id: &str) -> Result<Vec<PlayByPlayEvent>> {
        let url = self.config.play_by_play_url.replace("{game_id}", game_id);
        let body = self.get_json(&url).await?;
        parse_play_by_play(&body)
    }

    async fn fetch_box_score(&self, game_id: &str) -> Result<Vec<BoxScoreLine>> {
        let url = self.config.box_score_url.replace("{game_id}", game_id);
        let body = self.get_json(&url).await?;
        parse_box_score(&body)
    }
}

// ── Scoreboard ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScoreboardRoot {
    scoreboard: Scoreboard,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scoreboard {
    game_date: String,
    games: Vec<ScoreboardGame>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreboardGame {
    game_id: String,
    game_status: u8,
    home_team: ScoreboardTeam,
    away_team: ScoreboardTeam,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreboardTeam {
    team_tricode: String,
}

fn game_status(status: u8) -> GameStatus {
    match status {
        1 => GameStatus::PreGame,
        2 => GameStatus::Live,
        3 => GameStatus::Final,
        _ => GameStatus::PreGame,
    }
}

pub fn parse_scoreboard(json: &str) -> Result<Vec<GameSummary>> {
    let root: ScoreboardRoot =
        serde_json::from_str(json).context("failed to parse scoreboard JSON")?;
    let game_date = NaiveDate::parse_from_str(&root.scoreboard.game_date, "%Y-%m-%d")
        .with_context(|| format!("bad scoreboard date: {}", root.scoreboard.game_date))?;
    Ok(root
        .scoreboard
        .games
        .into_iter()
        .map(|game| GameSummary {
            matchup: format!(
                "{} @ {}",
                game.away_team.team_tricode, game.home_team.team_tricode
            ),
            game_id: game.game_id,
            game_date,
            status: game_status(game.game_status),
        })
        .collect())
}

// ── Play-by-play ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PlayByPlayRoot {
    game: PlayByPlayGame,
}

#[derive(Deserialize)]
struct PlayByPlayGame {
    actions: Vec<PlayByPlayAction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayByPlayAction {
    period: u8,
    #[serde(default)]
    clock: String,
    #[serde(default)]
    score_home: String,
    #[serde(default)]
    score_away: String,
    #[serde(default)]
    description: String,
}

pub fn parse_play_by_play(json: &str) -> Result<Vec<PlayByPlayEvent>> {
    let root: PlayByPlayRoot =
        serde_json::from_str(json).context("failed to parse play-by-play JSON")?;
    Ok(root
        .game
        .actions
        .into_iter()
        .map(|action| {
            let margin = match (
                action.score_home.parse::<i32>(),
                action.score_away.parse::<i32>(),
            ) {
                (Ok(home), Ok(away)) => Some(home - away),
                _ => None,
            };
            PlayByPlayEvent {
                period: action.period,
                margin,
                clock_seconds: parse_iso_clock(&action.clock).unwrap_or(0),
                description: action.description,
            }
        })
        .collect())
}

// ── Box score ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BoxScoreRoot {
    game: BoxScoreGame,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoxScoreGame {
    home_team: BoxScoreTeam,
    away_team: BoxScoreTeam,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoxScoreTeam {
    team_tricode: String,
    #[serde(default)]
    players: Vec<BoxScorePlayer>,
}

#[derive(Deserialize)]
struct BoxScorePlayer {
    name: String,
    statistics: PlayerStatistics,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerStatistics {
    #[serde(default)]
    field_goals_made: u32,
    #[serde(default)]
    field_goals_attempted: u32,
    #[serde(default)]
    three_pointers_made: u32,
    #[serde(default)]
    three_pointers_attempted: u32,
    #[serde(default)]
    points: u32,
}

pub fn parse_box_score(json: &str) -> Result<Vec<BoxScoreLine>> {
    let root: BoxScoreRoot =
        serde_json::from_str(json).context("failed to parse box score JSON")?;
    let mut lines = Vec::new();
    for team in [root.game.away_team, root.game.home_team] {
        for player in team.players {
            lines.push(BoxScoreLine {
                player: player.name,
                team: team.team_tricode.clone(),
                fgm: player.statistics.field_goals_made,
                fga: player.statistics.field_goals_attempted,
                fg3m: player.statistics.three_pointers_made,
                fg3a: player.statistics.three_pointers_attempted,
                pts: player.statistics.points,
            });
        }
    }
    Ok(lines)
}
