pub mod nba_stats;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::{BoxScoreLine, GameSummary, PlayByPlayEvent};

#[async_trait]
pub trait GameDataFeed: Send + Sync {
    async fn fetch_scoreboard(&self) -> Result<Vec<GameSummary>>;
    async fn fetch_play_by_play(&self, game_id: &str) -> Result<Vec<PlayByPlayEvent>>;
    async fn fetch_box_score(&self, game_id: &str) -> Result<Vec<BoxScoreLine>>;
}
