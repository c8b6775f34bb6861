use chrono::NaiveDate;

/// Normalized internal types used by the engine (provider-agnostic).

#[derive(Debug, Clone, PartialEq)]
pub enum GameStatus {
    PreGame,
    Live,
    Final,
}

/// One game on the scoreboard.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub game_id: String,
    pub game_date: NaiveDate,
    /// "AWY @ HOM" label, away team first.
    pub matchup: String,
    pub status: GameStatus,
}

/// One play-by-play event. Ordering is chronological within a game and is
/// load-bearing: margin sign changes and late-shot detection are positional.
#[derive(Debug, Clone)]
pub struct PlayByPlayEvent {
    /// 1-4 regulation, 5+ overtime.
    pub period: u8,
    /// Running home-minus-away differential at this event, when the feed
    /// carried a score for it.
    pub margin: Option<i32>,
    /// Game clock, seconds remaining in the period.
    pub clock_seconds: u16,
    pub description: String,
}

/// One player's stat line for a game.
#[derive(Debug, Clone)]
pub struct BoxScoreLine {
    pub player: String,
    pub team: String,
    pub fgm: u32,
    pub fga: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub pts: u32,
}

/// Parse an ISO-8601 duration game clock ("PT05M30.00S", empty during
/// breaks) into seconds remaining.
pub fn parse_iso_clock(clock: &str) -> Option<u16> {
    if clock.is_empty() {
        return None;
    }
    let clock = clock.trim_start_matches("PT").trim_end_matches('S');
    let (min_str, sec_str) = clock.split_once('M')?;
    let minutes: u16 = min_str.parse().ok()?;
    let seconds: u16 = sec_str.split('.').next()?.parse().ok()?;
    Some(minutes * 60 + seconds)
}

/// Parse a display clock ("5:30", "0:05.3") into seconds remaining.
pub fn parse_display_clock(clock: &str) -> Option<u16> {
    let clock = clock.split('.').next()?;
    let (min_str, sec_str) = clock.split_once(':')?;
    let minutes: u16 = min_str.parse().ok()?;
    let seconds: u16 = sec_str.parse().ok()?;
    Some(minutes * 60 + seconds)
}
