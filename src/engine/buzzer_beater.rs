use crate::feed::types::PlayByPlayEvent;

/// A made-shot event, judged from the feed's description text. Miss lines
/// are prefixed "MISS" in every provider format we consume.
fn is_made_shot(description: &str) -> bool {
    let upper = description.to_ascii_uppercase();
    if upper.starts_with("MISS") {
        return false;
    }
    ["SHOT", "3PT", "LAYUP", "DUNK", "FREE THROW"]
        .iter()
        .any(|kw| upper.contains(kw))
}

/// Count game-deciding late shots: made shots inside the final
/// `buzzer_seconds` of the fourth period or any overtime whose margin tied
/// the game or flipped which team was leading, relative to the last known
/// margin before the shot.
pub fn count_buzzer_beaters(events: &[PlayByPlayEvent], buzzer_seconds: u16) -> u32 {
    let mut count = 0;
    let mut previous: Option<i32> = None;
    for event in events {
        let Some(margin) = event.margin else { continue };
        let in_window = event.period >= 4 && event.clock_seconds <= buzzer_seconds;
        if in_window && is_made_shot(&event.description) {
            let decided = margin == 0
                || previous.map_or(false, |prev| prev.signum() != margin.signum());
            if decided {
                count += 1;
            }
        }
        previous = Some(margin);
    }
    count
}

/// Buzzer-beater sub-score: flag semantics, one qualifying shot earns the
/// full weight.
pub fn score_buzzer_beaters(
    events: &[PlayByPlayEvent],
    weight: f64,
    buzzer_seconds: u16,
) -> (u32, f64) {
    let count = count_buzzer_beaters(events, buzzer_seconds);
    (count, count.min(1) as f64 * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(period: u8, clock_seconds: u16, margin: i32, description: &str) -> PlayByPlayEvent {
        PlayByPlayEvent {
            period,
            margin: Some(margin),
            clock_seconds,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_lead_flipping_shot_at_the_horn() {
        let events = vec![
            event(4, 120, -1, "Tatum 18' Jump Shot"),
            event(4, 2, 1, "James 26' 3PT Jump Shot"),
        ];
        let (count, score) = score_buzzer_beaters(&events, 0.05, 24);
        assert_eq!(count, 1);
        assert!((score - 0.05).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_tying_shot_counts() {
        let events = vec![
            event(4, 60, -2, "Booker Driving Layup"),
            event(4, 1, 0, "Durant 12' Jump Shot"),
        ];
        assert_eq!(count_buzzer_beaters(&events, 24), 1);
    }

    #[test]
    fn test_miss_does_not_count() {
        let events = vec![
            event(4, 30, -1, "Curry Driving Layup"),
            event(4, 3, -1, "MISS Curry 27' 3PT Jump Shot"),
        ];
        assert_eq!(count_buzzer_beaters(&events, 24), 0);
    }

    #[test]
    fn test_early_shot_outside_window() {
        let events = vec![
            event(4, 300, -1, "Curry Driving Layup"),
            event(4, 100, 1, "Curry 27' 3PT Jump Shot"),
        ];
        assert_eq!(count_buzzer_beaters(&events, 24), 0);
    }

    #[test]
    fn test_padding_shot_does_not_qualify() {
        // Already ahead; a late make that stretches the lead decides nothing.
        let events = vec![
            event(4, 60, 5, "Jokic Hook Shot"),
            event(4, 4, 7, "Murray Driving Dunk"),
        ];
        assert_eq!(count_buzzer_beaters(&events, 24), 0);
    }

    #[test]
    fn test_overtime_window_also_scans() {
        let events = vec![
            event(5, 200, 2, "Gilgeous-Alexander Pullup Jump Shot"),
            event(5, 1, -1, "Doncic 30' 3PT Jump Shot"),
        ];
        assert_eq!(count_buzzer_beaters(&events, 24), 1);
    }

    #[test]
    fn test_multiple_beaters_still_full_weight() {
        let events = vec![
            event(4, 10, 0, "Brown 15' Jump Shot"),
            event(4, 3, -1, "White Driving Layup"),
            event(5, 2, 1, "Tatum 21' Jump Shot"),
        ];
        let (count, score) = score_buzzer_beaters(&events, 0.05, 24);
        assert!(count >= 2, "got {}", count);
        assert!((score - 0.05).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_empty_events() {
        assert_eq!(score_buzzer_beaters(&[], 0.05, 24), (0, 0.0));
    }
}
