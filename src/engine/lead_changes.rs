use crate::engine::safe_ratio;
use crate::feed::types::PlayByPlayEvent;

/// Count sign flips of the running margin. Ties (zero margin) and events
/// without a margin are pending: they never count as a side of their own,
/// and they never break a transition in progress: a flip registers when
/// the first nonzero margin after them differs in sign from the last
/// nonzero margin before them.
pub fn count_lead_changes<I>(margins: I) -> u32
where
    I: IntoIterator<Item = Option<i32>>,
{
    let mut count = 0;
    let mut previous: Option<i32> = None;
    for margin in margins.into_iter().flatten() {
        if margin == 0 {
            continue;
        }
        if let Some(prev) = previous {
            if (prev < 0) != (margin < 0) {
                count += 1;
            }
        }
        previous = Some(margin);
    }
    count
}

/// Lead-change sub-score: the count normalized against a reference "high"
/// count, capped at 1, times the weight.
pub fn score_lead_changes(events: &[PlayByPlayEvent], weight: f64, norm: u32) -> (u32, f64) {
    let count = count_lead_changes(events.iter().map(|e| e.margin));
    let score = safe_ratio(count as f64, norm as f64).min(1.0) * weight;
    (count, score)
}

/// Number of distinct overtime periods observed.
pub fn count_extra_periods(events: &[PlayByPlayEvent]) -> u32 {
    let mut seen: Vec<u8> = events
        .iter()
        .map(|e| e.period)
        .filter(|&p| p >= 5)
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len() as u32
}

/// Extra-period sub-score. Any overtime at all earns the full weight; a
/// triple-overtime game earns no more than a single one.
pub fn score_extra_periods(events: &[PlayByPlayEvent], weight: f64) -> (u32, f64) {
    let count = count_extra_periods(events);
    (count, count.min(1) as f64 * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_from_margins(margins: &[Option<i32>]) -> Vec<PlayByPlayEvent> {
        margins
            .iter()
            .map(|&margin| PlayByPlayEvent {
                period: 1,
                margin,
                clock_seconds: 300,
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_no_lead_changes_one_sided() {
        assert_eq!(count_lead_changes([Some(2), Some(5), Some(8)]), 0);
    }

    #[test]
    fn test_counts_each_flip() {
        let margins = [Some(3), Some(-1), Some(2), Some(-4)];
        assert_eq!(count_lead_changes(margins), 3);
    }

    #[test]
    fn test_zero_margin_is_pending_not_a_side() {
        // +2 -> tie -> -1 is one lead change, not two.
        assert_eq!(count_lead_changes([Some(2), Some(0), Some(-1)]), 1);
        // +2 -> tie -> +3: the tie did not flip anything.
        assert_eq!(count_lead_changes([Some(2), Some(0), Some(3)]), 0);
    }

    #[test]
    fn test_missing_margins_are_skipped() {
        assert_eq!(count_lead_changes([Some(2), None, Some(-1), None]), 1);
    }

    #[test]
    fn test_score_caps_at_weight() {
        let margins: Vec<Option<i32>> = (0..30).map(|i| Some(if i % 2 == 0 { 1 } else { -1 })).collect();
        let events = events_from_margins(&margins);
        let (count, score) = score_lead_changes(&events, 0.05, 12);
        assert_eq!(count, 29);
        assert!((score - 0.05).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_score_scales_below_norm() {
        let events = events_from_margins(&[Some(1), Some(-1), Some(1), Some(-1)]);
        let (count, score) = score_lead_changes(&events, 0.05, 12);
        assert_eq!(count, 3);
        assert!((score - 0.05 * 3.0 / 12.0).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_empty_events_score_zero() {
        let (count, score) = score_lead_changes(&[], 0.05, 12);
        assert_eq!(count, 0);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_extra_periods_flag_semantics() {
        let mut events = events_from_margins(&[Some(1)]);
        events[0].period = 4;
        let (count, score) = score_extra_periods(&events, 0.05);
        assert_eq!((count, score), (0, 0.0));

        let mut ot = events_from_margins(&[Some(1), Some(2), Some(3)]);
        ot[0].period = 5;
        ot[1].period = 5;
        ot[2].period = 6;
        let (count, score) = score_extra_periods(&ot, 0.05);
        assert_eq!(count, 2);
        // Double overtime still earns exactly the configured weight.
        assert!((score - 0.05).abs() < 1e-12, "got {}", score);
    }
}
