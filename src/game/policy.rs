use std::time::Duration;

/// Tick interval after one food item: `step` shorter, floored at `floor`.
///
/// An interval already at or below the floor comes back unchanged. The curve
/// is a pure function of the current interval only, so the game speeds up by
/// a constant amount per food regardless of score.
pub fn next_interval(current: Duration, step: Duration, floor: Duration) -> Duration {
    if current <= floor {
        current
    } else {
        current.saturating_sub(step).max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(2);
    const FLOOR: Duration = Duration::from_millis(50);

    #[test]
    fn test_interval_shrinks_by_fixed_step() {
        let next = next_interval(Duration::from_millis(150), STEP, FLOOR);
        assert_eq!(next, Duration::from_millis(148));
    }

    #[test]
    fn test_interval_clamps_to_floor() {
        let next = next_interval(Duration::from_millis(51), STEP, FLOOR);
        assert_eq!(next, FLOOR);
    }

    #[test]
    fn test_interval_at_floor_is_unchanged() {
        assert_eq!(next_interval(FLOOR, STEP, FLOOR), FLOOR);
        // Below the floor also stays put rather than being raised to it
        let below = Duration::from_millis(40);
        assert_eq!(next_interval(below, STEP, FLOOR), below);
    }

    #[test]
    fn test_interval_is_monotonically_non_increasing() {
        let mut interval = Duration::from_millis(150);
        for _ in 0..100 {
            let next = next_interval(interval, STEP, FLOOR);
            assert!(next <= interval);
            assert!(next >= FLOOR);
            interval = next;
        }
        assert_eq!(interval, FLOOR);
    }
}
