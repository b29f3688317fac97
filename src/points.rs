//! Story point estimation.
//!
//! Pure mapping from (duration, priority) to a point value on the configured
//! ascending scale. The estimate is duration divided by hours-per-point
//! (rounded up), shifted by the per-priority adjustment, clamped to a minimum
//! of 1, then rounded up to the first scale value that covers it. Estimates
//! can never leave the scale: anything past the top lands on the largest
//! value.

use crate::config::Scoring;
use crate::fields::Priority;

/// Estimate story points for a task.
pub fn estimate_points(duration_hours: u32, priority: Priority, scoring: &Scoring) -> u32 {
    let raw = duration_hours.div_ceil(scoring.hours_per_point.max(1));
    let adjusted = (raw as i64 + scoring.adjustment(priority) as i64).max(1) as u32;
    scoring
        .scale
        .iter()
        .copied()
        .find(|&p| p >= adjusted)
        .unwrap_or_else(|| scoring.scale.last().copied().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Adjustments;

    fn scoring() -> Scoring {
        Scoring {
            hours_per_point: 4,
            scale: vec![1, 2, 3, 5, 8],
            adjustments: Adjustments {
                high: 1,
                medium: 0,
                low: -1,
            },
        }
    }

    #[test]
    fn test_priority_adjustments() {
        let s = scoring();
        // 8h -> raw 2; +1 for high lands on 3, -1 for low lands on 1.
        assert_eq!(estimate_points(8, Priority::High, &s), 3);
        assert_eq!(estimate_points(8, Priority::Medium, &s), 2);
        assert_eq!(estimate_points(8, Priority::Low, &s), 1);
    }

    #[test]
    fn test_low_priority_clamps_to_one() {
        let s = scoring();
        // 2h -> raw 1; -1 would hit zero, clamped back to 1.
        assert_eq!(estimate_points(2, Priority::Low, &s), 1);
        assert_eq!(estimate_points(0, Priority::Low, &s), 1);
    }

    #[test]
    fn test_rounds_up_to_scale() {
        let s = scoring();
        // 16h -> raw 4; no 4 on the scale, next value up is 5.
        assert_eq!(estimate_points(16, Priority::Medium, &s), 5);
    }

    #[test]
    fn test_caps_at_largest_scale_value() {
        let s = scoring();
        // 40h high -> raw 10, +1 = 11, beyond the scale, capped at 8.
        assert_eq!(estimate_points(40, Priority::High, &s), 8);
    }

    #[test]
    fn test_always_on_scale() {
        let s = scoring();
        for hours in 0..=60 {
            for priority in [Priority::High, Priority::Medium, Priority::Low] {
                let points = estimate_points(hours, priority, &s);
                assert!(points >= 1);
                assert!(s.scale.contains(&points), "{points} not on scale");
            }
        }
    }

    #[test]
    fn test_is_pure() {
        let s = scoring();
        assert_eq!(
            estimate_points(12, Priority::High, &s),
            estimate_points(12, Priority::High, &s)
        );
    }
}
