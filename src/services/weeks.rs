//! Week partitioning
//!
//! Splits a cycle into Monday-to-Sunday calendar weeks, clipping the first
//! and last week at the cycle's edges.

use chrono::{Datelike, Duration};
use tracing::debug;

use crate::models::DateRange;

pub struct WeekPartitioner;

impl WeekPartitioner {
    /// Calendar weeks intersecting `range`, clipped to it, in chronological order.
    ///
    /// The windows are contiguous, never overlap, and cover `range` exactly.
    pub fn partition(range: DateRange) -> Vec<DateRange> {
        let offset = range.start().weekday().num_days_from_monday() as i64;
        let mut monday = range.start() - Duration::days(offset);
        let mut weeks = Vec::new();

        while monday <= range.end() {
            let sunday = monday + Duration::days(6);
            let week = DateRange::new(monday, sunday).and_then(|w| w.intersection(&range));
            if let Some(week) = week {
                weeks.push(week);
            }
            monday += Duration::days(7);
        }

        debug!(range = %range, weeks = weeks.len(), "partitioned cycle into weeks");
        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn assert_exact_cover(cycle: DateRange, weeks: &[DateRange]) {
        assert_eq!(weeks.first().unwrap().start(), cycle.start());
        assert_eq!(weeks.last().unwrap().end(), cycle.end());
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end() + Duration::days(1), pair[1].start());
        }
        let total: i64 = weeks.iter().map(|w| w.days()).sum();
        assert_eq!(total, cycle.days());
    }

    #[test]
    fn test_clips_partial_weeks() {
        // 2025-01-15 is a Wednesday, 2025-02-14 a Friday
        let cycle = range(date(2025, 1, 15), date(2025, 2, 14));
        let weeks = WeekPartitioner::partition(cycle);

        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], range(date(2025, 1, 15), date(2025, 1, 19)));
        assert_eq!(weeks[0].days(), 5);
        assert_eq!(weeks[1], range(date(2025, 1, 20), date(2025, 1, 26)));
        assert_eq!(weeks[4], range(date(2025, 2, 10), date(2025, 2, 14)));
        assert_exact_cover(cycle, &weeks);
    }

    #[test]
    fn test_inner_weeks_start_monday_end_sunday() {
        let cycle = range(date(2025, 3, 5), date(2025, 4, 4));
        let weeks = WeekPartitioner::partition(cycle);
        for week in &weeks[1..weeks.len() - 1] {
            assert_eq!(week.start().weekday(), Weekday::Mon);
            assert_eq!(week.end().weekday(), Weekday::Sun);
            assert_eq!(week.days(), 7);
        }
    }

    #[test]
    fn test_single_day_cycle() {
        let cycle = DateRange::single(date(2025, 3, 9));
        let weeks = WeekPartitioner::partition(cycle);
        assert_eq!(weeks, vec![cycle]);
    }

    #[test]
    fn test_cycle_aligned_to_weeks() {
        // Monday 2025-03-03 .. Sunday 2025-03-16
        let cycle = range(date(2025, 3, 3), date(2025, 3, 16));
        let weeks = WeekPartitioner::partition(cycle);
        assert_eq!(weeks.len(), 2);
        assert!(weeks.iter().all(|w| w.days() == 7));
    }

    #[test]
    fn test_exact_cover_for_many_ranges() {
        let base = date(2024, 12, 20);
        for start_offset in 0..10 {
            for len in [1, 2, 6, 7, 8, 15, 28, 31] {
                let start = base + Duration::days(start_offset);
                let cycle = range(start, start + Duration::days(len - 1));
                let weeks = WeekPartitioner::partition(cycle);
                assert_exact_cover(cycle, &weeks);
            }
        }
    }
}
