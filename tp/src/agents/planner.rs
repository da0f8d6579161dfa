//! Planner stage - drafts a coarse day-by-day skeleton

use chrono::{Days, NaiveDate};

use crate::domain::{Skeleton, SkeletonDay, SkeletonSegment, Slot};

/// Generate a high-level plan layout for a trip request
pub struct Planner;

impl Planner {
    /// One day per offset from `start_date`, each with the three
    /// morning/afternoon/evening segments and no notes yet.
    pub fn plan(&self, city: &str, start_date: NaiveDate, duration_days: u32, pace: &str) -> Skeleton {
        let days = (0..duration_days)
            .map(|offset| SkeletonDay {
                date: start_date
                    .checked_add_days(Days::new(u64::from(offset)))
                    .unwrap_or(start_date),
                city: city.to_string(),
                pace: pace.to_string(),
                segments: Slot::ALL
                    .iter()
                    .map(|slot| SkeletonSegment {
                        slot: *slot,
                        notes: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Skeleton {
            city: city.to_string(),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_one_day_per_offset() {
        let skeleton = Planner.plan("Lisbon", date("2026-09-01"), 3, "balanced");
        assert_eq!(skeleton.city, "Lisbon");
        assert_eq!(skeleton.days.len(), 3);
        assert_eq!(skeleton.days[0].date, date("2026-09-01"));
        assert_eq!(skeleton.days[2].date, date("2026-09-03"));
    }

    #[test]
    fn test_three_segments_per_day() {
        let skeleton = Planner.plan("Oslo", date("2026-09-01"), 2, "packed");
        for day in &skeleton.days {
            assert_eq!(day.pace, "packed");
            let slots: Vec<Slot> = day.segments.iter().map(|s| s.slot).collect();
            assert_eq!(slots, vec![Slot::Morning, Slot::Afternoon, Slot::Evening]);
            assert!(day.segments.iter().all(|s| s.notes.is_empty()));
        }
    }

    #[test]
    fn test_month_rollover() {
        let skeleton = Planner.plan("Oslo", date("2026-08-31"), 2, "balanced");
        assert_eq!(skeleton.days[1].date, date("2026-09-01"));
    }
}
