//! Checklist stage - packing and preparation lists

use std::collections::BTreeSet;

use crate::domain::{Checklist, ScheduledDay, WeatherSummary};

/// Threshold above which a rain jacket makes the packing list
const RAIN_PROBABILITY_THRESHOLD: i64 = 40;

/// Create lightweight packing and preparation tasks
pub struct ChecklistBuilder;

impl ChecklistBuilder {
    /// Base items plus weather- and schedule-conditional extras.
    /// Packing comes back deduplicated and sorted; tasks keep their order.
    pub fn build(&self, schedule: &[ScheduledDay], weather: Option<&WeatherSummary>) -> Checklist {
        let mut packing: BTreeSet<String> = [
            "Comfortable walking shoes",
            "Reusable water bottle",
            "Phone charger",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let tasks = vec![
            "Download offline maps".to_string(),
            "Confirm local transit options".to_string(),
        ];

        if let Some(weather) = weather
            && weather
                .precipitation_probability_max
                .iter()
                .any(|&p| p > RAIN_PROBABILITY_THRESHOLD)
        {
            packing.insert("Light rain jacket".to_string());
        }

        if !schedule.is_empty() {
            packing.insert("Tickets or confirmations for booked activities".to_string());
        }

        Checklist {
            packing: packing.into_iter().collect(),
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Planner, Scheduler};
    use chrono::NaiveDate;

    fn schedule() -> Vec<ScheduledDay> {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let skeleton = Planner.plan("Lisbon", date, 1, "balanced");
        Scheduler.assign(&skeleton, &[]).schedule
    }

    fn weather(precip: Vec<i64>) -> WeatherSummary {
        WeatherSummary {
            temperature_2m_max: vec![24.0],
            temperature_2m_min: vec![18.0],
            precipitation_probability_max: precip,
        }
    }

    #[test]
    fn test_packing_is_sorted_and_deduplicated() {
        let checklist = ChecklistBuilder.build(&schedule(), None);
        let mut sorted = checklist.packing.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(checklist.packing, sorted);
        assert_eq!(checklist.tasks.len(), 2);
    }

    #[test]
    fn test_rain_jacket_threshold_is_exclusive() {
        let dry = ChecklistBuilder.build(&schedule(), Some(&weather(vec![40])));
        assert!(!dry.packing.iter().any(|i| i.contains("rain jacket")));

        let wet = ChecklistBuilder.build(&schedule(), Some(&weather(vec![10, 41])));
        assert!(wet.packing.iter().any(|i| i.contains("rain jacket")));
    }

    #[test]
    fn test_empty_schedule_skips_tickets_item() {
        let checklist = ChecklistBuilder.build(&[], None);
        assert!(!checklist.packing.iter().any(|i| i.contains("Tickets")));

        let with_days = ChecklistBuilder.build(&schedule(), None);
        assert!(with_days.packing.iter().any(|i| i.contains("Tickets")));
    }
}
