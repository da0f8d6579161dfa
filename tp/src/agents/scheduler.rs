//! Scheduler stage - arranges researched POIs into the skeleton

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::{PointOfInterest, ScheduleResult, ScheduledDay, ScheduledSegment, Skeleton};
use crate::tools::geo::cluster_points;

/// Activity shown for segments no POI was left for
pub const PLACEHOLDER_ACTIVITY: &str = "Open exploration";

/// Assign POIs to skeleton segments
pub struct Scheduler;

impl Scheduler {
    /// Walk days and segments in order, assigning the next unconsumed POI:
    /// flat forward order first, then the day's own cluster. A POI is never
    /// placed twice, so `stops` stays within the researched POI count.
    /// Segments left without a POI get the placeholder activity and are not
    /// added to `stops`.
    pub fn assign(&self, skeleton: &Skeleton, pois: &[PointOfInterest]) -> ScheduleResult {
        if skeleton.days.is_empty() {
            return ScheduleResult::default();
        }

        let indices: Vec<usize> = (0..pois.len()).collect();
        let mut clusters: Vec<VecDeque<usize>> = cluster_points(&indices, skeleton.days.len())
            .into_iter()
            .map(VecDeque::from)
            .collect();

        let mut used = vec![false; pois.len()];
        let mut cursor = 0usize;
        let mut schedule = Vec::with_capacity(skeleton.days.len());
        let mut stops = Vec::new();

        for (day, cluster) in skeleton.days.iter().zip(clusters.iter_mut()) {
            let mut segments = Vec::with_capacity(day.segments.len());
            for segment in &day.segments {
                while cursor < pois.len() && used[cursor] {
                    cursor += 1;
                }
                let next = if cursor < pois.len() {
                    let index = cursor;
                    cursor += 1;
                    Some(index)
                } else {
                    // Flat order exhausted; fall back to this day's cluster,
                    // skipping anything already placed.
                    loop {
                        match cluster.pop_front() {
                            Some(index) if used[index] => continue,
                            other => break other,
                        }
                    }
                };

                let entry = match next {
                    Some(index) => {
                        used[index] = true;
                        let poi = &pois[index];
                        stops.push(poi.clone());
                        ScheduledSegment {
                            slot: segment.slot,
                            activity: poi.title.clone(),
                            summary: Some(poi.summary.clone()).filter(|s| !s.is_empty()),
                        }
                    }
                    None => ScheduledSegment {
                        slot: segment.slot,
                        activity: PLACEHOLDER_ACTIVITY.to_string(),
                        summary: None,
                    },
                };
                segments.push(entry);
            }
            schedule.push(ScheduledDay {
                date: day.date,
                city: day.city.clone(),
                segments,
            });
        }

        debug!(
            days = schedule.len(),
            stops = stops.len(),
            pois = pois.len(),
            "schedule assembled"
        );
        ScheduleResult { schedule, stops }
    }
}
