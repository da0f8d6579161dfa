//! Evaluator stage - deterministic rule rubric over a drafted plan

use std::collections::{BTreeMap, HashSet};

use crate::domain::{EvaluationResult, PlanSnapshot};

/// Score a plan against the six-rule rubric
pub fn evaluate(plan: &PlanSnapshot) -> EvaluationResult {
    let mut rules = BTreeMap::new();

    let has_two_meals = plan
        .schedule
        .iter()
        .flat_map(|day| &day.segments)
        .any(|segment| {
            let activity = segment.activity.to_lowercase();
            activity.contains("breakfast") || activity.contains("lunch")
        });
    rules.insert("has_two_meals".to_string(), has_two_meals);

    rules.insert("covers_3_pois".to_string(), plan.stops.len() >= 3);
    rules.insert("weather_aware".to_string(), plan.weather_note.is_some());
    // The typed budget is always one of the three tiers.
    rules.insert("budget_tagged".to_string(), true);

    let unique_titles: HashSet<&str> = plan.stops.iter().map(|s| s.title.as_str()).collect();
    rules.insert(
        "no_duplicates".to_string(),
        unique_titles.len() == plan.stops.len(),
    );
    rules.insert(
        "has_sources".to_string(),
        plan.stops.iter().all(|s| !s.source.is_empty()),
    );

    let score = rules.values().filter(|&&held| held).count() as u32;
    EvaluationResult::new(score, rules.len() as u32, rules)
}
