//! Presenter stage - renders the itinerary to a Markdown artifact

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::{Checklist, PointOfInterest, ScheduledDay};
use crate::tools::export;

/// Embedded Markdown template for the rendered itinerary
const ITINERARY_TEMPLATE: &str = r#"# Tripdraft Itinerary
{{#if weather_note}}
> Weather note: {{weather_note}}
{{/if}}

## Schedule
{{#each days}}
### {{date}} – {{city}}
{{#each segments}}
- **{{slot}}**: {{activity}}{{#if summary}} — {{summary}}{{/if}}
{{/each}}
{{/each}}
{{#if stops}}

## Points of Interest
{{#each stops}}
- **{{title}}** — {{#if summary}}{{summary}}{{else}}No summary available.{{/if}}
{{#if source}}
  - Source: {{source}}
{{/if}}
{{/each}}
{{/if}}

## Packing Checklist
{{#each packing}}
- [ ] {{this}}
{{/each}}

## Task Checklist
{{#each tasks}}
- [ ] {{this}}
{{/each}}
"#;

/// Render context handed to the template
#[derive(Debug, Serialize)]
struct RenderContext<'a> {
    weather_note: Option<&'a str>,
    days: Vec<DayContext<'a>>,
    stops: &'a [PointOfInterest],
    packing: &'a [String],
    tasks: &'a [String],
}

#[derive(Debug, Serialize)]
struct DayContext<'a> {
    date: String,
    city: &'a str,
    segments: Vec<SegmentContext<'a>>,
}

#[derive(Debug, Serialize)]
struct SegmentContext<'a> {
    /// Title-cased slot label
    slot: &'static str,
    activity: &'a str,
    summary: Option<&'a str>,
}

/// Persist itinerary artifacts as Markdown files
pub struct Presenter {
    output_dir: PathBuf,
    registry: Handlebars<'static>,
}

impl Presenter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut registry = Handlebars::new();
        // Markdown output: keep characters as-is
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string("itinerary", ITINERARY_TEMPLATE)
            .wrap_err("Failed to register itinerary template")?;
        Ok(Self {
            output_dir: output_dir.into(),
            registry,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the document and write it under the output directory,
    /// creating parent directories as needed. Returns the artifact path.
    pub fn present(
        &self,
        filename: &str,
        schedule: &[ScheduledDay],
        stops: &[PointOfInterest],
        checklist: &Checklist,
        weather_note: Option<&str>,
    ) -> Result<PathBuf> {
        let days = schedule
            .iter()
            .map(|day| DayContext {
                date: day.date.to_string(),
                city: &day.city,
                segments: day
                    .segments
                    .iter()
                    .map(|segment| SegmentContext {
                        slot: segment.slot.title(),
                        activity: &segment.activity,
                        summary: segment.summary.as_deref(),
                    })
                    .collect(),
            })
            .collect();

        let context = RenderContext {
            weather_note,
            days,
            stops,
            packing: &checklist.packing,
            tasks: &checklist.tasks,
        };

        let content = self
            .registry
            .render("itinerary", &context)
            .wrap_err("Failed to render itinerary")?;
        let path = self.output_dir.join(filename);
        export::write_markdown(&path, &content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{ChecklistBuilder, Planner, Scheduler};
    use crate::domain::PointOfInterest;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn poi(title: &str) -> PointOfInterest {
        PointOfInterest {
            title: title.to_string(),
            summary: format!("{title} summary"),
            source: format!("https://example.org/{title}"),
        }
    }

    #[test]
    fn test_present_writes_full_document() {
        let temp = TempDir::new().unwrap();
        let presenter = Presenter::new(temp.path().join("plans")).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let skeleton = Planner.plan("Lisbon", date, 1, "balanced");
        let pois = vec![poi("Castle"), poi("Museum")];
        let result = Scheduler.assign(&skeleton, &pois);
        let checklist = ChecklistBuilder.build(&result.schedule, None);

        let path = presenter
            .present(
                "2026-09-01_lisbon.md",
                &result.schedule,
                &result.stops,
                &checklist,
                Some("Chance of precipitation: 20% | Temps: 18°C – 24°C"),
            )
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Tripdraft Itinerary"));
        assert!(content.contains("> Weather note: Chance of precipitation: 20%"));
        assert!(content.contains("### 2026-09-01 – Lisbon"));
        assert!(content.contains("- **Morning**: Castle — Castle summary"));
        assert!(content.contains("- **Evening**: Open exploration"));
        assert!(content.contains("## Points of Interest"));
        assert!(content.contains("  - Source: https://example.org/Castle"));
        assert!(content.contains("- [ ] Comfortable walking shoes"));
        assert!(content.contains("- [ ] Download offline maps"));
    }

    #[test]
    fn test_present_without_weather_or_stops() {
        let temp = TempDir::new().unwrap();
        let presenter = Presenter::new(temp.path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let skeleton = Planner.plan("Oslo", date, 1, "balanced");
        let result = Scheduler.assign(&skeleton, &[]);
        let checklist = ChecklistBuilder.build(&result.schedule, None);

        let path = presenter
            .present("2026-09-01_oslo.md", &result.schedule, &result.stops, &checklist, None)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("Weather note"));
        assert!(!content.contains("## Points of Interest"));
        assert!(content.contains("## Packing Checklist"));
    }
}
