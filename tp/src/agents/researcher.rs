//! Researcher stage - gathers POIs with concurrent detail lookups

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::debug;

use crate::domain::PointOfInterest;
use crate::tools::WikiApi;

/// Default number of search results to research per run
pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Collect information about points of interest for a city
pub struct Researcher {
    wiki: Arc<dyn WikiApi>,
    max_results: usize,
}

impl Researcher {
    pub fn new(wiki: Arc<dyn WikiApi>) -> Self {
        Self {
            wiki,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Builder method to bound the fan-out width
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Search once, then fan out one detail fetch per hit.
    ///
    /// All fetches run as independent tokio tasks and are joined before the
    /// stage returns: there is no partial-success path, the first failing
    /// lookup fails the whole stage. POIs come back in search ranking order.
    pub async fn research(&self, city: &str, focus: Option<&str>) -> Result<Vec<PointOfInterest>> {
        let mut query = format!("{city} points of interest");
        if let Some(focus) = focus {
            query.push(' ');
            query.push_str(focus);
        }
        debug!(%query, max_results = self.max_results, "researching points of interest");

        let hits = self.wiki.search(&query, self.max_results).await?;

        let handles: Vec<_> = hits
            .iter()
            .map(|hit| {
                let wiki = Arc::clone(&self.wiki);
                let title = hit.title.clone();
                tokio::spawn(async move { wiki.page(&title).await })
            })
            .collect();
        let pages = futures::future::try_join_all(handles)
            .await
            .wrap_err("A research lookup task panicked")?;

        let mut pois = Vec::with_capacity(hits.len());
        for (hit, page) in hits.iter().zip(pages) {
            let page = page?;
            // Prefer the canonical title from the detail fetch when present.
            let title = if page.title.is_empty() {
                hit.title.clone()
            } else {
                page.title
            };
            let summary = page.text.lines().next().unwrap_or("").trim().to_string();
            let source = format!(
                "https://en.wikipedia.org/wiki/{}",
                hit.title.replace(' ', "_")
            );
            pois.push(PointOfInterest {
                title,
                summary,
                source,
            });
        }
        debug!(city, count = pois.len(), "research complete");
        Ok(pois)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eyre::eyre;
    use std::sync::Mutex;

    use crate::tools::{SearchHit, WikiPage};

    struct StaticWiki {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WikiApi for StaticWiki {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok((0..limit.min(3))
                .map(|i| SearchHit {
                    title: format!("Site {i}"),
                    snippet: String::new(),
                })
                .collect())
        }

        async fn page(&self, title: &str) -> Result<WikiPage> {
            Ok(WikiPage {
                title: format!("{title} (canonical)"),
                text: format!("  All about {title}.  \nSecond paragraph."),
            })
        }
    }

    struct FailingPageWiki;

    #[async_trait]
    impl WikiApi for FailingPageWiki {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchHit>> {
            Ok(vec![
                SearchHit {
                    title: "Broken".to_string(),
                    snippet: String::new(),
                };
                limit.min(2)
            ])
        }

        async fn page(&self, _title: &str) -> Result<WikiPage> {
            Err(eyre!("detail fetch exploded"))
        }
    }

    #[tokio::test]
    async fn test_research_builds_pois_in_ranking_order() {
        let wiki = Arc::new(StaticWiki {
            queries: Mutex::new(Vec::new()),
        });
        let researcher = Researcher::new(wiki.clone()).with_max_results(3);

        let pois = researcher.research("Lisbon", None).await.unwrap();
        assert_eq!(pois.len(), 3);
        assert_eq!(pois[0].title, "Site 0 (canonical)");
        assert_eq!(pois[0].summary, "All about Site 0.");
        assert_eq!(pois[2].source, "https://en.wikipedia.org/wiki/Site_2");

        let queries = wiki.queries.lock().unwrap();
        assert_eq!(queries[0], "Lisbon points of interest");
    }

    #[tokio::test]
    async fn test_focus_is_appended_to_query() {
        let wiki = Arc::new(StaticWiki {
            queries: Mutex::new(Vec::new()),
        });
        let researcher = Researcher::new(wiki.clone());

        researcher.research("Lisbon", Some("crowds")).await.unwrap();

        let queries = wiki.queries.lock().unwrap();
        assert_eq!(queries[0], "Lisbon points of interest crowds");
    }

    #[tokio::test]
    async fn test_failing_detail_fetch_fails_the_stage() {
        let researcher = Researcher::new(Arc::new(FailingPageWiki));
        let err = researcher.research("Lisbon", None).await.unwrap_err();
        assert!(err.to_string().contains("detail fetch exploded"));
    }
}
