//! Builders and assertions shared by unit tests, the integration suite and
//! benchmarks.

pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::config::GeminiSettings;
    use crate::domain::models::{
        AnalysisSnapshot, CanonicalPage, HeadingElement, ImageElement, KeywordDensity,
        NormalizedSnapshot, PageRecord,
    };
    use crate::domain::results::{
        ComparisonMetrics, Effectiveness, MetricComparison, MetricKind, StrategyAnalysis,
        StrategyComparison,
    };

    const SECTIONS: &[&str] = &["blog", "guides", "products", "services", "support", "about"];

    fn canonicalize(record: &PageRecord) -> CanonicalPage {
        CanonicalPage::from_record(record).expect("fixture record is valid")
    }

    fn headings(items: &[(u8, &str)]) -> Vec<HeadingElement> {
        items
            .iter()
            .map(|(level, text)| HeadingElement {
                level: *level,
                text: text.to_string(),
            })
            .collect()
    }

    /// Bare page with only a URL and a word count.
    pub fn canonical(url: &str, words: u64) -> CanonicalPage {
        canonicalize(&PageRecord {
            url: url.into(),
            word_count: Some(words),
            ..Default::default()
        })
    }

    pub fn page_with_headings(url: &str, items: &[(u8, &str)]) -> CanonicalPage {
        canonicalize(&page_record_with_headings(url, items))
    }

    pub fn page_with_keywords(url: &str, entries: &[(&str, f64)]) -> CanonicalPage {
        canonicalize(&page_record_with_keywords(url, entries))
    }

    pub fn technical_page(url: &str, mobile: bool, load_time: f64, schema: bool) -> CanonicalPage {
        canonicalize(&PageRecord {
            url: url.into(),
            mobile_optimized: Some(mobile),
            load_time: Some(load_time),
            schema_markup: Some(schema),
            ..Default::default()
        })
    }

    pub fn page_with_content(url: &str, html: &str) -> CanonicalPage {
        canonicalize(&PageRecord {
            url: url.into(),
            content: Some(html.into()),
            ..Default::default()
        })
    }

    /// `count` blog pages of `words` words each, identical apart from the URL.
    pub fn content_pages(count: usize, words: u64) -> Vec<CanonicalPage> {
        (0..count)
            .map(|i| canonical(&format!("https://example.com/articles/{}", i), words))
            .collect()
    }

    pub fn page_record_with_headings(url: &str, items: &[(u8, &str)]) -> PageRecord {
        PageRecord {
            url: url.into(),
            headings: headings(items),
            ..Default::default()
        }
    }

    pub fn page_record_with_keywords(url: &str, entries: &[(&str, f64)]) -> PageRecord {
        PageRecord {
            url: url.into(),
            keyword_density: entries
                .iter()
                .map(|(keyword, density)| KeywordDensity {
                    keyword: keyword.to_string(),
                    density: *density,
                    count: (*density * 10.0).round() as u32,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn normalized(domain: &str, pages: Vec<PageRecord>) -> NormalizedSnapshot {
        NormalizedSnapshot::from_snapshot(&AnalysisSnapshot::new(domain, pages))
            .expect("fixture snapshot is valid")
    }

    /// One bare page per entry, each with the given word count.
    pub fn site_with_word_counts(domain: &str, word_counts: &[u64]) -> AnalysisSnapshot {
        let pages = word_counts
            .iter()
            .enumerate()
            .map(|(i, words)| PageRecord {
                url: format!("https://{}/articles/{}", domain, i),
                word_count: Some(*words),
                ..Default::default()
            })
            .collect();
        AnalysisSnapshot::new(domain, pages)
    }

    /// A fully populated page as the crawler would report it.
    pub fn rich_page(domain: &str, index: usize) -> PageRecord {
        let section = SECTIONS[index % SECTIONS.len()];
        let topic = format!("{} topic{}", section, index);
        let h1 = format!("All about {}", topic);
        PageRecord {
            url: format!("https://{}/{}/topic{}", domain, section, index),
            title: Some(format!("Complete guide to {} for busy teams", topic)),
            meta_description: Some(format!(
                "Everything you need to know about {}, with worked examples, checklists and answers to common questions.",
                topic
            )),
            word_count: Some(600 + 50 * index as u64),
            headings: headings(&[(1, h1.as_str()), (2, "Getting started"), (2, "Common mistakes")]),
            images: vec![
                ImageElement {
                    src: format!("/img/{}.png", index),
                    alt: Some(format!("Diagram of {}", topic)),
                },
                ImageElement {
                    src: format!("/img/{}-b.png", index),
                    alt: None,
                },
            ],
            internal_links: Some(4 + index as u32 % 5),
            keyword_density: vec![
                KeywordDensity {
                    keyword: section.to_string(),
                    density: 1.4,
                    count: 8,
                },
                KeywordDensity {
                    keyword: format!("{} best practices guide", section),
                    density: 0.7,
                    count: 4,
                },
            ],
            schema_markup: Some(index % 2 == 0),
            load_time: Some(1.2 + 0.1 * (index % 4) as f64),
            mobile_optimized: Some(true),
            content: Some(format!(
                "<h1>All about {topic}</h1>\
                 <p>This guide walks through {topic} one step at a time for new readers.</p>\
                 <p>Each section ends with a short checklist you can reuse on your own site.</p>\
                 <p>When you are ready, get started with the template linked below this paragraph.</p>\
                 <ul><li>Plan</li><li>Write</li><li>Review</li></ul>",
                topic = topic
            )),
            last_modified: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        }
    }

    pub fn snapshot_with_pages(domain: &str, count: usize) -> AnalysisSnapshot {
        let mut snapshot =
            AnalysisSnapshot::new(domain, (0..count).map(|i| rich_page(domain, i)).collect());
        snapshot.crawled_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        snapshot
    }

    pub fn metrics_with(entries: &[(MetricKind, MetricComparison)]) -> ComparisonMetrics {
        entries.iter().cloned().collect()
    }

    pub fn comparable_strategies() -> StrategyComparison {
        let analysis = StrategyAnalysis {
            main_approach: "balanced".into(),
            competitor_approach: "balanced".into(),
            effectiveness: Effectiveness::Comparable,
            recommendations: vec![],
        };
        StrategyComparison {
            content: analysis.clone(),
            keyword: analysis.clone(),
            technical: analysis.clone(),
            ux: analysis,
        }
    }

    /// The verdict the other side would get.
    pub fn swap_effectiveness(effectiveness: Effectiveness) -> Effectiveness {
        match effectiveness {
            Effectiveness::Superior => Effectiveness::Inferior,
            Effectiveness::Inferior => Effectiveness::Superior,
            Effectiveness::Comparable => Effectiveness::Comparable,
        }
    }

    pub fn gemini_settings(base_url: &str) -> GeminiSettings {
        GeminiSettings {
            api_key: "test-key".into(),
            model: "gemini-test".into(),
            base_url: base_url.into(),
            persona: "You are a terse SEO analyst.".into(),
        }
    }
}

/// Helper assertions for tests
pub mod assertions {
    use crate::domain::results::CompetitorInsight;

    /// Checks if insights contain one with the given category
    pub fn has_insight(insights: &[CompetitorInsight], category: &str) -> bool {
        insights.iter().any(|i| i.category == category)
    }

    /// Asserts that a result contains an insight of the given category
    #[macro_export]
    macro_rules! assert_has_insight {
        ($insights:expr, $category:expr) => {
            assert!(
                $crate::test_utils::assertions::has_insight($insights, $category),
                "Expected to find insight '{}' but it was not present",
                $category
            );
        };
    }

    /// Asserts that a result does NOT contain an insight of the given category
    #[macro_export]
    macro_rules! assert_no_insight {
        ($insights:expr, $category:expr) => {
            assert!(
                !$crate::test_utils::assertions::has_insight($insights, $category),
                "Expected NOT to find insight '{}' but it was present",
                $category
            );
        };
    }
}
