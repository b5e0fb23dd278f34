//! Topic, keyword and content-volume coverage diff between the two sites.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::domain::models::NormalizedSnapshot;
use crate::domain::results::{ContentGapAnalysis, ContentVolumeGap};
use crate::service::profile::content::extract_topics;
use crate::service::profile::keyword::keyword_densities;
use crate::service::profile::profile_content;

/// Competitor topics considered when diffing coverage. Main's topics are never capped.
pub const GAP_TOPIC_LIMIT: usize = 200;
/// Share of a competitor topic's words main must already use for the topic to count as covered.
pub const TOPIC_OVERLAP_RATIO: f64 = 0.6;
/// Competitor keywords below this average density (percent) are not worth chasing.
pub const OPPORTUNITY_MIN_DENSITY: f64 = 0.5;
pub const MAX_OPPORTUNITY_KEYWORDS: usize = 20;
/// Shared keywords where main's density is under this fraction of the competitor's.
pub const UNDER_OPTIMIZED_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentGapAnalyzer;

impl ContentGapAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_gaps(
        &self,
        main: &NormalizedSnapshot,
        competitor: &NormalizedSnapshot,
    ) -> ContentGapAnalysis {
        let gaps = ContentGapAnalysis {
            missing_topics: missing_topics(main, competitor),
            under_optimized_areas: under_optimized_keywords(main, competitor),
            opportunity_keywords: opportunity_keywords(main, competitor),
            content_volume_gaps: content_volume_gaps(main, competitor),
        };

        debug!(
            missing_topics = gaps.missing_topics.len(),
            opportunity_keywords = gaps.opportunity_keywords.len(),
            "content gaps computed"
        );
        gaps
    }
}

fn missing_topics(main: &NormalizedSnapshot, competitor: &NormalizedSnapshot) -> Vec<String> {
    let main_topics = extract_topics(&main.pages, usize::MAX);
    let main_words: Vec<HashSet<&str>> = main_topics
        .iter()
        .map(|t| t.split_whitespace().collect())
        .collect();

    extract_topics(&competitor.pages, GAP_TOPIC_LIMIT)
        .into_iter()
        .filter(|topic| !is_covered(topic, &main_topics, &main_words))
        .collect()
}

fn is_covered(topic: &str, main_topics: &[String], main_words: &[HashSet<&str>]) -> bool {
    if main_topics.iter().any(|t| t == topic) {
        return true;
    }

    let words: HashSet<&str> = topic.split_whitespace().collect();
    if words.is_empty() {
        return true;
    }
    main_words.iter().any(|candidate| {
        let shared = words.intersection(candidate).count();
        shared as f64 / words.len() as f64 >= TOPIC_OVERLAP_RATIO
    })
}

fn opportunity_keywords(main: &NormalizedSnapshot, competitor: &NormalizedSnapshot) -> Vec<String> {
    let ours = keyword_densities(&main.pages);
    let mut candidates: Vec<(String, f64)> = keyword_densities(&competitor.pages)
        .into_iter()
        .filter(|(keyword, density)| {
            *density >= OPPORTUNITY_MIN_DENSITY && !ours.contains_key(keyword)
        })
        .collect();

    candidates.sort_by(by_density_desc);
    candidates
        .into_iter()
        .take(MAX_OPPORTUNITY_KEYWORDS)
        .map(|(keyword, _)| keyword)
        .collect()
}

fn under_optimized_keywords(
    main: &NormalizedSnapshot,
    competitor: &NormalizedSnapshot,
) -> Vec<String> {
    let ours = keyword_densities(&main.pages);
    let mut candidates: Vec<(String, f64)> = keyword_densities(&competitor.pages)
        .into_iter()
        .filter(|(keyword, theirs)| {
            ours.get(keyword)
                .is_some_and(|mine| *mine < theirs * UNDER_OPTIMIZED_RATIO)
        })
        .collect();

    candidates.sort_by(by_density_desc);
    candidates.into_iter().map(|(keyword, _)| keyword).collect()
}

fn content_volume_gaps(
    main: &NormalizedSnapshot,
    competitor: &NormalizedSnapshot,
) -> Vec<ContentVolumeGap> {
    let ours = profile_content(&main.pages);
    let theirs = profile_content(&competitor.pages);

    let areas: BTreeSet<_> = ours
        .content_types
        .keys()
        .chain(theirs.content_types.keys())
        .copied()
        .collect();

    areas
        .into_iter()
        .map(|area| {
            let main_count = ours.type_count(area);
            let competitor_count = theirs.type_count(area);
            ContentVolumeGap {
                area,
                main_count,
                competitor_count,
                gap: competitor_count as i64 - main_count as i64,
            }
        })
        .collect()
}

fn by_density_desc(a: &(String, f64), b: &(String, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::results::ContentType;
    use crate::test_utils::fixtures::{normalized, page_record_with_headings, page_record_with_keywords};

    #[test]
    fn missing_topics_are_competitor_only_topics() {
        let main = normalized(
            "main.com",
            vec![page_record_with_headings("https://main.com/", &[(1, "Trail running shoes")])],
        );
        let competitor = normalized(
            "rival.com",
            vec![
                page_record_with_headings("https://rival.com/", &[(1, "Trail running shoes")]),
                page_record_with_headings("https://rival.com/x", &[(2, "Marathon training plans")]),
            ],
        );

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        assert_eq!(gaps.missing_topics, vec!["marathon training plans".to_string()]);
    }

    #[test]
    fn partial_word_overlap_counts_as_covered() {
        let main = normalized(
            "main.com",
            vec![page_record_with_headings("https://main.com/", &[(1, "Running shoes for trail")])],
        );
        let competitor = normalized(
            "rival.com",
            vec![page_record_with_headings("https://rival.com/", &[(1, "Trail running shoes")])],
        );

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        assert!(gaps.missing_topics.is_empty());
    }

    #[test]
    fn main_topics_past_the_competitor_limit_still_count_as_covered() {
        let main_pages: Vec<_> = (0..GAP_TOPIC_LIMIT + 50)
            .map(|i| {
                let h1 = format!("alpha{i} bravo{i} charlie{i}");
                page_record_with_headings(&format!("https://main.com/p{i}"), &[(1, h1.as_str())])
            })
            .collect();
        let main = normalized("main.com", main_pages);
        let competitor = normalized(
            "rival.com",
            vec![page_record_with_headings(
                "https://rival.com/",
                &[(1, "alpha230 bravo230 charlie230")],
            )],
        );

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        assert!(gaps.missing_topics.is_empty(), "{:?}", gaps.missing_topics);
    }

    #[test]
    fn keyword_opportunities_and_under_optimized_areas() {
        let main = normalized(
            "main.com",
            vec![page_record_with_keywords("https://main.com/", &[("running shoes", 0.4)])],
        );
        let competitor = normalized(
            "rival.com",
            vec![page_record_with_keywords(
                "https://rival.com/",
                &[("running shoes", 1.5), ("trail shoes", 2.0), ("socks", 0.9), ("laces", 0.1)],
            )],
        );

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        assert_eq!(gaps.opportunity_keywords, vec!["trail shoes".to_string(), "socks".to_string()]);
        assert_eq!(gaps.under_optimized_areas, vec!["running shoes".to_string()]);
    }

    #[test]
    fn content_volume_gaps_pair_buckets() {
        let main = normalized("main.com", vec![page_record_with_headings("https://main.com/", &[])]);
        let competitor = normalized(
            "rival.com",
            vec![
                page_record_with_headings("https://rival.com/", &[]),
                page_record_with_headings("https://rival.com/blog/a", &[]),
                page_record_with_headings("https://rival.com/blog/b", &[]),
            ],
        );

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        let blog = gaps
            .content_volume_gaps
            .iter()
            .find(|g| g.area == ContentType::Blog)
            .expect("blog bucket");
        assert_eq!((blog.main_count, blog.competitor_count, blog.gap), (0, 2, 2));

        let home = gaps
            .content_volume_gaps
            .iter()
            .find(|g| g.area == ContentType::Homepage)
            .expect("homepage bucket");
        assert_eq!(home.gap, 0);
    }

    #[test]
    fn identical_snapshots_have_no_gaps() {
        let pages = vec![page_record_with_keywords("https://main.com/guide", &[("seo", 1.0)])];
        let main = normalized("main.com", pages.clone());
        let competitor = normalized("main.com", pages);

        let gaps = ContentGapAnalyzer.analyze_gaps(&main, &competitor);
        assert!(gaps.missing_topics.is_empty());
        assert!(gaps.opportunity_keywords.is_empty());
        assert!(gaps.under_optimized_areas.is_empty());
        assert!(gaps.content_volume_gaps.iter().all(|g| g.gap == 0));
    }
}
