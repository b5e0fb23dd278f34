//! Content profile: depth, content-type mix, topical diversity, media.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::domain::models::{divisor, CanonicalPage};
use crate::domain::results::ContentType;

/// Upper bound on distinct topics counted for diversity.
pub const TOPIC_LIMIT: usize = 50;

const MIN_TOPIC_LEN: usize = 3;

/// Path segments that carry no topical meaning.
const IGNORED_SEGMENTS: &[&str] = &["www", "index", "home", "page", "en", "amp", "html", "php"];

/// First match wins. Path segments are checked before titles. Keywords match
/// whole words (plurals included); hyphenated keywords match consecutive words.
const CONTENT_TYPE_KEYWORDS: &[(ContentType, &[&str])] = &[
    (ContentType::Product, &["product", "shop", "store", "pricing", "buy", "cart"]),
    (ContentType::Service, &["service", "solution", "consulting"]),
    (ContentType::Blog, &["blog", "news", "article", "post", "insight"]),
    (ContentType::Resource, &["resource", "guide", "docs", "learn", "whitepaper", "ebook", "tutorial", "case-study"]),
    (ContentType::Support, &["support", "help", "faq", "contact", "kb"]),
    (ContentType::About, &["about", "team", "company", "career"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentDepth {
    Comprehensive,
    Substantial,
    Moderate,
    Shallow,
}

impl ContentDepth {
    pub fn from_word_count(avg_words: f64) -> Self {
        if avg_words >= 1000.0 {
            ContentDepth::Comprehensive
        } else if avg_words >= 500.0 {
            ContentDepth::Substantial
        } else if avg_words >= 200.0 {
            ContentDepth::Moderate
        } else {
            ContentDepth::Shallow
        }
    }

    /// comprehensive = 4 ... shallow = 1
    pub fn rank(&self) -> i32 {
        match self {
            ContentDepth::Comprehensive => 4,
            ContentDepth::Substantial => 3,
            ContentDepth::Moderate => 2,
            ContentDepth::Shallow => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentDepth::Comprehensive => "comprehensive",
            ContentDepth::Substantial => "substantial",
            ContentDepth::Moderate => "moderate",
            ContentDepth::Shallow => "shallow",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentProfile {
    pub page_count: usize,
    pub avg_word_count: f64,
    pub content_types: BTreeMap<ContentType, usize>,
    pub content_depth: ContentDepth,
    pub topical_diversity: usize,
    pub media_richness: f64,
}

impl ContentProfile {
    /// Number of content types with at least one page.
    pub fn type_variety(&self) -> usize {
        self.content_types.values().filter(|&&n| n > 0).count()
    }

    pub fn type_count(&self, content_type: ContentType) -> usize {
        self.content_types.get(&content_type).copied().unwrap_or(0)
    }

    /// 0-100 blend of depth, topical diversity and media richness.
    pub fn quality_score(&self) -> f64 {
        if self.page_count == 0 {
            return 0.0;
        }
        let depth = self.content_depth.rank() as f64 / 4.0 * 50.0;
        let topics = (self.topical_diversity as f64 / TOPIC_LIMIT as f64).min(1.0) * 30.0;
        let media = (self.media_richness / 3.0).min(1.0) * 20.0;
        depth + topics + media
    }
}

pub fn profile_content(pages: &[CanonicalPage]) -> ContentProfile {
    let n = divisor(pages);
    let avg_word_count = pages.iter().map(|p| p.word_count as f64).sum::<f64>() / n;
    let media_richness = pages.iter().map(|p| p.media_count() as f64).sum::<f64>() / n;

    let mut content_types = BTreeMap::new();
    for page in pages {
        *content_types.entry(classify_page(page)).or_insert(0) += 1;
    }

    ContentProfile {
        page_count: pages.len(),
        avg_word_count,
        content_types,
        content_depth: ContentDepth::from_word_count(avg_word_count),
        topical_diversity: extract_topics(pages, TOPIC_LIMIT).len(),
        media_richness,
    }
}

/// Assigns exactly one content type to a page.
pub fn classify_page(page: &CanonicalPage) -> ContentType {
    let path = url_path(&page.url).to_lowercase();
    let segments: Vec<Vec<&str>> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(words)
        .collect();
    if segments.is_empty() {
        return ContentType::Homepage;
    }

    for (content_type, keywords) in CONTENT_TYPE_KEYWORDS {
        if segments
            .iter()
            .any(|segment| keywords.iter().any(|k| contains_keyword(segment, k)))
        {
            return *content_type;
        }
    }

    let title = page.title.to_lowercase();
    let title_words = words(&title);
    for (content_type, keywords) in CONTENT_TYPE_KEYWORDS {
        if keywords.iter().any(|k| contains_keyword(&title_words, k)) {
            return *content_type;
        }
    }

    ContentType::Landing
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn contains_keyword(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split('-').collect();
    words.windows(parts.len()).any(|window| {
        window
            .iter()
            .zip(&parts)
            .all(|(word, part)| word_matches(word, part))
    })
}

/// Exact word or its plural: `guide`/`guides`, `study`/`studies`.
fn word_matches(word: &str, keyword: &str) -> bool {
    if word == keyword || word.strip_suffix('s') == Some(keyword) {
        return true;
    }
    match (word.strip_suffix("ies"), keyword.strip_suffix('y')) {
        (Some(stem), Some(root)) => stem == root,
        _ => false,
    }
}

/// Normalized topics from H1/H2 text and URL path segments, in first-seen order.
pub fn extract_topics(pages: &[CanonicalPage], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    let candidates = pages.iter().flat_map(|page| {
        let headings = page
            .headings
            .iter()
            .filter(|h| h.level == 1 || h.level == 2)
            .map(|h| h.text.clone());
        let segments = url_path(&page.url)
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        headings.chain(segments)
    });

    for raw in candidates {
        if topics.len() >= limit {
            break;
        }
        if let Some(topic) = normalize_topic(&raw) {
            if seen.insert(topic.clone()) {
                topics.push(topic);
            }
        }
    }
    topics
}

/// Lowercases, splits on non-alphanumerics and drops numeric or filler words.
pub fn normalize_topic(raw: &str) -> Option<String> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATOR.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());

    let lowered = raw.to_lowercase();
    let words: Vec<&str> = re
        .split(&lowered)
        .filter(|w| !w.is_empty())
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| !IGNORED_SEGMENTS.contains(w))
        .collect();

    let topic = words.join(" ");
    if topic.len() < MIN_TOPIC_LEN {
        None
    } else {
        Some(topic)
    }
}

pub(crate) fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative or malformed URLs: treat everything after the first
        // single slash as the path.
        Err(_) => {
            let without_scheme = url.split("://").last().unwrap_or(url);
            match without_scheme.find('/') {
                Some(idx) => without_scheme[idx..].to_string(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{canonical, page_with_headings};

    #[test]
    fn depth_bucket_boundaries() {
        let cases = [
            (1000.0, ContentDepth::Comprehensive),
            (999.0, ContentDepth::Substantial),
            (500.0, ContentDepth::Substantial),
            (499.0, ContentDepth::Moderate),
            (200.0, ContentDepth::Moderate),
            (199.0, ContentDepth::Shallow),
        ];
        for (words, expected) in cases {
            assert_eq!(ContentDepth::from_word_count(words), expected, "{} words", words);
        }
    }

    #[test]
    fn depth_rank_is_monotonic() {
        let mut previous = 0;
        for words in (0..2000).step_by(50) {
            let rank = ContentDepth::from_word_count(words as f64).rank();
            assert!(rank >= previous);
            previous = rank;
        }
    }

    #[test]
    fn classify_by_url_then_title() {
        let home = canonical("https://example.com/", 100);
        assert_eq!(classify_page(&home), ContentType::Homepage);

        let blog = canonical("https://example.com/blog/how-to-run", 100);
        assert_eq!(classify_page(&blog), ContentType::Blog);

        let mut titled = canonical("https://example.com/x1", 100);
        titled.title = "Frequently asked questions | Help".into();
        assert_eq!(classify_page(&titled), ContentType::Support);

        let landing = canonical("https://example.com/spring-campaign", 100);
        assert_eq!(classify_page(&landing), ContentType::Landing);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let posters = canonical("https://example.com/posters", 100);
        assert_eq!(classify_page(&posters), ContentType::Landing);

        let helpers = canonical("https://example.com/helpers", 100);
        assert_eq!(classify_page(&helpers), ContentType::Landing);

        let kbd = canonical("https://example.com/kbd-layouts", 100);
        assert_eq!(classify_page(&kbd), ContentType::Landing);

        let kb = canonical("https://example.com/kb/reset-password", 100);
        assert_eq!(classify_page(&kb), ContentType::Support);

        let studies = canonical("https://example.com/customer-case-studies", 100);
        assert_eq!(classify_page(&studies), ContentType::Resource);

        let mut titled = canonical("https://example.com/x2", 100);
        titled.title = "Movie posters for sale".into();
        assert_eq!(classify_page(&titled), ContentType::Landing);
    }

    #[test]
    fn every_page_lands_in_exactly_one_bucket() {
        let pages: Vec<_> = [
            "https://example.com/",
            "https://example.com/products/shoe",
            "https://example.com/blog/a",
            "https://example.com/about-us",
            "https://example.com/whatever",
        ]
        .iter()
        .map(|u| canonical(u, 300))
        .collect();

        let profile = profile_content(&pages);
        assert_eq!(profile.content_types.values().sum::<usize>(), pages.len());
        assert_eq!(profile.type_variety(), 5);
    }

    #[test]
    fn topics_come_from_h1_h2_and_segments() {
        let page = page_with_headings(
            "https://example.com/guides/trail-running",
            &[(1, "Trail Running Basics"), (2, "Choosing Shoes"), (3, "Ignored H3")],
        );
        let topics = extract_topics(&[page], TOPIC_LIMIT);
        assert_eq!(
            topics,
            vec!["trail running basics", "choosing shoes", "guides", "trail running"]
        );
    }

    #[test]
    fn normalize_topic_drops_noise() {
        assert_eq!(normalize_topic("2023"), None);
        assert_eq!(normalize_topic("en"), None);
        assert_eq!(normalize_topic("Index.html"), None);
        assert_eq!(normalize_topic("SEO_Tips-2024"), Some("seo tips".into()));
    }

    #[test]
    fn topical_diversity_is_capped() {
        let pages: Vec<_> = (0..500)
            .map(|i| {
                let url = format!("https://example.com/topic{}/sub{}", i, i);
                let h1 = format!("Heading{} gamma", i);
                let h2 = format!("Second{} delta", i);
                page_with_headings(&url, &[(1, h1.as_str()), (2, h2.as_str())])
            })
            .collect();

        let profile = profile_content(&pages);
        assert_eq!(profile.topical_diversity, TOPIC_LIMIT);
    }

    #[test]
    fn empty_site_profiles_to_zero() {
        let profile = profile_content(&[]);
        assert_eq!(profile.page_count, 0);
        assert_eq!(profile.avg_word_count, 0.0);
        assert_eq!(profile.media_richness, 0.0);
        assert_eq!(profile.topical_diversity, 0);
        assert!(profile.content_types.is_empty());
        assert_eq!(profile.quality_score(), 0.0);
    }
}
