//! UX profile: readability, internal linking, structure and engagement.

use chrono::{DateTime, Duration, Utc};

use crate::domain::models::{divisor, CanonicalPage};
use crate::extractor::page_extractor::PageExtractor;

const CALL_TO_ACTION_PHRASES: &[&str] = &[
    "contact us",
    "get started",
    "sign up",
    "subscribe",
    "buy now",
    "add to cart",
    "request a demo",
    "book a",
    "free trial",
    "get a quote",
    "download",
    "learn more",
];

/// Content updated within this window of the crawl counts as fresh.
const FRESHNESS_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq)]
pub struct UxProfile {
    pub page_count: usize,
    /// 0-100, averaged over pages.
    pub readability_score: f64,
    pub avg_internal_links: f64,
    /// 0-100, averaged over pages.
    pub structure_score: f64,
    /// 0-100, averaged over pages.
    pub engagement_score: f64,
}

pub fn profile_ux(pages: &[CanonicalPage], crawled_at: Option<DateTime<Utc>>) -> UxProfile {
    let n = divisor(pages);
    let mean = |f: &dyn Fn(&CanonicalPage) -> f64| pages.iter().map(f).sum::<f64>() / n;

    UxProfile {
        page_count: pages.len(),
        readability_score: mean(&readability),
        avg_internal_links: mean(&|p: &CanonicalPage| p.internal_links as f64),
        structure_score: mean(&structure),
        engagement_score: mean(&|p: &CanonicalPage| engagement(p, crawled_at)),
    }
}

/// Bucketed from the average sentence length: 10-20 words reads best.
pub fn readability(page: &CanonicalPage) -> f64 {
    match PageExtractor::average_sentence_length(&page.signals.text) {
        Some(len) if (10.0..=20.0).contains(&len) => 100.0,
        Some(len) if (8.0..=25.0).contains(&len) => 70.0,
        _ => 30.0,
    }
}

pub fn structure(page: &CanonicalPage) -> f64 {
    let mut score = 0.0;
    if page.headings.len() >= 2 {
        score += 40.0;
    }
    if page.signals.paragraphs >= 3 {
        score += 30.0;
    }
    if page.signals.lists > 0 {
        score += 20.0;
    }
    if !page.images.is_empty() {
        score += 10.0;
    }
    score
}

pub fn engagement(page: &CanonicalPage, crawled_at: Option<DateTime<Utc>>) -> f64 {
    let text = page.signals.text.to_lowercase();
    let mut score: f64 = 0.0;

    if CALL_TO_ACTION_PHRASES.iter().any(|cta| text.contains(cta)) {
        score += 30.0;
    }
    if page.signals.forms > 0 {
        score += 20.0;
    }
    if page.signals.videos > 0 {
        score += 20.0;
    }
    if !page.images.is_empty() {
        score += 10.0;
    }
    if is_fresh(page.last_modified, crawled_at) {
        score += 20.0;
    }
    score.min(100.0)
}

fn is_fresh(last_modified: Option<DateTime<Utc>>, crawled_at: Option<DateTime<Utc>>) -> bool {
    match (last_modified, crawled_at) {
        (Some(modified), Some(crawled)) => {
            crawled.signed_duration_since(modified) <= Duration::days(FRESHNESS_WINDOW_DAYS)
        }
        _ => false,
    }
}
