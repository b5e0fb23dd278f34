//! Snapshot entities handed over by the crawler, and their canonical form.
//!
//! Upstream records are partial by nature: every optional field may be absent.
//! `CanonicalPage::from_record` is the only place where absence is turned into
//! zero/empty values, so profilers can assume totality.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AnalysisError, Result};
use crate::extractor::page_extractor::{ContentSignals, PageExtractor};

// ====== Detailed Page Elements ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingElement {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageElement {
    pub fn has_alt(&self) -> bool {
        self.alt.as_deref().is_some_and(|alt| !alt.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordDensity {
    pub keyword: String,
    /// Share of the page's words, in percent.
    pub density: f64,
    pub count: u32,
}

// ====== Raw crawler input ======

/// Per-page facts as produced by the crawler. Everything but the URL is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRecord {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub word_count: Option<u64>,
    pub headings: Vec<HeadingElement>,
    pub images: Vec<ImageElement>,
    pub internal_links: Option<u32>,
    pub keyword_density: Vec<KeywordDensity>,
    pub schema_markup: Option<bool>,
    /// Seconds.
    pub load_time: Option<f64>,
    pub mobile_optimized: Option<bool>,
    /// Body HTML (or plain text) of the page.
    pub content: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Audit aggregates the upstream auditor may already have computed.
/// Absent fields are derived from the pages instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteMetrics {
    pub title_optimization: Option<f64>,
    pub description_optimization: Option<f64>,
    pub headings_optimization: Option<f64>,
    pub images_optimization: Option<f64>,
    pub critical_issues: Option<f64>,
}

/// One site's crawl result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSnapshot {
    pub domain: String,
    pub pages: Vec<PageRecord>,
    pub metrics: Option<SiteMetrics>,
    pub crawled_at: Option<DateTime<Utc>>,
}

impl AnalysisSnapshot {
    pub fn new(domain: impl Into<String>, pages: Vec<PageRecord>) -> Self {
        Self {
            domain: domain.into(),
            pages,
            ..Default::default()
        }
    }
}

// ====== Canonical form ======

/// Fully populated page, the only shape profilers ever see.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPage {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub word_count: u64,
    pub headings: Vec<HeadingElement>,
    pub images: Vec<ImageElement>,
    pub internal_links: u32,
    pub keywords: Vec<KeywordDensity>,
    pub has_schema_markup: bool,
    pub load_time: f64,
    pub mobile_optimized: bool,
    pub is_https: bool,
    pub signals: ContentSignals,
    pub last_modified: Option<DateTime<Utc>>,
}

impl CanonicalPage {
    /// Normalizes a raw record. Fails only on values that cannot be averaged
    /// (non-finite or negative numbers).
    pub fn from_record(record: &PageRecord) -> Result<Self> {
        let load_time = record.load_time.unwrap_or(0.0);
        if !load_time.is_finite() || load_time < 0.0 {
            return Err(AnalysisError::invalid_page(
                &record.url,
                format!("load time must be a non-negative number, got {}", load_time),
            ));
        }

        let mut keywords = Vec::with_capacity(record.keyword_density.len());
        for entry in &record.keyword_density {
            if !entry.density.is_finite() || entry.density < 0.0 {
                return Err(AnalysisError::invalid_page(
                    &record.url,
                    format!("density for '{}' is {}", entry.keyword, entry.density),
                ));
            }
            let keyword = normalize_keyword(&entry.keyword);
            if keyword.is_empty() {
                continue;
            }
            keywords.push(KeywordDensity {
                keyword,
                density: entry.density,
                count: entry.count,
            });
        }

        let signals = record
            .content
            .as_deref()
            .map(PageExtractor::extract_signals)
            .unwrap_or_default();

        let word_count = record
            .word_count
            .unwrap_or_else(|| signals.text.split_whitespace().count() as u64);

        Ok(Self {
            url: record.url.clone(),
            title: record.title.clone().unwrap_or_default().trim().to_string(),
            meta_description: record
                .meta_description
                .clone()
                .unwrap_or_default()
                .trim()
                .to_string(),
            word_count,
            headings: record.headings.clone(),
            images: record.images.clone(),
            internal_links: record.internal_links.unwrap_or(0),
            keywords,
            has_schema_markup: record.schema_markup.unwrap_or(false),
            load_time,
            mobile_optimized: record.mobile_optimized.unwrap_or(false),
            is_https: is_https(&record.url),
            signals,
            last_modified: record.last_modified,
        })
    }

    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.level == 1).count()
    }

    pub fn images_with_alt(&self) -> usize {
        self.images.iter().filter(|img| img.has_alt()).count()
    }

    /// Images plus embedded videos.
    pub fn media_count(&self) -> usize {
        self.images.len() + self.signals.videos
    }
}

/// A snapshot whose pages went through `CanonicalPage::from_record`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSnapshot {
    pub domain: String,
    pub pages: Vec<CanonicalPage>,
    pub metrics: SiteMetrics,
    pub crawled_at: Option<DateTime<Utc>>,
}

impl NormalizedSnapshot {
    pub fn from_snapshot(snapshot: &AnalysisSnapshot) -> Result<Self> {
        let pages = snapshot
            .pages
            .iter()
            .map(CanonicalPage::from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            domain: snapshot.domain.clone(),
            pages,
            metrics: snapshot.metrics.clone().unwrap_or_default(),
            crawled_at: snapshot.crawled_at,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Page count used as a divisor; never zero.
pub fn divisor(pages: &[CanonicalPage]) -> f64 {
    pages.len().max(1) as f64
}

pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_https(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_zero() {
        let record = PageRecord {
            url: "http://example.com/about".into(),
            ..Default::default()
        };

        let page = CanonicalPage::from_record(&record).unwrap();
        assert_eq!(page.word_count, 0);
        assert_eq!(page.internal_links, 0);
        assert_eq!(page.load_time, 0.0);
        assert!(!page.mobile_optimized);
        assert!(!page.has_schema_markup);
        assert!(!page.is_https);
        assert!(page.title.is_empty());
    }

    #[test]
    fn test_https_is_derived_from_scheme() {
        let record = PageRecord {
            url: "https://example.com/".into(),
            ..Default::default()
        };
        assert!(CanonicalPage::from_record(&record).unwrap().is_https);

        let unparsable = PageRecord {
            url: "not a url".into(),
            ..Default::default()
        };
        assert!(!CanonicalPage::from_record(&unparsable).unwrap().is_https);
    }

    #[test]
    fn test_nan_load_time_is_rejected() {
        let record = PageRecord {
            url: "https://example.com/slow".into(),
            load_time: Some(f64::NAN),
            ..Default::default()
        };

        let err = CanonicalPage::from_record(&record).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPage { .. }));
    }

    #[test]
    fn test_keywords_are_normalized_and_blank_ones_dropped() {
        let record = PageRecord {
            url: "https://example.com/".into(),
            keyword_density: vec![
                KeywordDensity { keyword: "  Running   Shoes ".into(), density: 1.2, count: 4 },
                KeywordDensity { keyword: "   ".into(), density: 0.4, count: 1 },
            ],
            ..Default::default()
        };

        let page = CanonicalPage::from_record(&record).unwrap();
        assert_eq!(page.keywords.len(), 1);
        assert_eq!(page.keywords[0].keyword, "running shoes");
    }

    #[test]
    fn test_word_count_falls_back_to_content() {
        let record = PageRecord {
            url: "https://example.com/".into(),
            content: Some("<p>one two three four</p>".into()),
            ..Default::default()
        };

        let page = CanonicalPage::from_record(&record).unwrap();
        assert_eq!(page.word_count, 4);
        assert_eq!(page.signals.paragraphs, 1);
    }

    #[test]
    fn test_snapshot_deserializes_camel_case_with_missing_fields() {
        let json = r#"{
            "domain": "example.com",
            "pages": [{"url": "https://example.com/", "wordCount": 320, "mobileOptimized": true}],
            "metrics": {"criticalIssues": 2}
        }"#;

        let snapshot: AnalysisSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.pages[0].word_count, Some(320));
        assert_eq!(snapshot.pages[0].mobile_optimized, Some(true));
        assert!(snapshot.pages[0].headings.is_empty());
        assert_eq!(snapshot.metrics.unwrap().critical_issues, Some(2.0));
    }

    #[test]
    fn test_divisor_never_zero() {
        assert_eq!(divisor(&[]), 1.0);
    }
}
