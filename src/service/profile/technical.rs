//! Technical profile: transport, mobile, speed, structured data, URLs, images.

use url::Url;

use crate::domain::models::{divisor, CanonicalPage};

/// Longest path segment a clean URL may have.
pub const MAX_CLEAN_SEGMENT_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalProfile {
    pub page_count: usize,
    pub https_percentage: f64,
    pub mobile_percentage: f64,
    /// Seconds.
    pub avg_load_time: f64,
    pub structured_data_percentage: f64,
    pub clean_url_percentage: f64,
    /// Mean alt-text coverage over pages that have images.
    pub image_optimization_percentage: f64,
}

impl TechnicalProfile {
    /// 100 at or under one second, minus 20 per extra second.
    pub fn load_time_score(&self) -> f64 {
        if self.page_count == 0 {
            return 0.0;
        }
        (100.0 - (self.avg_load_time - 1.0).max(0.0) * 20.0).clamp(0.0, 100.0)
    }

    /// 0-100 mean of every technical dimension.
    pub fn technical_score(&self) -> f64 {
        let parts = [
            self.https_percentage,
            self.mobile_percentage,
            self.structured_data_percentage,
            self.clean_url_percentage,
            self.image_optimization_percentage,
            self.load_time_score(),
        ];
        parts.iter().sum::<f64>() / parts.len() as f64
    }
}

pub fn profile_technical(pages: &[CanonicalPage]) -> TechnicalProfile {
    let n = divisor(pages);
    let image_pages: Vec<f64> = pages
        .iter()
        .filter(|p| !p.images.is_empty())
        .map(|p| p.images_with_alt() as f64 / p.images.len() as f64 * 100.0)
        .collect();

    TechnicalProfile {
        page_count: pages.len(),
        https_percentage: share(pages, |p| p.is_https),
        mobile_percentage: share(pages, |p| p.mobile_optimized),
        avg_load_time: pages.iter().map(|p| p.load_time).sum::<f64>() / n,
        structured_data_percentage: share(pages, |p| p.has_schema_markup),
        clean_url_percentage: share(pages, |p| is_clean_url(&p.url)),
        image_optimization_percentage: image_pages.iter().sum::<f64>()
            / image_pages.len().max(1) as f64,
    }
}

/// Percent of pages matching `pred`.
pub(crate) fn share(pages: &[CanonicalPage], pred: impl Fn(&CanonicalPage) -> bool) -> f64 {
    pages.iter().filter(|p| pred(p)).count() as f64 / divisor(pages) * 100.0
}

/// No query string, no percent-encoding, and no path segment over 50 chars.
pub fn is_clean_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if parsed.query().is_some() || parsed.path().contains('%') {
        return false;
    }
    parsed
        .path()
        .split('/')
        .all(|segment| segment.len() <= MAX_CLEAN_SEGMENT_LEN)
}
