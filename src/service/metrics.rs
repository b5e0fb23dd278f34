//! Per-site metric values fed to the comparator.
//!
//! Values the upstream auditor already reported (`SiteMetrics`) win; anything
//! missing is derived from the canonical pages with the same rules the page
//! auditor uses for its checks.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::domain::models::NormalizedSnapshot;
use crate::domain::results::MetricKind;
use crate::service::profile::technical::share;
use crate::service::profile::{profile_content, profile_technical};

const GOOD_TITLE_LEN: RangeInclusive<usize> = 30..=60;
const GOOD_DESCRIPTION_LEN: RangeInclusive<usize> = 70..=160;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteMetricValues {
    values: BTreeMap<MetricKind, f64>,
}

impl SiteMetricValues {
    pub fn from_snapshot(snapshot: &NormalizedSnapshot) -> Self {
        let pages = &snapshot.pages;
        let reported = &snapshot.metrics;

        let title = reported.title_optimization.unwrap_or_else(|| {
            share(pages, |p| GOOD_TITLE_LEN.contains(&p.title.chars().count()))
        });
        let description = reported.description_optimization.unwrap_or_else(|| {
            share(pages, |p| {
                GOOD_DESCRIPTION_LEN.contains(&p.meta_description.chars().count())
            })
        });
        let headings = reported
            .headings_optimization
            .unwrap_or_else(|| share(pages, |p| p.h1_count() == 1));
        let images = reported.images_optimization.unwrap_or_else(|| {
            let total: usize = pages.iter().map(|p| p.images.len()).sum();
            let with_alt: usize = pages.iter().map(|p| p.images_with_alt()).sum();
            if total == 0 {
                0.0
            } else {
                with_alt as f64 / total as f64 * 100.0
            }
        });
        // Missing title and missing H1 are the critical page issues.
        let critical = reported.critical_issues.unwrap_or_else(|| {
            let missing_title = pages.iter().filter(|p| p.title.is_empty()).count();
            let missing_h1 = pages.iter().filter(|p| p.h1_count() == 0).count();
            (missing_title + missing_h1) as f64
        });

        Self::default()
            .with(MetricKind::TitleOptimization, title)
            .with(MetricKind::DescriptionOptimization, description)
            .with(MetricKind::HeadingsOptimization, headings)
            .with(MetricKind::ImagesOptimization, images)
            .with(MetricKind::CriticalIssues, critical)
            .with(MetricKind::TechnicalScore, profile_technical(pages).technical_score())
            .with(MetricKind::ContentQuality, profile_content(pages).quality_score())
    }

    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        self.values.insert(kind, value);
        self
    }

    pub fn value(&self, kind: MetricKind) -> f64 {
        self.values.get(&kind).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AnalysisSnapshot, HeadingElement, PageRecord, SiteMetrics};

    fn normalized(snapshot: &AnalysisSnapshot) -> NormalizedSnapshot {
        NormalizedSnapshot::from_snapshot(snapshot).unwrap()
    }

    #[test]
    fn derives_optimization_shares_from_pages() {
        let good = PageRecord {
            url: "https://example.com/".into(),
            title: Some("A title that is comfortably long enough".into()),
            meta_description: Some("d".repeat(120)),
            headings: vec![HeadingElement { level: 1, text: "Welcome".into() }],
            ..Default::default()
        };
        let bad = PageRecord {
            url: "https://example.com/bad".into(),
            ..Default::default()
        };
        let snapshot = AnalysisSnapshot::new("example.com", vec![good, bad]);

        let values = SiteMetricValues::from_snapshot(&normalized(&snapshot));
        assert_eq!(values.value(MetricKind::TitleOptimization), 50.0);
        assert_eq!(values.value(MetricKind::DescriptionOptimization), 50.0);
        assert_eq!(values.value(MetricKind::HeadingsOptimization), 50.0);
        assert_eq!(values.value(MetricKind::ImagesOptimization), 0.0);
        // bad page: missing title + missing h1
        assert_eq!(values.value(MetricKind::CriticalIssues), 2.0);
    }

    #[test]
    fn reported_metrics_override_derived_ones() {
        let mut snapshot = AnalysisSnapshot::new("example.com", vec![]);
        snapshot.metrics = Some(SiteMetrics {
            critical_issues: Some(7.0),
            ..Default::default()
        });

        let values = SiteMetricValues::from_snapshot(&normalized(&snapshot));
        assert_eq!(values.value(MetricKind::CriticalIssues), 7.0);
        assert_eq!(values.value(MetricKind::TitleOptimization), 0.0);
    }
}
