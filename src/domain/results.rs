//! Comparison output types. Everything here is produced once per run and
//! handed to the caller; nothing is kept by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ====== Enums ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Main,
    Competitor,
    Neutral,
}

impl Advantage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advantage::Main => "main",
            Advantage::Competitor => "competitor",
            Advantage::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Critical,
    Important,
    Minor,
}

/// Which direction of a metric counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Higher is better.
    Optimization,
    /// Lower is better.
    Issues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    TitleOptimization,
    DescriptionOptimization,
    HeadingsOptimization,
    ImagesOptimization,
    CriticalIssues,
    TechnicalScore,
    ContentQuality,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::TitleOptimization,
        MetricKind::DescriptionOptimization,
        MetricKind::HeadingsOptimization,
        MetricKind::ImagesOptimization,
        MetricKind::CriticalIssues,
        MetricKind::TechnicalScore,
        MetricKind::ContentQuality,
    ];

    pub fn polarity(&self) -> Polarity {
        match self {
            MetricKind::CriticalIssues => Polarity::Issues,
            _ => Polarity::Optimization,
        }
    }

    /// Key used for insight categories and summary areas.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::TitleOptimization => "titleOptimization",
            MetricKind::DescriptionOptimization => "descriptionOptimization",
            MetricKind::HeadingsOptimization => "headingsOptimization",
            MetricKind::ImagesOptimization => "imagesOptimization",
            MetricKind::CriticalIssues => "criticalIssues",
            MetricKind::TechnicalScore => "technicalScore",
            MetricKind::ContentQuality => "contentQuality",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::TitleOptimization => "Title optimization",
            MetricKind::DescriptionOptimization => "Meta description optimization",
            MetricKind::HeadingsOptimization => "Heading structure",
            MetricKind::ImagesOptimization => "Image optimization",
            MetricKind::CriticalIssues => "Critical issues",
            MetricKind::TechnicalScore => "Technical score",
            MetricKind::ContentQuality => "Content quality",
        }
    }

    /// The four page-level optimization metrics.
    pub fn is_optimization_metric(&self) -> bool {
        matches!(
            self,
            MetricKind::TitleOptimization
                | MetricKind::DescriptionOptimization
                | MetricKind::HeadingsOptimization
                | MetricKind::ImagesOptimization
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Homepage,
    Product,
    Service,
    Blog,
    Resource,
    Support,
    About,
    Landing,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Homepage => "homepage",
            ContentType::Product => "product",
            ContentType::Service => "service",
            ContentType::Blog => "blog",
            ContentType::Resource => "resource",
            ContentType::Support => "support",
            ContentType::About => "about",
            ContentType::Landing => "landing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    Superior,
    Comparable,
    Inferior,
}

impl Effectiveness {
    pub const SUPERIOR_THRESHOLD: i32 = 3;
    pub const INFERIOR_THRESHOLD: i32 = -3;

    pub fn from_score(score: i32) -> Self {
        if score >= Self::SUPERIOR_THRESHOLD {
            Effectiveness::Superior
        } else if score <= Self::INFERIOR_THRESHOLD {
            Effectiveness::Inferior
        } else {
            Effectiveness::Comparable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

// ====== Metric comparison ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub main: f64,
    pub competitor: f64,
    pub difference: f64,
    pub percentage_diff: f64,
    pub advantage: Advantage,
    pub significance: Significance,
}

pub type ComparisonMetrics = BTreeMap<MetricKind, MetricComparison>;

// ====== Gaps ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVolumeGap {
    pub area: ContentType,
    pub main_count: usize,
    pub competitor_count: usize,
    /// `competitor_count - main_count`.
    pub gap: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentGapAnalysis {
    pub missing_topics: Vec<String>,
    pub under_optimized_areas: Vec<String>,
    pub opportunity_keywords: Vec<String>,
    pub content_volume_gaps: Vec<ContentVolumeGap>,
}

// ====== Strategies ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAnalysis {
    pub main_approach: String,
    pub competitor_approach: String,
    pub effectiveness: Effectiveness,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub content: StrategyAnalysis,
    pub keyword: StrategyAnalysis,
    pub technical: StrategyAnalysis,
    pub ux: StrategyAnalysis,
}

impl StrategyComparison {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StrategyAnalysis)> {
        [
            ("content", &self.content),
            ("keyword", &self.keyword),
            ("technical", &self.technical),
            ("ux", &self.ux),
        ]
        .into_iter()
    }
}

// ====== Insights ======

pub const CONTENT_GAPS_CATEGORY: &str = "content-gaps";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorInsight {
    pub category: String,
    pub priority: Priority,
    pub impact: u8,
    pub recommendation: String,
    pub evidence: Vec<String>,
    pub action_items: Vec<String>,
    /// Set at creation; the summary only picks quick wins from flagged insights.
    pub quick_win_eligible: bool,
}

impl CompetitorInsight {
    /// Quick-win eligibility by exact category: content gaps and the four
    /// page-level optimization metrics.
    pub fn category_is_quick_win(category: &str) -> bool {
        category == CONTENT_GAPS_CATEGORY
            || MetricKind::ALL
                .iter()
                .any(|kind| kind.is_optimization_metric() && kind.as_str() == category)
    }
}

// ====== Summary & result ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveSummary {
    pub overall_advantage: Advantage,
    pub strength_areas: Vec<MetricKind>,
    pub weakness_areas: Vec<MetricKind>,
    pub quick_wins: Vec<String>,
    pub long_term_opportunities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub analysis_time_ms: u64,
    pub tokens_used: u64,
    pub ai_calls_made: u32,
    /// 0-100.
    pub confidence: f64,
    pub main_pages: usize,
    pub competitor_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveAnalysisResult {
    pub main_domain: String,
    pub competitor_domain: String,
    pub metrics: ComparisonMetrics,
    pub gaps: ContentGapAnalysis,
    pub strategies: StrategyComparison,
    pub insights: Vec<CompetitorInsight>,
    pub summary: CompetitiveSummary,
    pub processing_stats: ProcessingStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effectiveness_thresholds() {
        assert_eq!(Effectiveness::from_score(3), Effectiveness::Superior);
        assert_eq!(Effectiveness::from_score(2), Effectiveness::Comparable);
        assert_eq!(Effectiveness::from_score(-2), Effectiveness::Comparable);
        assert_eq!(Effectiveness::from_score(-3), Effectiveness::Inferior);
    }

    #[test]
    fn quick_win_categories_match_exactly() {
        assert!(CompetitorInsight::category_is_quick_win("content-gaps"));
        assert!(CompetitorInsight::category_is_quick_win("titleOptimization"));
        assert!(!CompetitorInsight::category_is_quick_win("technicalScore"));
        assert!(!CompetitorInsight::category_is_quick_win("TitleOptimization "));
        assert!(!CompetitorInsight::category_is_quick_win("strategy-content"));
    }

    #[test]
    fn metric_kind_serializes_as_camel_case_key() {
        let json = serde_json::to_string(&MetricKind::CriticalIssues).unwrap();
        assert_eq!(json, "\"criticalIssues\"");
    }
}
