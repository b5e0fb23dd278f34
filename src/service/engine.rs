//! The comparison pipeline.
//!
//! `CompetitiveAnalyzer` is built once with its stages and then run any number
//! of times; it keeps nothing between runs. Stages run in a fixed order:
//! normalize, metrics, gaps, strategies, insights, summary. The first failing
//! stage aborts the run.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::config::{AnalysisOptions, GeminiSettings};
use crate::domain::models::{AnalysisSnapshot, NormalizedSnapshot};
use crate::domain::results::{CompetitiveAnalysisResult, ProcessingStats};
use crate::error::Result;
use crate::service::comparator::MetricComparator;
use crate::service::gaps::ContentGapAnalyzer;
use crate::service::insights::{GeminiInsights, InsightContext, InsightStrategy, RuleBasedInsights};
use crate::service::metrics::SiteMetricValues;
use crate::service::strategy::StrategyDetector;
use crate::service::summary::SummaryBuilder;

const TOKENS_PER_INSIGHT: u64 = 150;
const TOKENS_PER_METRIC: u64 = 20;
const TOKENS_PER_MISSING_TOPIC: u64 = 10;

/// Combined page count at which page coverage stops adding confidence.
const FULL_CONFIDENCE_PAGES: f64 = 20.0;
/// Insight count at which insight coverage stops adding confidence.
const FULL_CONFIDENCE_INSIGHTS: f64 = 10.0;

pub struct CompetitiveAnalyzer {
    comparator: MetricComparator,
    gap_analyzer: ContentGapAnalyzer,
    strategy_detector: StrategyDetector,
    insight_strategy: Arc<dyn InsightStrategy>,
    summary_builder: SummaryBuilder,
    options: AnalysisOptions,
}

impl CompetitiveAnalyzer {
    pub fn new(insight_strategy: Arc<dyn InsightStrategy>, options: AnalysisOptions) -> Self {
        Self {
            comparator: MetricComparator::new(),
            gap_analyzer: ContentGapAnalyzer::new(),
            strategy_detector: StrategyDetector::new(),
            insight_strategy,
            summary_builder: SummaryBuilder::new(),
            options,
        }
    }

    pub fn rule_based(options: AnalysisOptions) -> Self {
        Self::new(Arc::new(RuleBasedInsights::new()), options)
    }

    pub fn with_gemini(options: AnalysisOptions, settings: GeminiSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(GeminiInsights::new(settings)?), options))
    }

    /// Picks the insight strategy from `include_ai`. The model-backed one
    /// reads its settings from the environment.
    pub fn from_options(options: AnalysisOptions) -> Result<Self> {
        if options.include_ai {
            let settings = GeminiSettings::from_env()?;
            Self::with_gemini(options, settings)
        } else {
            Ok(Self::rule_based(options))
        }
    }

    #[instrument(skip_all, fields(main = %main.domain, competitor = %competitor.domain))]
    pub async fn analyze(
        &self,
        main: &AnalysisSnapshot,
        competitor: &AnalysisSnapshot,
    ) -> Result<CompetitiveAnalysisResult> {
        let started = Instant::now();
        info!(
            strategy = self.insight_strategy.name(),
            depth = ?self.options.analysis_depth,
            "starting competitive analysis"
        );

        let main = normalize(main)?;
        let competitor = normalize(competitor)?;

        let metrics = self.comparator.compare_sites(
            &SiteMetricValues::from_snapshot(&main),
            &SiteMetricValues::from_snapshot(&competitor),
        );
        let gaps = self.gap_analyzer.analyze_gaps(&main, &competitor);
        let strategies = self.strategy_detector.detect(&main, &competitor);

        let context = InsightContext {
            main_domain: &main.domain,
            competitor_domain: &competitor.domain,
            metrics: &metrics,
            gaps: &gaps,
            strategies: &strategies,
            max_tokens: self.options.max_tokens,
        };
        let insights = self
            .insight_strategy
            .generate(&context)
            .await
            .inspect_err(|e| error!(stage = "insights", error = %e, "analysis stage failed"))?;

        let summary = self.summary_builder.build(&metrics, &gaps, &insights);

        let tokens_used = TOKENS_PER_INSIGHT * insights.len() as u64
            + TOKENS_PER_METRIC * metrics.len() as u64
            + TOKENS_PER_MISSING_TOPIC * gaps.missing_topics.len() as u64;
        let processing_stats = ProcessingStats {
            analysis_time_ms: started.elapsed().as_millis() as u64,
            tokens_used,
            ai_calls_made: u32::from(self.insight_strategy.uses_model()),
            confidence: confidence(main.page_count() + competitor.page_count(), insights.len()),
            main_pages: main.page_count(),
            competitor_pages: competitor.page_count(),
        };

        info!(
            insights = insights.len(),
            advantage = summary.overall_advantage.as_str(),
            elapsed_ms = processing_stats.analysis_time_ms,
            "competitive analysis complete"
        );

        Ok(CompetitiveAnalysisResult {
            main_domain: main.domain,
            competitor_domain: competitor.domain,
            metrics,
            gaps,
            strategies,
            insights,
            summary,
            processing_stats,
        })
    }
}

fn normalize(snapshot: &AnalysisSnapshot) -> Result<NormalizedSnapshot> {
    NormalizedSnapshot::from_snapshot(snapshot).inspect_err(|e| {
        error!(stage = "normalize", domain = %snapshot.domain, error = %e, "analysis stage failed")
    })
}

/// 0-100: up to 60 for page coverage, up to 40 for insight coverage.
pub fn confidence(total_pages: usize, insight_count: usize) -> f64 {
    let pages = (total_pages as f64 / FULL_CONFIDENCE_PAGES).min(1.0);
    let insights = (insight_count as f64 / FULL_CONFIDENCE_INSIGHTS).min(1.0);
    pages * 60.0 + insights * 40.0
}
