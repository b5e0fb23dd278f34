//! Insight generation strategies.
//!
//! Two interchangeable strategies turn metric comparisons, content gaps and
//! strategy verdicts into prioritized insights:
//! - **RuleBased**: deterministic lookup-table insights, always available
//! - **Gemini**: model-written insights, one request per comparison
//!
//! Both implement `InsightStrategy`; the engine picks one at construction.

mod gemini;
mod rule_based;

pub use gemini::GeminiInsights;
pub use rule_based::RuleBasedInsights;

use async_trait::async_trait;

use crate::domain::results::{
    ComparisonMetrics, CompetitorInsight, ContentGapAnalysis, StrategyComparison,
};
use crate::error::Result;

/// Everything an insight strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub main_domain: &'a str,
    pub competitor_domain: &'a str,
    pub metrics: &'a ComparisonMetrics,
    pub gaps: &'a ContentGapAnalysis,
    pub strategies: &'a StrategyComparison,
    /// Output budget for model-backed strategies.
    pub max_tokens: u32,
}

/// Strategy trait for insight generation.
#[async_trait]
pub trait InsightStrategy: Send + Sync {
    async fn generate(&self, context: &InsightContext<'_>) -> Result<Vec<CompetitorInsight>>;

    /// True when `generate` calls an external model.
    fn uses_model(&self) -> bool {
        false
    }

    /// Human-readable name for this strategy.
    fn name(&self) -> &'static str;
}
