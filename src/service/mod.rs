pub mod comparator;
pub mod engine;
pub mod gaps;
pub mod insights;
pub mod metrics;
pub mod profile;
pub mod strategy;
pub mod summary;

pub use comparator::MetricComparator;
pub use engine::CompetitiveAnalyzer;
pub use gaps::ContentGapAnalyzer;
pub use insights::{GeminiInsights, InsightContext, InsightStrategy, RuleBasedInsights};
pub use strategy::StrategyDetector;
pub use summary::SummaryBuilder;
