//! Executive summary over metrics, gaps and insights.

use std::cmp::Ordering;

use crate::domain::results::{
    Advantage, ComparisonMetrics, CompetitiveSummary, CompetitorInsight, ContentGapAnalysis,
};

pub const MAX_QUICK_WINS: usize = 3;
pub const MAX_LONG_TERM_OPPORTUNITIES: usize = 5;
pub const QUICK_WIN_MIN_IMPACT: u8 = 7;

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryBuilder;

impl SummaryBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        metrics: &ComparisonMetrics,
        gaps: &ContentGapAnalysis,
        insights: &[CompetitorInsight],
    ) -> CompetitiveSummary {
        let strength_areas: Vec<_> = metrics
            .iter()
            .filter(|(_, cmp)| cmp.advantage == Advantage::Main)
            .map(|(kind, _)| *kind)
            .collect();
        let weakness_areas: Vec<_> = metrics
            .iter()
            .filter(|(_, cmp)| cmp.advantage == Advantage::Competitor)
            .map(|(kind, _)| *kind)
            .collect();

        let overall_advantage = match strength_areas.len().cmp(&weakness_areas.len()) {
            Ordering::Greater => Advantage::Main,
            Ordering::Less => Advantage::Competitor,
            Ordering::Equal => Advantage::Neutral,
        };

        let quick_wins = insights
            .iter()
            .filter(|i| i.quick_win_eligible && i.impact >= QUICK_WIN_MIN_IMPACT)
            .take(MAX_QUICK_WINS)
            .map(|i| i.recommendation.clone())
            .collect();

        CompetitiveSummary {
            overall_advantage,
            strength_areas,
            weakness_areas,
            quick_wins,
            long_term_opportunities: gaps
                .missing_topics
                .iter()
                .take(MAX_LONG_TERM_OPPORTUNITIES)
                .cloned()
                .collect(),
        }
    }
}
