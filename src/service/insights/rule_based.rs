use async_trait::async_trait;

use super::{InsightContext, InsightStrategy};
use crate::domain::results::{
    Advantage, CompetitorInsight, MetricComparison, MetricKind, Priority,
    Significance, CONTENT_GAPS_CATEGORY,
};
use crate::error::Result;

const METRIC_GAP_IMPACT: u8 = 8;
const CONTENT_GAP_IMPACT: u8 = 7;
const EXAMPLE_TOPICS: usize = 3;

/// Deterministic insights from fixed rules. Same input, same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInsights;

impl RuleBasedInsights {
    pub fn new() -> Self {
        Self
    }

    pub fn insights(&self, context: &InsightContext<'_>) -> Vec<CompetitorInsight> {
        let mut insights: Vec<CompetitorInsight> = context
            .metrics
            .iter()
            .filter(|(_, cmp)| {
                cmp.significance == Significance::Critical && cmp.advantage == Advantage::Competitor
            })
            .map(|(kind, cmp)| metric_insight(*kind, cmp, context.competitor_domain))
            .collect();

        if !context.gaps.missing_topics.is_empty() {
            insights.push(content_gap_insight(&context.gaps.missing_topics));
        }

        insights
    }
}

#[async_trait]
impl InsightStrategy for RuleBasedInsights {
    async fn generate(&self, context: &InsightContext<'_>) -> Result<Vec<CompetitorInsight>> {
        Ok(self.insights(context))
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

fn metric_insight(kind: MetricKind, cmp: &MetricComparison, competitor: &str) -> CompetitorInsight {
    let category = kind.as_str().to_string();
    CompetitorInsight {
        quick_win_eligible: CompetitorInsight::category_is_quick_win(&category),
        category,
        priority: Priority::High,
        impact: METRIC_GAP_IMPACT,
        recommendation: format!(
            "Close the {} gap: {} leads by {:.0}%",
            kind.label(),
            competitor,
            cmp.percentage_diff.abs()
        ),
        evidence: vec![
            format!("Your {}: {:.1}", kind.label(), cmp.main),
            format!("Competitor {}: {:.1}", kind.label(), cmp.competitor),
        ],
        action_items: action_items(kind).iter().map(|s| s.to_string()).collect(),
    }
}

fn content_gap_insight(missing_topics: &[String]) -> CompetitorInsight {
    let examples: Vec<&str> = missing_topics
        .iter()
        .take(EXAMPLE_TOPICS)
        .map(String::as_str)
        .collect();

    CompetitorInsight {
        category: CONTENT_GAPS_CATEGORY.to_string(),
        priority: Priority::High,
        impact: CONTENT_GAP_IMPACT,
        recommendation: format!(
            "Create content for {} topics the competitor covers and you don't",
            missing_topics.len()
        ),
        evidence: vec![
            format!("{} missing topics", missing_topics.len()),
            format!("Examples: {}", examples.join(", ")),
        ],
        action_items: examples
            .iter()
            .map(|topic| format!("Publish a page targeting \"{}\"", topic))
            .collect(),
        quick_win_eligible: true,
    }
}

fn action_items(kind: MetricKind) -> &'static [&'static str] {
    match kind {
        MetricKind::TitleOptimization => &[
            "Rewrite titles to 30-60 characters",
            "Lead each title with the page's primary keyword",
        ],
        MetricKind::DescriptionOptimization => &[
            "Write unique meta descriptions of 70-160 characters",
            "Include a call to action in each description",
        ],
        MetricKind::HeadingsOptimization => &[
            "Give every page exactly one H1",
            "Nest H2/H3 headings under the H1 in order",
        ],
        MetricKind::ImagesOptimization => &[
            "Add descriptive alt text to every image",
            "Compress and lazy-load large images",
        ],
        MetricKind::CriticalIssues => &[
            "Fix pages missing a title or H1 first",
            "Re-crawl after fixes to confirm the issue count drops",
        ],
        MetricKind::TechnicalScore => &[
            "Serve all pages over HTTPS and make them mobile-friendly",
            "Add structured data and bring load times under 3 seconds",
        ],
        MetricKind::ContentQuality => &[
            "Expand thin pages past 500 words",
            "Cover more subtopics and add supporting media",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::results::{ContentGapAnalysis, Effectiveness};
    use crate::service::comparator::MetricComparator;
    use crate::test_utils::fixtures::{comparable_strategies, metrics_with};

    #[tokio::test]
    async fn critical_competitor_wins_become_high_priority_insights() {
        let comparator = MetricComparator::new();
        let metrics = metrics_with(&[
            (MetricKind::TitleOptimization, comparator.compare(20.0, 90.0, MetricKind::TitleOptimization.polarity())),
            // main wins: no insight
            (MetricKind::HeadingsOptimization, comparator.compare(90.0, 20.0, MetricKind::HeadingsOptimization.polarity())),
            // competitor wins but only by 10%: no insight
            (MetricKind::ImagesOptimization, comparator.compare(90.0, 100.0, MetricKind::ImagesOptimization.polarity())),
        ]);
        let gaps = ContentGapAnalysis::default();
        let strategies = comparable_strategies();
        let context = InsightContext {
            main_domain: "main.com",
            competitor_domain: "rival.com",
            metrics: &metrics,
            gaps: &gaps,
            strategies: &strategies,
            max_tokens: 1000,
        };

        let insights = RuleBasedInsights.generate(&context).await.unwrap();
        assert_eq!(insights.len(), 1);
        let insight = &insights[0];
        assert_eq!(insight.category, "titleOptimization");
        assert_eq!(insight.priority, Priority::High);
        assert_eq!(insight.impact, 8);
        assert!(insight.quick_win_eligible);
        assert!(insight.recommendation.contains("78%"));
        assert!(!insight.action_items.is_empty());
    }

    #[test]
    fn missing_topics_add_one_content_gap_insight() {
        let metrics = metrics_with(&[]);
        let gaps = ContentGapAnalysis {
            missing_topics: vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
            ..Default::default()
        };
        let strategies = comparable_strategies();
        let context = InsightContext {
            main_domain: "main.com",
            competitor_domain: "rival.com",
            metrics: &metrics,
            gaps: &gaps,
            strategies: &strategies,
            max_tokens: 0,
        };

        let insights = RuleBasedInsights.insights(&context);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, CONTENT_GAPS_CATEGORY);
        assert_eq!(insights[0].impact, 7);
        assert!(insights[0].evidence.iter().any(|e| e.contains("4 missing topics")));
        assert!(insights[0].evidence.iter().any(|e| e == "Examples: alpha, beta, gamma"));
    }

    #[test]
    fn inferior_strategies_add_no_insights() {
        let metrics = metrics_with(&[]);
        let gaps = ContentGapAnalysis::default();
        let mut strategies = comparable_strategies();
        strategies.technical.effectiveness = Effectiveness::Inferior;
        strategies.content.effectiveness = Effectiveness::Inferior;
        strategies.technical.recommendations = vec!["Cut page load time".into()];
        let context = InsightContext {
            main_domain: "main.com",
            competitor_domain: "rival.com",
            metrics: &metrics,
            gaps: &gaps,
            strategies: &strategies,
            max_tokens: 0,
        };

        assert!(RuleBasedInsights.insights(&context).is_empty());
    }
}
