//! Pairwise numeric comparison of one metric between the two sites.

use crate::domain::results::{
    Advantage, ComparisonMetrics, MetricComparison, MetricKind, Polarity, Significance,
};
use crate::service::metrics::SiteMetricValues;

/// |percentage_diff| at or above this is a critical gap.
pub const CRITICAL_GAP_PERCENT: f64 = 50.0;
/// |percentage_diff| at or above this is an important gap.
pub const IMPORTANT_GAP_PERCENT: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricComparator;

impl MetricComparator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, main: f64, competitor: f64, polarity: Polarity) -> MetricComparison {
        let difference = main - competitor;
        let scale = main.abs().max(competitor.abs());
        let percentage_diff = if scale > 0.0 {
            difference / scale * 100.0
        } else {
            0.0
        };

        let advantage = match polarity {
            Polarity::Optimization if difference > 0.0 => Advantage::Main,
            Polarity::Optimization if difference < 0.0 => Advantage::Competitor,
            Polarity::Issues if difference < 0.0 => Advantage::Main,
            Polarity::Issues if difference > 0.0 => Advantage::Competitor,
            _ => Advantage::Neutral,
        };

        MetricComparison {
            main,
            competitor,
            difference,
            percentage_diff,
            advantage,
            significance: significance(percentage_diff),
        }
    }

    /// One comparison per `MetricKind`, each with its fixed polarity.
    pub fn compare_sites(
        &self,
        main: &SiteMetricValues,
        competitor: &SiteMetricValues,
    ) -> ComparisonMetrics {
        MetricKind::ALL
            .iter()
            .map(|&kind| {
                let comparison =
                    self.compare(main.value(kind), competitor.value(kind), kind.polarity());
                (kind, comparison)
            })
            .collect()
    }
}

fn significance(percentage_diff: f64) -> Significance {
    let magnitude = percentage_diff.abs();
    if magnitude >= CRITICAL_GAP_PERCENT {
        Significance::Critical
    } else if magnitude >= IMPORTANT_GAP_PERCENT {
        Significance::Important
    } else {
        Significance::Minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_is_main_minus_competitor() {
        let c = MetricComparator.compare(40.0, 100.0, Polarity::Optimization);
        assert_eq!(c.difference, -60.0);
        assert_eq!(c.percentage_diff, -60.0);
        assert_eq!(c.advantage, Advantage::Competitor);
        assert_eq!(c.significance, Significance::Critical);
    }

    #[test]
    fn issues_polarity_flips_advantage() {
        let c = MetricComparator.compare(2.0, 10.0, Polarity::Issues);
        assert_eq!(c.advantage, Advantage::Main);

        let c = MetricComparator.compare(10.0, 2.0, Polarity::Issues);
        assert_eq!(c.advantage, Advantage::Competitor);
    }

    #[test]
    fn advantage_matches_ordering_for_many_pairs() {
        let values = [0.0, 0.5, 1.0, 3.0, 7.5, 10.0, 42.0, 100.0];
        for &a in &values {
            for &b in &values {
                let opt = MetricComparator.compare(a, b, Polarity::Optimization);
                assert_eq!(opt.advantage == Advantage::Main, a > b, "optimization {a} vs {b}");
                let iss = MetricComparator.compare(a, b, Polarity::Issues);
                assert_eq!(iss.advantage == Advantage::Main, a < b, "issues {a} vs {b}");
                if a == b {
                    assert_eq!(opt.advantage, Advantage::Neutral);
                }
            }
        }
    }

    #[test]
    fn both_zero_is_neutral_without_dividing() {
        let c = MetricComparator.compare(0.0, 0.0, Polarity::Optimization);
        assert_eq!(c.percentage_diff, 0.0);
        assert_eq!(c.advantage, Advantage::Neutral);
        assert_eq!(c.significance, Significance::Minor);
    }

    #[test]
    fn significance_boundaries() {
        assert_eq!(MetricComparator.compare(50.0, 100.0, Polarity::Optimization).significance, Significance::Critical);
        assert_eq!(MetricComparator.compare(51.0, 100.0, Polarity::Optimization).significance, Significance::Important);
        assert_eq!(MetricComparator.compare(80.0, 100.0, Polarity::Optimization).significance, Significance::Important);
        assert_eq!(MetricComparator.compare(81.0, 100.0, Polarity::Optimization).significance, Significance::Minor);
    }

    #[test]
    fn compare_sites_covers_every_metric() {
        let main = SiteMetricValues::default();
        let competitor = SiteMetricValues::default();
        let metrics = MetricComparator.compare_sites(&main, &competitor);
        assert_eq!(metrics.len(), MetricKind::ALL.len());
        assert!(metrics.values().all(|m| m.advantage == Advantage::Neutral));
    }
}
