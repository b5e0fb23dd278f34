//! Strategy detection along four independent dimensions.
//!
//! Every sub-analysis has the same shape: profile both sites, describe each
//! approach as a short tag list, score the gap into an `Effectiveness`, and
//! emit at most five recommendations driven by the gaps found.
//!
//! Scores are antisymmetric: swapping main and competitor negates every
//! contribution, so `superior` and `inferior` swap and `comparable` stays.

pub mod content;
pub mod keyword;
pub mod technical;
pub mod ux;

use tracing::debug;

use crate::domain::models::NormalizedSnapshot;
use crate::domain::results::{Effectiveness, StrategyAnalysis, StrategyComparison};
use crate::service::profile::{profile_content, profile_keywords, profile_technical, profile_ux};

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Approach text for a site with no pages.
pub const NO_PAGES_APPROACH: &str = "no pages analyzed";

#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyDetector;

impl StrategyDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(
        &self,
        main: &NormalizedSnapshot,
        competitor: &NormalizedSnapshot,
    ) -> StrategyComparison {
        let strategies = StrategyComparison {
            content: content::analyze(
                &profile_content(&main.pages),
                &profile_content(&competitor.pages),
            ),
            keyword: keyword::analyze(
                &profile_keywords(&main.pages),
                &profile_keywords(&competitor.pages),
            ),
            technical: technical::analyze(
                &profile_technical(&main.pages),
                &profile_technical(&competitor.pages),
            ),
            ux: ux::analyze(
                &profile_ux(&main.pages, main.crawled_at),
                &profile_ux(&competitor.pages, competitor.crawled_at),
            ),
        };

        for (dimension, analysis) in strategies.iter() {
            debug!(dimension, effectiveness = ?analysis.effectiveness, "strategy classified");
        }
        strategies
    }
}

/// +1 when `main` exceeds `competitor` by more than `ratio` (relative),
/// -1 when the reverse holds, else 0.
pub(crate) fn relative_gap(main: f64, competitor: f64, ratio: f64) -> i32 {
    if main > competitor * (1.0 + ratio) {
        1
    } else if competitor > main * (1.0 + ratio) {
        -1
    } else {
        0
    }
}

/// +1 when `main - competitor` is above `threshold`, -1 when below `-threshold`.
pub(crate) fn absolute_gap(main: f64, competitor: f64, threshold: f64) -> i32 {
    let difference = main - competitor;
    if difference > threshold {
        1
    } else if difference < -threshold {
        -1
    } else {
        0
    }
}

/// +1 when only main satisfies a condition, -1 when only the competitor does.
pub(crate) fn exclusive(main: bool, competitor: bool) -> i32 {
    match (main, competitor) {
        (true, false) => 1,
        (false, true) => -1,
        _ => 0,
    }
}

pub(crate) fn build_analysis(
    main_tags: Vec<&str>,
    competitor_tags: Vec<&str>,
    score: i32,
    mut recommendations: Vec<String>,
) -> StrategyAnalysis {
    recommendations.truncate(MAX_RECOMMENDATIONS);
    StrategyAnalysis {
        main_approach: main_tags.join(", "),
        competitor_approach: competitor_tags.join(", "),
        effectiveness: Effectiveness::from_score(score),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_helpers_are_antisymmetric() {
        let pairs = [(0.0, 0.0), (10.0, 12.0), (10.0, 13.0), (0.0, 5.0), (100.0, 80.0)];
        for (a, b) in pairs {
            assert_eq!(relative_gap(a, b, 0.2), -relative_gap(b, a, 0.2));
            assert_eq!(absolute_gap(a, b, 2.0), -absolute_gap(b, a, 2.0));
        }
        assert_eq!(exclusive(true, false), -exclusive(false, true));
        assert_eq!(exclusive(true, true), 0);
    }

    #[test]
    fn relative_gap_thresholds() {
        assert_eq!(relative_gap(12.0, 10.0, 0.2), 0);
        assert_eq!(relative_gap(12.1, 10.0, 0.2), 1);
        assert_eq!(relative_gap(5.0, 0.0, 0.2), 1);
        assert_eq!(relative_gap(0.0, 0.0, 0.2), 0);
    }

    #[test]
    fn build_analysis_caps_recommendations() {
        let recs = (0..9).map(|i| format!("rec {}", i)).collect();
        let analysis = build_analysis(vec!["a", "b"], vec!["c"], 0, recs);
        assert_eq!(analysis.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(analysis.main_approach, "a, b");
        assert_eq!(analysis.competitor_approach, "c");
        assert_eq!(analysis.effectiveness, Effectiveness::Comparable);
    }
}
