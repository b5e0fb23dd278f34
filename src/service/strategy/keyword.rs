use std::ops::RangeInclusive;

use super::{absolute_gap, build_analysis, exclusive, relative_gap, NO_PAGES_APPROACH};
use crate::domain::results::StrategyAnalysis;
use crate::service::profile::KeywordStrategyProfile;

const OPTIMAL_LONG_TAIL: RangeInclusive<f64> = 30.0..=70.0;
const OPTIMAL_DENSITY: RangeInclusive<f64> = 1.0..=2.0;

const DIVERSITY_GAP_RATIO: f64 = 0.2;
const CONSISTENCY_GAP_POINTS: f64 = 30.0;

const LONG_TAIL_REC_POINTS: f64 = 20.0;
const DENSITY_REC_POINTS: f64 = 0.5;
const DIVERSITY_REC_COUNT: f64 = 10.0;
const CONSISTENCY_REC_POINTS: f64 = 15.0;

pub fn analyze(main: &KeywordStrategyProfile, competitor: &KeywordStrategyProfile) -> StrategyAnalysis {
    build_analysis(
        approach(main),
        approach(competitor),
        score(main, competitor),
        recommendations(main, competitor),
    )
}

pub fn score(main: &KeywordStrategyProfile, competitor: &KeywordStrategyProfile) -> i32 {
    let diversity = 2 * relative_gap(
        main.keyword_diversity as f64,
        competitor.keyword_diversity as f64,
        DIVERSITY_GAP_RATIO,
    );
    let long_tail = 2 * exclusive(
        OPTIMAL_LONG_TAIL.contains(&main.long_tail_percentage),
        OPTIMAL_LONG_TAIL.contains(&competitor.long_tail_percentage),
    );
    let density = exclusive(
        OPTIMAL_DENSITY.contains(&main.average_density),
        OPTIMAL_DENSITY.contains(&competitor.average_density),
    );
    let consistency = absolute_gap(
        main.consistency_score,
        competitor.consistency_score,
        CONSISTENCY_GAP_POINTS,
    );
    diversity + long_tail + density + consistency
}

pub fn approach(profile: &KeywordStrategyProfile) -> Vec<&'static str> {
    if profile.page_count == 0 {
        return vec![NO_PAGES_APPROACH];
    }
    if profile.total_keywords == 0 {
        return vec!["no keyword targeting"];
    }

    let tail = if profile.long_tail_percentage >= 60.0 {
        "long-tail focus"
    } else if profile.long_tail_percentage < 30.0 {
        "short-tail focus"
    } else {
        "balanced keyword length"
    };
    let density = if profile.average_density >= 2.5 {
        "high keyword density"
    } else if profile.average_density < 1.0 {
        "light keyword density"
    } else {
        "moderate keyword density"
    };
    let targeting = if profile.consistency_score >= 70.0 {
        "consistent targeting"
    } else if profile.consistency_score < 40.0 {
        "diverse targeting"
    } else {
        "mixed targeting"
    };
    vec![tail, density, targeting]
}

fn recommendations(main: &KeywordStrategyProfile, competitor: &KeywordStrategyProfile) -> Vec<String> {
    let mut recs = Vec::new();

    if absolute_gap(main.long_tail_percentage, competitor.long_tail_percentage, LONG_TAIL_REC_POINTS) < 0 {
        recs.push(format!(
            "Target more long-tail phrases: {:.0}% of your keywords have three or more words against the competitor's {:.0}%",
            main.long_tail_percentage, competitor.long_tail_percentage
        ));
    }
    if !OPTIMAL_DENSITY.contains(&main.average_density)
        && absolute_gap(main.average_density, competitor.average_density, DENSITY_REC_POINTS) != 0
    {
        recs.push(format!(
            "Bring keyword density into the 1-2% range: yours averages {:.1}% against the competitor's {:.1}%",
            main.average_density, competitor.average_density
        ));
    }
    if absolute_gap(
        main.keyword_diversity as f64,
        competitor.keyword_diversity as f64,
        DIVERSITY_REC_COUNT,
    ) < 0
    {
        recs.push(format!(
            "Expand keyword coverage: you target {} distinct keywords against the competitor's {}",
            main.keyword_diversity, competitor.keyword_diversity
        ));
    }
    if absolute_gap(main.consistency_score, competitor.consistency_score, CONSISTENCY_REC_POINTS) < 0 {
        recs.push(format!(
            "Reinforce core keywords across pages: {:.0}% of your pages share a recurring keyword against the competitor's {:.0}%",
            main.consistency_score, competitor.consistency_score
        ));
    }
    recs
}
