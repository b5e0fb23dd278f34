use super::{absolute_gap, build_analysis, NO_PAGES_APPROACH};
use crate::domain::results::StrategyAnalysis;
use crate::service::profile::UxProfile;

const READABILITY_GAP: f64 = 15.0;
const INTERNAL_LINKS_GAP: f64 = 2.0;
const STRUCTURE_GAP: f64 = 20.0;
const ENGAGEMENT_GAP: f64 = 15.0;

pub fn analyze(main: &UxProfile, competitor: &UxProfile) -> StrategyAnalysis {
    build_analysis(
        approach(main),
        approach(competitor),
        score(main, competitor),
        recommendations(main, competitor),
    )
}

pub fn score(main: &UxProfile, competitor: &UxProfile) -> i32 {
    2 * absolute_gap(main.readability_score, competitor.readability_score, READABILITY_GAP)
        + absolute_gap(main.avg_internal_links, competitor.avg_internal_links, INTERNAL_LINKS_GAP)
        + 2 * absolute_gap(main.structure_score, competitor.structure_score, STRUCTURE_GAP)
        + absolute_gap(main.engagement_score, competitor.engagement_score, ENGAGEMENT_GAP)
}

pub fn approach(profile: &UxProfile) -> Vec<&'static str> {
    if profile.page_count == 0 {
        return vec![NO_PAGES_APPROACH];
    }

    vec![
        if profile.readability_score >= 80.0 {
            "highly readable"
        } else if profile.readability_score < 50.0 {
            "dense prose"
        } else {
            "readable"
        },
        if profile.avg_internal_links >= 10.0 {
            "well interlinked"
        } else if profile.avg_internal_links < 3.0 {
            "sparse internal linking"
        } else {
            "moderate internal linking"
        },
        if profile.structure_score >= 70.0 {
            "well structured"
        } else {
            "loosely structured"
        },
        if profile.engagement_score >= 50.0 {
            "engagement-driven"
        } else {
            "informational"
        },
    ]
}

fn recommendations(main: &UxProfile, competitor: &UxProfile) -> Vec<String> {
    let mut recs = Vec::new();

    if absolute_gap(main.readability_score, competitor.readability_score, READABILITY_GAP) < 0 {
        recs.push(format!(
            "Shorten sentences to 10-20 words: readability scores {:.0} against the competitor's {:.0}",
            main.readability_score, competitor.readability_score
        ));
    }
    if absolute_gap(main.avg_internal_links, competitor.avg_internal_links, INTERNAL_LINKS_GAP) < 0 {
        recs.push(format!(
            "Add internal links: {:.1} per page against the competitor's {:.1}",
            main.avg_internal_links, competitor.avg_internal_links
        ));
    }
    if absolute_gap(main.structure_score, competitor.structure_score, STRUCTURE_GAP) < 0 {
        recs.push(format!(
            "Break content up with headings, short paragraphs and lists: structure scores {:.0} against the competitor's {:.0}",
            main.structure_score, competitor.structure_score
        ));
    }
    if absolute_gap(main.engagement_score, competitor.engagement_score, ENGAGEMENT_GAP) < 0 {
        recs.push(format!(
            "Add calls to action, forms or video and refresh stale pages: engagement scores {:.0} against the competitor's {:.0}",
            main.engagement_score, competitor.engagement_score
        ));
    }
    recs
}
