use super::{absolute_gap, build_analysis, NO_PAGES_APPROACH};
use crate::domain::results::StrategyAnalysis;
use crate::service::profile::TechnicalProfile;

const HTTPS_GAP_POINTS: f64 = 10.0;
const MOBILE_GAP_POINTS: f64 = 15.0;
const LOAD_TIME_GAP_SECS: f64 = 1.0;
const STRUCTURED_DATA_GAP_POINTS: f64 = 20.0;

pub fn analyze(main: &TechnicalProfile, competitor: &TechnicalProfile) -> StrategyAnalysis {
    build_analysis(
        approach(main),
        approach(competitor),
        score(main, competitor),
        recommendations(main, competitor),
    )
}

pub fn score(main: &TechnicalProfile, competitor: &TechnicalProfile) -> i32 {
    absolute_gap(main.https_percentage, competitor.https_percentage, HTTPS_GAP_POINTS)
        + 2 * absolute_gap(main.mobile_percentage, competitor.mobile_percentage, MOBILE_GAP_POINTS)
        // lower load time wins
        + 2 * absolute_gap(competitor.avg_load_time, main.avg_load_time, LOAD_TIME_GAP_SECS)
        + absolute_gap(
            main.structured_data_percentage,
            competitor.structured_data_percentage,
            STRUCTURED_DATA_GAP_POINTS,
        )
}

pub fn approach(profile: &TechnicalProfile) -> Vec<&'static str> {
    if profile.page_count == 0 {
        return vec![NO_PAGES_APPROACH];
    }

    let marks = [
        (profile.https_percentage >= 95.0, "secure (https)"),
        (profile.mobile_percentage >= 80.0, "mobile-first"),
        (profile.avg_load_time <= 3.0, "fast-loading"),
        (profile.structured_data_percentage >= 50.0, "structured data"),
        (profile.clean_url_percentage >= 80.0, "clean URLs"),
        (profile.image_optimization_percentage >= 70.0, "optimized images"),
    ];
    let tags: Vec<&'static str> = marks
        .into_iter()
        .filter_map(|(hit, tag)| hit.then_some(tag))
        .collect();

    if tags.is_empty() {
        vec!["basic technical setup"]
    } else {
        tags
    }
}

fn recommendations(main: &TechnicalProfile, competitor: &TechnicalProfile) -> Vec<String> {
    let mut recs = Vec::new();

    if absolute_gap(main.https_percentage, competitor.https_percentage, HTTPS_GAP_POINTS) < 0 {
        recs.push(format!(
            "Serve every page over HTTPS: {:.0}% of your pages use it against the competitor's {:.0}%",
            main.https_percentage, competitor.https_percentage
        ));
    }
    if absolute_gap(main.mobile_percentage, competitor.mobile_percentage, MOBILE_GAP_POINTS) < 0 {
        recs.push(format!(
            "Improve mobile optimization: {:.0}% of your pages are mobile-friendly against the competitor's {:.0}%",
            main.mobile_percentage, competitor.mobile_percentage
        ));
    }
    if absolute_gap(competitor.avg_load_time, main.avg_load_time, LOAD_TIME_GAP_SECS) < 0 {
        recs.push(format!(
            "Cut page load time from {:.1}s toward the competitor's {:.1}s",
            main.avg_load_time, competitor.avg_load_time
        ));
    }
    if absolute_gap(
        main.structured_data_percentage,
        competitor.structured_data_percentage,
        STRUCTURED_DATA_GAP_POINTS,
    ) < 0
    {
        recs.push(format!(
            "Add schema.org structured data: {:.0}% of your pages carry it against the competitor's {:.0}%",
            main.structured_data_percentage, competitor.structured_data_percentage
        ));
    }
    recs
}
