use super::{absolute_gap, build_analysis, relative_gap, NO_PAGES_APPROACH};
use crate::domain::results::{ContentType, Effectiveness, StrategyAnalysis};
use crate::service::profile::{ContentDepth, ContentProfile};

const TOPIC_GAP_RATIO: f64 = 0.2;
const MEDIA_GAP_RATIO: f64 = 0.3;
const TYPE_VARIETY_GAP_RATIO: f64 = 0.3;
const WORD_COUNT_GAP_RATIO: f64 = 0.2;

pub fn analyze(main: &ContentProfile, competitor: &ContentProfile) -> StrategyAnalysis {
    let score = score(main, competitor);
    let effectiveness = Effectiveness::from_score(score);

    let recommendations = if effectiveness == Effectiveness::Superior {
        Vec::new()
    } else {
        recommendations(main, competitor)
    };

    build_analysis(approach(main), approach(competitor), score, recommendations)
}

pub fn score(main: &ContentProfile, competitor: &ContentProfile) -> i32 {
    let depth = 2 * (main.content_depth.rank() - competitor.content_depth.rank());
    let topics = 2 * relative_gap(
        main.topical_diversity as f64,
        competitor.topical_diversity as f64,
        TOPIC_GAP_RATIO,
    );
    let media = relative_gap(main.media_richness, competitor.media_richness, MEDIA_GAP_RATIO);
    let variety = relative_gap(
        main.type_variety() as f64,
        competitor.type_variety() as f64,
        TYPE_VARIETY_GAP_RATIO,
    );
    depth + topics + media + variety
}

pub fn approach(profile: &ContentProfile) -> Vec<&'static str> {
    if profile.page_count == 0 {
        return vec![NO_PAGES_APPROACH];
    }

    let mut tags = vec![match profile.content_depth {
        ContentDepth::Comprehensive => "comprehensive long-form content",
        ContentDepth::Substantial => "substantial content",
        ContentDepth::Moderate => "moderate-length content",
        ContentDepth::Shallow => "short-form content",
    }];

    if let Some(dominant) = dominant_type(profile) {
        tags.push(match dominant {
            ContentType::Homepage => "homepage-centric",
            ContentType::Product => "product-led",
            ContentType::Service => "service-led",
            ContentType::Blog => "blog-led",
            ContentType::Resource => "resource-led",
            ContentType::Support => "support-led",
            ContentType::About => "brand-led",
            ContentType::Landing => "landing-page-led",
        });
    }

    tags.push(if profile.topical_diversity >= 30 {
        "broad topical coverage"
    } else if profile.topical_diversity < 10 {
        "narrow topical focus"
    } else {
        "moderate topical coverage"
    });

    if profile.media_richness >= 3.0 {
        tags.push("media-rich");
    } else if profile.media_richness < 1.0 {
        tags.push("text-first");
    }
    tags
}

/// The content type with the most pages; ties go to the earlier type.
fn dominant_type(profile: &ContentProfile) -> Option<ContentType> {
    profile
        .content_types
        .iter()
        .fold(None, |best: Option<(ContentType, usize)>, (&kind, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((kind, count)),
        })
        .map(|(kind, _)| kind)
}

fn recommendations(main: &ContentProfile, competitor: &ContentProfile) -> Vec<String> {
    let mut recs = Vec::new();

    if relative_gap(main.avg_word_count, competitor.avg_word_count, WORD_COUNT_GAP_RATIO) < 0 {
        recs.push(format!(
            "Increase average content length from {:.0} to at least {:.0} words per page to match the competitor's depth",
            main.avg_word_count, competitor.avg_word_count
        ));
    }

    if relative_gap(
        main.topical_diversity as f64,
        competitor.topical_diversity as f64,
        TOPIC_GAP_RATIO,
    ) < 0
    {
        recs.push(format!(
            "Broaden topical coverage: you cover {} distinct topics against the competitor's {}",
            main.topical_diversity, competitor.topical_diversity
        ));
    }

    for (&kind, &theirs) in &competitor.content_types {
        let ours = main.type_count(kind);
        if absolute_gap(ours as f64, theirs as f64, 0.0) < 0 {
            recs.push(format!(
                "Publish more {} content: {} pages against the competitor's {}",
                kind.as_str(),
                ours,
                theirs
            ));
        }
    }

    if relative_gap(main.media_richness, competitor.media_richness, MEDIA_GAP_RATIO) < 0 {
        recs.push(format!(
            "Add more images and video: {:.1} media items per page against the competitor's {:.1}",
            main.media_richness, competitor.media_richness
        ));
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::profile::profile_content;
    use crate::test_utils::fixtures::{content_pages, swap_effectiveness};

    #[test]
    fn deeper_competitor_is_not_beaten_and_word_counts_are_cited() {
        let main = profile_content(&content_pages(10, 800));
        let competitor = profile_content(&content_pages(10, 1200));

        let analysis = analyze(&main, &competitor);
        assert_ne!(analysis.effectiveness, Effectiveness::Superior);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("800") && r.contains("1200")));
    }

    #[test]
    fn much_deeper_site_is_superior_with_no_recommendations() {
        let main = profile_content(&content_pages(10, 1500));
        let competitor = profile_content(&content_pages(10, 100));

        // depth 4 vs 1 => +6
        let analysis = analyze(&main, &competitor);
        assert_eq!(analysis.effectiveness, Effectiveness::Superior);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn approach_leads_with_the_depth_tag() {
        let cases = [
            (1500, "comprehensive long-form content"),
            (700, "substantial content"),
            (300, "moderate-length content"),
            (100, "short-form content"),
        ];
        for (words, expected) in cases {
            let profile = profile_content(&content_pages(3, words));
            assert_eq!(approach(&profile)[0], expected, "{} words", words);
        }
    }

    #[test]
    fn swapping_sides_flips_the_verdict_and_approaches() {
        let a = profile_content(&content_pages(10, 1500));
        let b = profile_content(&content_pages(4, 150));

        let forward = analyze(&a, &b);
        let backward = analyze(&b, &a);
        assert_eq!(backward.effectiveness, swap_effectiveness(forward.effectiveness));
        assert_eq!(forward.main_approach, backward.competitor_approach);
        assert_eq!(forward.competitor_approach, backward.main_approach);
        assert_eq!(score(&a, &b), -score(&b, &a));
    }

    #[test]
    fn empty_profile_has_placeholder_approach() {
        let empty = profile_content(&[]);
        assert_eq!(approach(&empty), vec![NO_PAGES_APPROACH]);
    }
}
