use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Structural facts about a page body that the crawler does not report directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSignals {
    /// Visible text, whitespace-collapsed. Script and style contents excluded.
    pub text: String,
    pub paragraphs: usize,
    pub lists: usize,
    pub forms: usize,
    pub videos: usize,
}

pub struct PageExtractor;

impl PageExtractor {
    pub fn extract_signals(content: &str) -> ContentSignals {
        let html = Html::parse_document(content);

        ContentSignals {
            text: Self::extract_text(&html),
            paragraphs: Self::count_paragraphs(&html),
            lists: Self::count_lists(&html),
            forms: Self::count_forms(&html),
            videos: Self::count_videos(&html),
        }
    }

    pub fn extract_text(html: &Html) -> String {
        let root: ElementRef = html.root_element();
        let pieces: Vec<&str> = root
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node
                    .parent()
                    .and_then(|p| p.value().as_element().map(|el| el.name()))
                    .is_some_and(|name| matches!(name, "script" | "style" | "noscript"));
                if hidden {
                    None
                } else {
                    Some(&**text)
                }
            })
            .collect();

        pieces
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn count_paragraphs(html: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("p").unwrap());
        html.select(selector)
            .filter(|p| !p.text().collect::<String>().trim().is_empty())
            .count()
    }

    pub fn count_lists(html: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("ul, ol").unwrap());
        html.select(selector).count()
    }

    pub fn count_forms(html: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("form").unwrap());
        html.select(selector).count()
    }

    pub fn count_videos(html: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| {
            Selector::parse("video, iframe[src*='youtube'], iframe[src*='vimeo']").unwrap()
        });
        html.select(selector).count()
    }

    /// Mean words per sentence, splitting on terminal punctuation.
    /// `None` when the text holds no words at all.
    pub fn average_sentence_length(text: &str) -> Option<f64> {
        static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
        let re = SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]+").unwrap());

        let lengths: Vec<usize> = re
            .split(text)
            .map(|sentence| sentence.split_whitespace().count())
            .filter(|&words| words > 0)
            .collect();

        if lengths.is_empty() {
            return None;
        }
        Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
    }
}
