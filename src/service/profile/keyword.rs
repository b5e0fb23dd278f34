//! Keyword strategy profile built from per-page keyword density entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::models::{divisor, CanonicalPage};

/// Entries with at least this many words count as long-tail.
pub const LONG_TAIL_MIN_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordStrategyProfile {
    pub page_count: usize,
    pub total_keywords: usize,
    /// Percent of entries with three or more words.
    pub long_tail_percentage: f64,
    /// Mean density over all entries, in percent.
    pub average_density: f64,
    /// Percent of pages carrying a keyword that recurs on two or more pages.
    pub consistency_score: f64,
    pub keyword_diversity: usize,
    /// Not populated; always zero.
    pub brand_keyword_percentage: f64,
}

pub fn profile_keywords(pages: &[CanonicalPage]) -> KeywordStrategyProfile {
    let entries: Vec<_> = pages.iter().flat_map(|p| p.keywords.iter()).collect();
    let total_keywords = entries.len();
    let entry_divisor = total_keywords.max(1) as f64;

    let long_tail = entries
        .iter()
        .filter(|e| e.keyword.split_whitespace().count() >= LONG_TAIL_MIN_WORDS)
        .count();
    let density_sum: f64 = entries.iter().map(|e| e.density).sum();

    // keyword -> number of distinct pages it appears on
    let mut page_spread: HashMap<&str, usize> = HashMap::new();
    for page in pages {
        let distinct: HashSet<&str> = page.keywords.iter().map(|k| k.keyword.as_str()).collect();
        for keyword in distinct {
            *page_spread.entry(keyword).or_insert(0) += 1;
        }
    }

    let pages_with_recurring = pages
        .iter()
        .filter(|page| {
            page.keywords
                .iter()
                .any(|k| page_spread.get(k.keyword.as_str()).copied().unwrap_or(0) >= 2)
        })
        .count();

    KeywordStrategyProfile {
        page_count: pages.len(),
        total_keywords,
        long_tail_percentage: long_tail as f64 / entry_divisor * 100.0,
        average_density: density_sum / entry_divisor,
        consistency_score: pages_with_recurring as f64 / divisor(pages) * 100.0,
        keyword_diversity: page_spread.len(),
        brand_keyword_percentage: 0.0,
    }
}

/// Average density per keyword across every entry on the site.
pub fn keyword_densities(pages: &[CanonicalPage]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for entry in pages.iter().flat_map(|p| p.keywords.iter()) {
        let slot = totals.entry(entry.keyword.clone()).or_insert((0.0, 0));
        slot.0 += entry.density;
        slot.1 += 1;
    }

    totals
        .into_iter()
        .map(|(keyword, (sum, count))| (keyword, sum / count.max(1) as f64))
        .collect()
}
