//! Profilers: pure summaries of one site's canonical pages along one dimension.
//!
//! Every profiler divides by `max(page_count, 1)`, so an empty snapshot yields
//! an all-zero profile instead of an error.

pub mod content;
pub mod keyword;
pub mod technical;
pub mod ux;

pub use content::{profile_content, ContentDepth, ContentProfile};
pub use keyword::{profile_keywords, KeywordStrategyProfile};
pub use technical::{profile_technical, TechnicalProfile};
pub use ux::{profile_ux, UxProfile};
