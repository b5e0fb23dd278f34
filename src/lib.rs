// src/lib.rs

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod io;
pub mod logging;
pub mod service;
pub mod test_utils;

pub use config::{AnalysisDepth, AnalysisOptions, GeminiSettings};
pub use domain::models::{AnalysisSnapshot, PageRecord};
pub use domain::results::CompetitiveAnalysisResult;
pub use error::{AnalysisError, Result};
pub use service::CompetitiveAnalyzer;
