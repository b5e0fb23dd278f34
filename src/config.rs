//! Run options and Gemini settings.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PERSONA: &str =
    "You are an expert SEO consultant. Your tone is professional, encouraging, and data-driven.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Basic,
    #[default]
    Standard,
    Comprehensive,
}

/// Per-run options.
///
/// `analysis_depth` and `focus_areas` are carried through but do not change
/// what any stage computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    #[serde(rename = "includeAI")]
    pub include_ai: bool,
    pub max_tokens: u32,
    pub analysis_depth: AnalysisDepth,
    pub focus_areas: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_ai: false,
            max_tokens: DEFAULT_MAX_TOKENS,
            analysis_depth: AnalysisDepth::default(),
            focus_areas: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub persona: String,
}

impl GeminiSettings {
    /// Reads `GEMINI_API_KEY` (required), `GEMINI_MODEL`, `GEMINI_BASE_URL`
    /// and `GEMINI_PERSONA`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").ok_or(AnalysisError::MissingApiKey)?;
        Ok(Self {
            api_key,
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            persona: non_empty("GEMINI_PERSONA").unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn options_deserialize_with_defaults() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"includeAI": true, "focusAreas": ["content"]}"#).unwrap();
        assert!(options.include_ai);
        assert_eq!(options.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(options.analysis_depth, AnalysisDepth::Standard);
        assert_eq!(options.focus_areas, vec!["content".to_string()]);
    }

    #[test]
    fn gemini_settings_require_a_key() {
        let empty: HashMap<&str, String> = HashMap::new();
        let err = GeminiSettings::from_lookup(|k| empty.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }

    #[test]
    fn gemini_settings_fall_back_to_defaults() {
        let vars: HashMap<&str, String> =
            HashMap::from([("GEMINI_API_KEY", "k".to_string()), ("GEMINI_MODEL", " ".to_string())]);
        let settings = GeminiSettings::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(settings.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(settings.persona, DEFAULT_PERSONA);
    }
}
