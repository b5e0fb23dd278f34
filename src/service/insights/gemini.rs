use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{InsightContext, InsightStrategy};
use crate::config::GeminiSettings;
use crate::domain::results::{CompetitorInsight, Priority};
use crate::error::{AnalysisError, Result};

const SERVICE: &str = "gemini";
const MAX_PROMPT_TOPICS: usize = 15;

const PROMPT_TEMPLATE: &str = r#"{persona}

Compare {main_domain} (our site) against {competitor_domain} (competitor).

Metric comparison (ours vs theirs, difference %, significance):
{metrics}

Topics the competitor covers that we do not ({missing_count} total):
{missing_topics}

Competitor keywords we do not target:
{opportunity_keywords}

Strategy verdicts:
{strategies}

Respond with a JSON array of at most 8 insights, each an object with:
"category" (one of: titleOptimization, descriptionOptimization, headingsOptimization, imagesOptimization, criticalIssues, technicalScore, contentQuality, content-gaps, strategy-content, strategy-keyword, strategy-technical, strategy-ux),
"priority" ("high", "medium" or "low"),
"impact" (integer 1-10),
"recommendation" (one sentence),
"evidence" (array of strings citing the numbers above),
"actionItems" (array of concrete steps)."#;

/// Insight strategy backed by Gemini `generateContent`.
///
/// One request per comparison; failures are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct GeminiInsights {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiInsights {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    pub fn build_prompt(&self, context: &InsightContext<'_>) -> String {
        let metrics = context
            .metrics
            .iter()
            .map(|(kind, cmp)| {
                format!(
                    "- {}: {:.1} vs {:.1} ({:+.0}%, {:?})",
                    kind.as_str(),
                    cmp.main,
                    cmp.competitor,
                    cmp.percentage_diff,
                    cmp.significance
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let strategies = context
            .strategies
            .iter()
            .map(|(dimension, analysis)| {
                format!(
                    "- {}: {:?} (ours: {}; theirs: {})",
                    dimension, analysis.effectiveness, analysis.main_approach, analysis.competitor_approach
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let topics = &context.gaps.missing_topics;
        let shown_topics = topics
            .iter()
            .take(MAX_PROMPT_TOPICS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        PROMPT_TEMPLATE
            .replace("{persona}", &self.settings.persona)
            .replace("{main_domain}", context.main_domain)
            .replace("{competitor_domain}", context.competitor_domain)
            .replace("{metrics}", &metrics)
            .replace("{missing_count}", &topics.len().to_string())
            .replace("{missing_topics}", or_none(&shown_topics))
            .replace(
                "{opportunity_keywords}",
                or_none(&context.gaps.opportunity_keywords.join(", ")),
            )
            .replace("{strategies}", &strategies)
    }
}

#[async_trait]
impl InsightStrategy for GeminiInsights {
    async fn generate(&self, context: &InsightContext<'_>) -> Result<Vec<CompetitorInsight>> {
        let prompt = self.build_prompt(context);
        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": context.max_tokens,
                "responseMimeType": "application/json"
            }
        });

        info!(model = %self.settings.model, max_tokens = context.max_tokens, "requesting model insights");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::service(
                SERVICE,
                format!("HTTP {}: {}", status, error_text),
            ));
        }

        let response_json: serde_json::Value = response.json().await?;
        let text = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AnalysisError::parse("Gemini response carried no text part"))?;

        let insights = parse_insights(text)?;
        debug!(count = insights.len(), "model insights parsed");
        Ok(insights)
    }

    fn uses_model(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInsight {
    category: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    impact: f64,
    recommendation: String,
    #[serde(default)]
    evidence: Vec<String>,
    #[serde(default)]
    action_items: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelAnswer {
    List(Vec<ModelInsight>),
    Wrapped { insights: Vec<ModelInsight> },
}

/// Parses the model's JSON answer, tolerating a ```json fence around it.
pub(crate) fn parse_insights(text: &str) -> Result<Vec<CompetitorInsight>> {
    let answer: ModelAnswer = serde_json::from_str(strip_fence(text))?;
    let raw = match answer {
        ModelAnswer::List(items) => items,
        ModelAnswer::Wrapped { insights } => insights,
    };

    Ok(raw.into_iter().map(into_insight).collect())
}

fn into_insight(raw: ModelInsight) -> CompetitorInsight {
    let category = raw.category.trim().to_string();
    let priority = match raw.priority.trim().to_lowercase().as_str() {
        "high" => Priority::High,
        "low" => Priority::Low,
        _ => Priority::Medium,
    };
    let impact = if raw.impact.is_finite() {
        raw.impact.round().clamp(1.0, 10.0) as u8
    } else {
        1
    };

    CompetitorInsight {
        quick_win_eligible: CompetitorInsight::category_is_quick_win(&category),
        category,
        priority,
        impact,
        recommendation: raw.recommendation,
        evidence: raw.evidence,
        action_items: raw.action_items,
    }
}

fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the language tag line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().trim_end_matches("```").trim()
}

fn or_none(text: &str) -> &str {
    if text.is_empty() {
        "(none)"
    } else {
        text
    }
}
