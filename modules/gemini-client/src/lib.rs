pub mod error;
pub mod prompt;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{Summary, TokenUsage};

use std::time::Duration;

use types::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 2.0 Flash pricing, USD per million tokens.
const INPUT_COST_PER_MTOK: f64 = 0.10;
const OUTPUT_COST_PER_MTOK: f64 = 0.40;

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a TLDR for one post, aiming for `target_words`.
    pub async fn summarize(&self, title: &str, body: &str, target_words: usize) -> Result<Summary> {
        let text = format!(
            "{}\n\nTitle: {title}\n\nContent: {body}",
            prompt::tldr_prompt(target_words)
        );
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                max_output_tokens: 1024,
            },
        };

        let url = format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let resp = self.client.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::from_status(status.as_u16(), message));
        }

        let parsed: GenerateResponse = resp.json().await?;
        let summary = summary_from_response(parsed)?;
        tracing::debug!(
            model = %self.model,
            tokens = summary.usage.total(),
            "TLDR generated"
        );
        Ok(summary)
    }
}

/// Turn a 200 response into a Summary, surfacing safety blocks as
/// `InvalidContent` so the caller knows not to retry.
fn summary_from_response(parsed: GenerateResponse) -> Result<Summary> {
    if let Some(feedback) = &parsed.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(GeminiError::InvalidContent(format!(
                "Prompt blocked: {reason}"
            )));
        }
    }

    let usage = parsed
        .usage_metadata
        .as_ref()
        .map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
            cost_usd: estimate_cost(u.prompt_token_count, u.candidates_token_count),
        })
        .unwrap_or_default();

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GeminiError::InvalidContent("No candidates returned".into()))?;

    if matches!(
        candidate.finish_reason.as_deref(),
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST")
    ) {
        return Err(GeminiError::InvalidContent(format!(
            "Generation stopped: {}",
            candidate.finish_reason.unwrap_or_default()
        )));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
        .unwrap_or_default()
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(GeminiError::InvalidContent("Empty response text".into()));
    }

    Ok(Summary { text, usage })
}

fn estimate_cost(input_tokens: u64, output_tokens: u64) -> f64 {
    (input_tokens as f64 * INPUT_COST_PER_MTOK + output_tokens as f64 * OUTPUT_COST_PER_MTOK)
        / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_estimate_uses_flash_pricing() {
        // 1M input + 1M output = $0.10 + $0.40
        assert!((estimate_cost(1_000_000, 1_000_000) - 0.50).abs() < 1e-12);
        assert!((estimate_cost(1000, 500) - 0.0003).abs() < 1e-12);
        assert_eq!(estimate_cost(0, 0), 0.0);
    }

    #[test]
    fn response_with_text_and_usage_parses() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "  A tight summary.  "}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 900, "candidatesTokenCount": 80}
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let summary = summary_from_response(parsed).unwrap();

        assert_eq!(summary.text, "A tight summary.");
        assert_eq!(summary.usage.input_tokens, 900);
        assert_eq!(summary.usage.output_tokens, 80);
        assert_eq!(summary.usage.total(), 980);
        assert!(summary.usage.cost_usd > 0.0);
    }

    #[test]
    fn blocked_prompt_is_invalid_content() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}, "candidates": []}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            summary_from_response(parsed),
            Err(GeminiError::InvalidContent(_))
        ));
    }

    #[test]
    fn safety_finish_reason_is_invalid_content() {
        let raw = r#"{"candidates": [{"content": null, "finishReason": "SAFETY"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            summary_from_response(parsed),
            Err(GeminiError::InvalidContent(_))
        ));
    }

    #[test]
    fn empty_candidates_is_invalid_content() {
        let raw = r#"{"candidates": []}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            summary_from_response(parsed),
            Err(GeminiError::InvalidContent(_))
        ));
    }
}
