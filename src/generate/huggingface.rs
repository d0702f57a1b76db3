//! Hugging Face inference API backend

use colored::*;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{GenerationParams, Generator};
use crate::config::GenerationConfig;

/// Inference API request structures
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

/// `max_length` is sent as the total-length cap the local pipeline uses.
/// Endpoints that only honor `max_new_tokens` fall back to their own default.
#[derive(Debug, Serialize)]
struct InferenceParameters {
    #[serde(flatten)]
    sampling: GenerationParams,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Inference API response structures
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Candidates(Vec<Candidate>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct Candidate {
    generated_text: String,
}

/// Text generator backed by a hosted pretrained model
pub struct HuggingFaceGenerator {
    url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceGenerator {
    pub fn new(config: &GenerationConfig, api_token: Option<String>) -> Self {
        Self {
            url: format!("{}/{}", config.endpoint.trim_end_matches('/'), config.model),
            model: config.model.clone(),
            api_token,
        }
    }

    /// Build from config, picking up `HF_API_TOKEN` when present
    pub fn from_env(config: &GenerationConfig) -> Self {
        let api_token = std::env::var("HF_API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        if api_token.is_none() {
            log::info!("HF_API_TOKEN not set, calling inference API anonymously");
        }
        Self::new(config, api_token)
    }
}

impl Generator for HuggingFaceGenerator {
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        println!("\n{} Generating persona using {}...", "[+]".blue(), self.model.cyan());
        log::info!(
            "Generating with {}, max_length={}, temperature={}, prompt_chars={}",
            self.model,
            params.max_length,
            params.temperature,
            prompt.chars().count()
        );

        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                sampling: *params,
                return_full_text: true,
            },
            options: InferenceOptions { wait_for_model: true },
        };
        let request_body = serde_json::to_string(&request).context("Failed to serialize request")?;

        let mut builder = ureq::post(&self.url).header("Content-Type", "application/json");
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let mut response = builder
            .send(request_body.as_bytes())
            .context("Failed to call inference API")?;

        let response_body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read response")?;

        first_candidate(&response_body)
    }
}

fn first_candidate(body: &str) -> Result<String> {
    let response: InferenceResponse = serde_json::from_str(body).context("Failed to parse inference response")?;
    match response {
        InferenceResponse::Candidates(candidates) => candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| eyre::eyre!("No generated text in inference response")),
        InferenceResponse::Error { error } => eyre::bail!("Inference API error: {}", error),
    }
}
