//! Persona text generation

pub mod huggingface;

use eyre::Result;
use serde::Serialize;

use crate::config::GenerationConfig;

pub use huggingface::HuggingFaceGenerator;

/// Sampling parameters passed with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    /// Maximum total length in tokens, prompt included
    pub max_length: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_length: config.max_length,
            do_sample: config.do_sample,
            temperature: config.temperature,
        }
    }
}

/// A text-generation backend
pub trait Generator {
    /// Generate text for `prompt`, returning the first candidate only
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}
