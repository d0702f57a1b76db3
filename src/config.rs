use colored::*;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main reddit-persona configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub fetch: FetchConfig,
    pub reddit: RedditConfig,
    pub generation: GenerationConfig,
    pub prompt: PromptConfig,
    pub citations: CitationConfig,
    pub output: OutputConfig,
}

/// Log verbosity, overridden by RUST_LOG when set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Most-recent submissions and comments to request, each
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedditConfig {
    /// Token endpoint for the app-only credential exchange
    pub auth_url: String,
    /// Base URL for authenticated API calls
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Inference endpoint; the model name is appended as a path segment
    pub endpoint: String,
    pub model: String,
    pub max_length: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptConfig {
    pub header: String,
    pub cue: String,
    pub max_posts: usize,
    pub max_comments: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CitationConfig {
    /// Trait keywords, cited in this order
    pub traits: Vec<String>,
    /// Characters of source text quoted per citation
    pub snippet_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { limit: 30 }
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://www.reddit.com/api/v1/access_token".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            model: "gpt2".to_string(),
            max_length: 700,
            do_sample: true,
            temperature: 0.7,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            header: "Based on the following Reddit posts and comments, generate a detailed user persona:".to_string(),
            cue: "User Persona:".to_string(),
            max_posts: 10,
            max_comments: 10,
        }
    }
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            traits: ["interest", "personality", "location", "profession"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            snippet_chars: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("personas"),
        }
    }
}

/// Report a config file that was found but skipped.
///
/// Config loads before logging is set up, so the warning also goes to stderr.
fn warn_skipped(source: &str, err: &eyre::Report) -> String {
    let message = format!("Ignoring config from {}: {:#}", source, err);
    log::warn!("{}", message);
    eprintln!("{} {}", "⚠".yellow(), message);
    message
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load() -> Result<Self> {
        // Check REDDIT_PERSONA_CONFIG env var
        if let Ok(env_path) = std::env::var("REDDIT_PERSONA_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn_skipped("REDDIT_PERSONA_CONFIG", &e);
                    }
                }
            }
        }

        // Try ~/.config/reddit-persona/reddit-persona.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("reddit-persona").join("reddit-persona.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn_skipped(&path.display().to_string(), &e);
                    }
                }
            }
        }

        // Try ./reddit-persona.yaml
        let local_config = PathBuf::from("reddit-persona.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    warn_skipped(&local_config.display().to_string(), &e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Output directory with ~ and env vars expanded
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.dir)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
