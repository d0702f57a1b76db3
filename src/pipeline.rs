//! End-to-end persona run: extract, fetch, prompt, generate, cite, save

use colored::*;
use eyre::{Context, Result};
use std::path::PathBuf;

use crate::citation::cite_sources;
use crate::config::Config;
use crate::generate::{GenerationParams, Generator};
use crate::identity::extract_username;
use crate::output::save_output;
use crate::prompt::build_prompt;
use crate::reddit::Fetcher;

/// Result of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing fetched, no file written
    NoData { username: String },
    /// Persona written to `path`
    Saved { username: String, path: PathBuf },
}

/// Runs the persona pipeline against injected collaborators
pub struct PersonaBuilder<'a, F: Fetcher, G: Generator> {
    fetcher: F,
    generator: G,
    config: &'a Config,
}

impl<'a, F: Fetcher, G: Generator> PersonaBuilder<'a, F, G> {
    pub fn new(fetcher: F, generator: G, config: &'a Config) -> Self {
        Self {
            fetcher,
            generator,
            config,
        }
    }

    /// Build and save a persona for a profile URL or username
    pub fn run(&self, target: &str) -> Result<Outcome> {
        let username = extract_username(target);
        log::info!("Building persona for u/{} (input: {})", username, target);

        let activity = self
            .fetcher
            .fetch(&username, self.config.fetch.limit)
            .with_context(|| format!("Failed to fetch activity for u/{}", username))?;

        if activity.is_empty() {
            log::info!("No activity found for u/{}", username);
            println!("{} No posts/comments found.", "[-]".red());
            return Ok(Outcome::NoData { username });
        }

        let prompt = build_prompt(&activity.posts, &activity.comments, &self.config.prompt);
        log::debug!("Prompt is {} chars", prompt.chars().count());

        let params = GenerationParams::from(&self.config.generation);
        let persona = self
            .generator
            .generate(&prompt, &params)
            .context("Failed to generate persona")?;

        let citations = cite_sources(&persona, &activity.posts, &activity.comments, &self.config.citations);

        let path = save_output(&self.config.output_dir(), &username, &format!("{}{}", persona, citations))?;
        Ok(Outcome::Saved { username, path })
    }
}
