//! Persona file output

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the persona file for `username` under `dir`
pub fn persona_path(dir: &Path, username: &str) -> PathBuf {
    dir.join(format!("{}_persona.txt", username))
}

/// Write `content` to the user's persona file, replacing any earlier run
pub fn save_output(dir: &Path, username: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = persona_path(dir, username);
    fs::write(&path, content).with_context(|| format!("Failed to write persona file: {}", path.display()))?;

    log::info!("Wrote {} bytes to {}", content.len(), path.display());
    println!("\n{} Persona saved to: {}", "✓".green(), path.display());
    Ok(path)
}
