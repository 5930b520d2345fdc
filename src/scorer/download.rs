// Model download helper.
//
// Fetches the per-locale files a backend needs from a base URL
// (BADWORD_MODEL_URL) into the model directory. Files are stored in a
// platform-appropriate directory (~/.local/share/badword/models/ on Linux)
// unless BADWORD_MODEL_DIR overrides it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::ModelStore;
use crate::config::ScorerBackend;
use crate::locale::Locale;

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/badword/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("badword")
        .join("models")
}

/// URL of a single resource under `base_url`.
pub fn resource_url(base_url: &str, file: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file)
}

/// Download every file the backend needs for each locale.
///
/// Skips files that already exist. Returns the number of files fetched.
pub async fn download_models(
    store: &ModelStore,
    backend: &ScorerBackend,
    locales: &[Locale],
    base_url: &str,
) -> Result<usize> {
    let dir = store.dir();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let client = reqwest::Client::new();
    let mut fetched = 0;

    for &locale in locales {
        println!("\n{locale}:");
        for file in store.required_files(backend, locale) {
            let dest = dir.join(&file);
            if dest.exists() {
                info!(file = %file, "Model file already exists, skipping");
                println!("  {file} (already exists)");
                continue;
            }

            println!("  Downloading {file}...");
            download_file(&client, &resource_url(base_url, &file), &dest).await?;
            fetched += 1;
        }
    }

    Ok(fetched)
}

/// Download a single file from a URL to a local path with a progress bar.
async fn download_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        }
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;
    pb.set_position(bytes.len() as u64);

    let written = write_atomically(dest, &bytes);
    pb.finish_and_clear();
    written?;

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

/// Sibling path a download is staged in before it is renamed into place.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Write `bytes` to `dest` so that `dest` only ever appears complete.
///
/// The data goes to a `.part` file first and is renamed over `dest`. On
/// failure the `.part` file is removed and `dest` is left untouched.
fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let part = part_path(dest);
    let result = std::fs::write(&part, bytes)
        .with_context(|| format!("Failed to write {}", part.display()))
        .and_then(|()| {
            std::fs::rename(&part, dest).with_context(|| {
                format!("Failed to move {} to {}", part.display(), dest.display())
            })
        });

    if result.is_err() && part.exists() {
        if let Err(e) = std::fs::remove_file(&part) {
            warn!(path = %part.display(), error = %e, "Failed to remove partial download");
        }
    }
    result
}
