//! Persisting run results and collection guides.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use viralprompt_core::SocialPost;

use crate::error::CollectorError;

/// `<stem>_<YYYYMMDD_HHMMSS>.json`
#[must_use]
pub fn results_file_name(stem: &str, at: DateTime<Local>) -> String {
    format!("{stem}_{}.json", at.format("%Y%m%d_%H%M%S"))
}

fn ensure_dir(dir: &Path) -> Result<(), CollectorError> {
    std::fs::create_dir_all(dir).map_err(|e| CollectorError::Io {
        path: dir.display().to_string(),
        source: e,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CollectorError> {
    std::fs::write(path, contents).map_err(|e| CollectorError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write `records` as a pretty-printed JSON array into a timestamped file
/// under `dir`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`CollectorError::Io`] if the directory or file cannot be written.
pub fn write_results(
    dir: &Path,
    stem: &str,
    records: &[SocialPost],
) -> Result<PathBuf, CollectorError> {
    ensure_dir(dir)?;
    let path = dir.join(results_file_name(stem, Local::now()));
    let json = serde_json::to_string_pretty(records)?;
    write_file(&path, &json)?;
    tracing::info!(path = %path.display(), count = records.len(), "saved results");
    Ok(path)
}

/// Write a plain-text collection guide to `dir/file_name`.
///
/// # Errors
///
/// Returns [`CollectorError::Io`] if the directory or file cannot be written.
pub fn write_guide(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf, CollectorError> {
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    write_file(&path, text)?;
    tracing::info!(path = %path.display(), "saved guide");
    Ok(path)
}

/// Totals printed after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub with_prompts: usize,
    pub total_likes: u64,
    pub average_likes: u64,
}

impl RunSummary {
    #[must_use]
    pub fn from_records(records: &[SocialPost]) -> Self {
        let total = records.len();
        let with_prompts = records
            .iter()
            .filter(|r| r.extracted_prompt.as_deref().is_some_and(|p| !p.is_empty()))
            .count();
        let total_likes: u64 = records.iter().map(|r| r.engagement.likes).sum();
        let average_likes = u64::try_from(total)
            .ok()
            .filter(|&n| n > 0)
            .map_or(0, |n| total_likes / n);

        Self {
            total,
            with_prompts,
            total_likes,
            average_likes,
        }
    }
}
