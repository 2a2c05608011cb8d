use std::fmt::Write as _;

use viralprompt_collectors::{write_guide, write_results, RunSummary};
use viralprompt_core::{AppConfig, Platform, SocialPost};

const TOP_N: usize = 5;
const PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

/// One block per record: heading, engagement, URL, and prompt if any.
pub(super) fn top_lines(records: &[SocialPost], n: usize) -> Vec<String> {
    records
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, r)| {
            let heading = r
                .text_fields
                .title
                .as_deref()
                .unwrap_or(&r.text_fields.body);
            let e = &r.engagement;
            let mut block = format!(
                "{}. {}\n   views: {} | likes: {} | comments: {} | shares: {}\n   url: {}",
                i + 1,
                preview(heading),
                e.views,
                e.likes,
                e.comments,
                e.shares,
                r.url
            );
            if let Some(prompt) = r.extracted_prompt.as_deref() {
                let _ = write!(block, "\n   prompt: {}", preview(prompt));
            }
            block
        })
        .collect()
}

/// Save `records` under the platform's stem and print the run summary and
/// top results. Nothing is written when there are no records.
pub(super) fn print_summary(
    config: &AppConfig,
    platform: Platform,
    records: &[SocialPost],
) -> anyhow::Result<()> {
    if records.is_empty() {
        println!("{platform}: no matching posts found");
        return Ok(());
    }

    let path = write_results(&config.output_dir, platform.output_stem(), records)?;
    let summary = RunSummary::from_records(records);

    println!("{platform}: saved {} records to {}", summary.total, path.display());
    println!("  with prompts:  {}", summary.with_prompts);
    println!("  total likes:   {}", summary.total_likes);
    println!("  average likes: {}", summary.average_likes);
    println!("\nTop {TOP_N}:");
    for line in top_lines(records, TOP_N) {
        println!("{line}");
    }
    Ok(())
}

pub(super) fn save_guide(config: &AppConfig, file_name: &str, text: &str) -> anyhow::Result<()> {
    println!("{text}");
    let path = write_guide(&config.output_dir, file_name, text)?;
    println!("guide saved to {}", path.display());
    Ok(())
}
