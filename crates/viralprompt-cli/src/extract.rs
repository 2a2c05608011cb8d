//! `extract` command: try the heuristics on ad-hoc text.

use viralprompt_extract::{Heuristics, Variant};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ExtractReport {
    pub(crate) prompt: Option<String>,
    pub(crate) ai_related: bool,
}

pub(crate) fn analyse(heuristics: &Heuristics, variant: Variant, text: &str) -> ExtractReport {
    ExtractReport {
        prompt: heuristics.extract_prompt(variant, text),
        ai_related: heuristics.is_ai_related(variant, text),
    }
}

pub(crate) fn run_extract(heuristics: &Heuristics, variant: Variant, text: &str) {
    let report = analyse(heuristics, variant, text);
    match &report.prompt {
        Some(prompt) => println!("prompt: {prompt}"),
        None => println!("prompt: (none)"),
    }
    println!("ai-related: {}", report.ai_related);
}
