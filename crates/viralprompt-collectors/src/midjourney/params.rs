//! Parsing of Midjourney command strings (`<prompt> --ar 16:9 --v 6`).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

static FIRST_FLAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)--\S").expect("valid flag regex"));

static DISCORD_PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid discord prompt regex"));

/// A command split into its base prompt and `--flag value` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub prompt: String,
    pub parameters: Map<String, Value>,
}

impl ParsedCommand {
    /// `v6` for `--v 6`, `niji 5` for `--niji 5`.
    #[must_use]
    pub fn model_version(&self) -> Option<String> {
        if let Some(niji) = self.parameters.get("niji") {
            return Some(match niji {
                Value::String(v) => format!("niji {v}"),
                _ => "niji".to_string(),
            });
        }
        match self.parameters.get("version") {
            Some(Value::String(v)) => Some(format!("v{v}")),
            _ => None,
        }
    }
}

fn canonical_key(flag: &str) -> &str {
    match flag {
        "v" | "version" => "version",
        "ar" | "aspect" => "aspect_ratio",
        "c" | "chaos" => "chaos",
        "s" | "stylize" => "stylize",
        "q" | "quality" => "quality",
        other => other,
    }
}

fn numeric(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Value::Number(n.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn flag_value(key: &str, raw: Option<String>) -> Value {
    let Some(raw) = raw else {
        return Value::Bool(true);
    };
    match key {
        // Versions stay strings so "5.2" and "6" compare the same way.
        "version" | "niji" | "aspect_ratio" => Value::String(raw),
        "chaos" | "stylize" | "quality" | "seed" | "weird" | "iw" => {
            numeric(&raw).unwrap_or(Value::String(raw))
        }
        _ => Value::String(raw),
    }
}

/// Split `command` at its first `--flag`. Flags without a value become
/// `true`; multi-word values (`--no text watermark`) are joined with spaces.
#[must_use]
pub fn parse_command(command: &str) -> ParsedCommand {
    let split_at = FIRST_FLAG_RE
        .find(command)
        .map_or(command.len(), |m| m.start());
    let prompt = command[..split_at].trim().to_string();

    let mut parameters = Map::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    for token in command[split_at..].split_whitespace() {
        if let Some(flag) = token.strip_prefix("--").filter(|f| !f.is_empty()) {
            if let Some((key, words)) = current.take() {
                let raw = (!words.is_empty()).then(|| words.join(" "));
                parameters.insert(key.clone(), flag_value(&key, raw));
            }
            current = Some((canonical_key(flag).to_string(), Vec::new()));
        } else if let Some((_, words)) = current.as_mut() {
            words.push(token);
        }
    }
    if let Some((key, words)) = current {
        let raw = (!words.is_empty()).then(|| words.join(" "));
        parameters.insert(key.clone(), flag_value(&key, raw));
    }

    ParsedCommand { prompt, parameters }
}

/// The bold prompt in a Midjourney bot message: `**prompt** - <@user>`.
#[must_use]
pub fn extract_discord_prompt(message: &str) -> Option<String> {
    DISCORD_PROMPT_RE
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty())
}
