//! Ordered-regex prompt extraction.
//!
//! Patterns are tried in declaration order against the whole text with
//! case-insensitive, multiline matching. The first pattern whose capture
//! survives post-processing wins; there is no best-match scoring.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

static TRAILING_HASHTAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*#\w+.*$").expect("valid hashtag regex"));

/// Uncompiled description of an extractor variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSpec {
    /// Regexes with at least one capturing group; group 1 is the prompt.
    pub patterns: Vec<String>,
    /// Drop a trailing `#tag ...` run from the capture.
    #[serde(default)]
    pub strip_hashtags: bool,
    /// Captures of this many characters or fewer are rejected.
    #[serde(default)]
    pub min_length: usize,
    /// Try the next pattern after a rejected capture instead of giving up.
    #[serde(default)]
    pub fall_through: bool,
}

#[derive(Debug, Clone)]
pub struct PromptExtractor {
    patterns: Vec<Regex>,
    strip_hashtags: bool,
    min_length: usize,
    fall_through: bool,
}

impl PromptExtractor {
    /// Compile an [`ExtractorSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPattern`] if a pattern does not compile
    /// and [`ExtractError::MissingCaptureGroup`] if it has no group to return.
    pub fn new(spec: &ExtractorSpec) -> Result<Self, ExtractError> {
        let patterns = spec
            .patterns
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            strip_hashtags: spec.strip_hashtags,
            min_length: spec.min_length,
            fall_through: spec.fall_through,
        })
    }

    /// Recover a prompt from free text, or `None` if nothing usable matches.
    ///
    /// A capture that is empty or too short after trimming (and hashtag
    /// stripping, when enabled) is rejected. With `fall_through` the next
    /// pattern is tried; otherwise the first matching pattern decides.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        for re in &self.patterns {
            let Some(capture) = re.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };

            let mut prompt = capture.as_str().trim().to_string();
            if self.strip_hashtags {
                prompt = TRAILING_HASHTAGS_RE.replace_all(&prompt, "").into_owned();
            }

            if prompt.chars().count() > self.min_length {
                return Some(prompt);
            }
            if !self.fall_through {
                return None;
            }
        }

        None
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn compile(pattern: &str) -> Result<Regex, ExtractError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|source| ExtractError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

    // captures_len counts the implicit whole-match group.
    if re.captures_len() < 2 {
        return Err(ExtractError::MissingCaptureGroup(pattern.to_string()));
    }

    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(patterns: &[&str], strip_hashtags: bool, min_length: usize) -> ExtractorSpec {
        ExtractorSpec {
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            strip_hashtags,
            min_length,
            fall_through: false,
        }
    }

    #[test]
    fn first_declared_pattern_wins_over_longer_match() {
        let extractor = PromptExtractor::new(&spec(
            &[r"short:\s*(\w+)", r"long:\s*(.+)$"],
            false,
            0,
        ))
        .unwrap();
        let text = "long: a very long and detailed prompt\nshort: tiny";
        assert_eq!(extractor.extract(text).as_deref(), Some("tiny"));
    }

    #[test]
    fn short_capture_falls_through_to_next_pattern() {
        let extractor = PromptExtractor::new(&ExtractorSpec {
            fall_through: true,
            ..spec(&[r"a:\s*(\w+)", r"b:\s*(.+)$"], false, 10)
        })
        .unwrap();
        let text = "a: tiny\nb: neon koi fish swimming in the clouds";
        assert_eq!(
            extractor.extract(text).as_deref(),
            Some("neon koi fish swimming in the clouds")
        );
    }

    #[test]
    fn rejected_capture_stops_without_fall_through() {
        let extractor =
            PromptExtractor::new(&spec(&[r#"p:\s*"(.*?)""#, r"(.+)$"], false, 0)).unwrap();
        assert!(extractor.extract("p: \" \" and more").is_none());
    }

    #[test]
    fn trailing_hashtags_are_stripped_when_enabled() {
        let extractor =
            PromptExtractor::new(&spec(&[r"prompt[:\s]+(.+)$"], true, 0)).unwrap();
        assert_eq!(
            extractor
                .extract("prompt: castle in the fog #aiart #midjourney")
                .as_deref(),
            Some("castle in the fog")
        );
    }

    #[test]
    fn hashtags_are_kept_when_stripping_disabled() {
        let extractor =
            PromptExtractor::new(&spec(&[r"prompt[:\s]+(.+)$"], false, 0)).unwrap();
        assert_eq!(
            extractor.extract("prompt: castle in the fog #aiart").as_deref(),
            Some("castle in the fog #aiart")
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_multiline() {
        let extractor =
            PromptExtractor::new(&spec(&[r"^PROMPT:\s*(.+?)$"], false, 0)).unwrap();
        let text = "great clip\nprompt: dancing robots\nfollow for more";
        assert_eq!(extractor.extract(text).as_deref(), Some("dancing robots"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = PromptExtractor::new(&spec(&["prompt: (unclosed"], false, 0)).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let err = PromptExtractor::new(&spec(&["prompt: .+"], false, 0)).unwrap_err();
        assert!(matches!(err, ExtractError::MissingCaptureGroup(_)));
    }

    #[test]
    fn empty_text_is_absent() {
        let extractor = PromptExtractor::new(&spec(&[r"(.+)"], false, 0)).unwrap();
        assert!(extractor.extract("").is_none());
    }
}
