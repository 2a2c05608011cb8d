use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::KeywordClassifier;
use crate::error::ExtractError;
use crate::extractor::{ExtractorSpec, PromptExtractor};

/// Tool and platform names that flag a video or tweet as AI-generated.
pub const REEL_KEYWORDS: &[&str] = &[
    "AI generated",
    "AI video",
    "midjourney",
    "runway",
    "pika labs",
    "gen-2",
    "gen-3",
    "stable diffusion video",
    "text to video",
    "AI animation",
    "AI art",
    "dall-e",
    "sora",
    "luma ai",
    "kling ai",
    "haiper",
    "pixverse",
    "synthesia",
    "d-id",
    "fliki",
    "invideo ai",
    "veed ai",
    "pictory",
    "deepbrain ai",
    "hour one",
];

/// Shorter list used on Instagram captions and hashtags.
pub const CAPTION_KEYWORDS: &[&str] = &[
    "ai generated",
    "ai art",
    "runway",
    "midjourney",
    "stable diffusion",
    "pika",
    "sora",
    "luma",
    "kling",
    "haiper",
    "gen-2",
    "gen-3",
    "text to video",
    "ai video",
    "ai animation",
];

/// Patterns for video descriptions and tweet text.
pub const DESCRIPTION_PATTERNS: &[&str] = &[
    r#"prompt[:\s]+["'](.+?)["']"#,
    r"prompt[:\s]+(.+?)(?:\n|$)",
    r"used prompt[:\s]+(.+?)(?:\n|$)",
    r"generated with[:\s]+(.+?)(?:\n|$)",
    r"made with prompt[:\s]+(.+?)(?:\n|$)",
    r#"["'](.+?)["'](?:\s+in\s+(?:runway|midjourney|pika|sora))"#,
];

/// Patterns for Instagram captions, where hashtags usually trail the prompt.
pub const CAPTION_PATTERNS: &[&str] = &[
    r#"prompt[:\s]+["'](.+?)["']"#,
    r"prompt[:\s]+(.+?)(?:\n|#|$)",
    r#"used[:\s]+["'](.+?)["']"#,
    r"generated with[:\s]+(.+?)(?:\n|#|$)",
    r#""([^"]{30,250})""#,
];

const CAPTION_MIN_LENGTH: usize = 10;

/// Which extractor/classifier pair a collector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `YouTube` descriptions and tweets: no hashtag stripping, any
    /// non-empty capture accepted.
    Description,
    /// Instagram captions: trailing hashtags stripped, captures must be
    /// longer than 10 characters.
    Caption,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// On-disk shape of the heuristics YAML. Omitted keys keep the built-in
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsFile {
    pub reel_keywords: Vec<String>,
    pub caption_keywords: Vec<String>,
    pub description: ExtractorSpec,
    pub caption: ExtractorSpec,
}

impl Default for HeuristicsFile {
    fn default() -> Self {
        Self {
            reel_keywords: owned(REEL_KEYWORDS),
            caption_keywords: owned(CAPTION_KEYWORDS),
            description: ExtractorSpec {
                patterns: owned(DESCRIPTION_PATTERNS),
                strip_hashtags: false,
                min_length: 0,
                fall_through: false,
            },
            caption: ExtractorSpec {
                patterns: owned(CAPTION_PATTERNS),
                strip_hashtags: true,
                min_length: CAPTION_MIN_LENGTH,
                fall_through: true,
            },
        }
    }
}

/// Compiled classifiers and extractors, injected into every collector.
#[derive(Debug, Clone)]
pub struct Heuristics {
    reel_keywords: KeywordClassifier,
    caption_keywords: KeywordClassifier,
    description: PromptExtractor,
    caption: PromptExtractor,
}

impl Heuristics {
    /// Compile a heuristics file.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if any pattern is invalid.
    pub fn from_file(file: &HeuristicsFile) -> Result<Self, ExtractError> {
        Ok(Self {
            reel_keywords: KeywordClassifier::new(&file.reel_keywords),
            caption_keywords: KeywordClassifier::new(&file.caption_keywords),
            description: PromptExtractor::new(&file.description)?,
            caption: PromptExtractor::new(&file.caption)?,
        })
    }

    /// The built-in keyword and pattern lists.
    ///
    /// # Panics
    ///
    /// Does not panic: the built-in patterns are covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_file(&HeuristicsFile::default()).expect("built-in heuristics compile")
    }

    #[must_use]
    pub fn classifier(&self, variant: Variant) -> &KeywordClassifier {
        match variant {
            Variant::Description => &self.reel_keywords,
            Variant::Caption => &self.caption_keywords,
        }
    }

    #[must_use]
    pub fn extractor(&self, variant: Variant) -> &PromptExtractor {
        match variant {
            Variant::Description => &self.description,
            Variant::Caption => &self.caption,
        }
    }

    #[must_use]
    pub fn is_ai_related(&self, variant: Variant, text: &str) -> bool {
        self.classifier(variant).is_ai_related(text)
    }

    #[must_use]
    pub fn extract_prompt(&self, variant: Variant, text: &str) -> Option<String> {
        self.extractor(variant).extract(text)
    }
}

impl Default for Heuristics {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load heuristics from a YAML file, falling back to built-ins for any key
/// the file omits.
///
/// # Errors
///
/// Returns [`ExtractError`] if the file cannot be read or parsed, or a
/// pattern does not compile.
pub fn load_heuristics(path: &Path) -> Result<Heuristics, ExtractError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ExtractError::HeuristicsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
    let file: HeuristicsFile = serde_yaml::from_str(&content)?;
    Heuristics::from_file(&file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_compiles_every_pattern() {
        let h = Heuristics::builtin();
        assert_eq!(
            h.extractor(Variant::Description).pattern_count(),
            DESCRIPTION_PATTERNS.len()
        );
        assert_eq!(
            h.extractor(Variant::Caption).pattern_count(),
            CAPTION_PATTERNS.len()
        );
    }

    #[test]
    fn variants_use_distinct_keyword_lists() {
        let h = Heuristics::builtin();
        // "pixverse" is only in the reel list, "luma" alone only in captions.
        assert!(h.is_ai_related(Variant::Description, "Pixverse clip"));
        assert!(!h.is_ai_related(Variant::Caption, "Pixverse clip"));
        assert!(h.is_ai_related(Variant::Caption, "made with luma"));
        assert!(!h.is_ai_related(Variant::Description, "made with luma"));
    }

    #[test]
    fn yaml_overrides_only_named_keys() {
        let yaml = "reel_keywords: [\"banana\"]\n";
        let file: HeuristicsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.reel_keywords, vec!["banana".to_string()]);
        assert_eq!(file.caption_keywords.len(), CAPTION_KEYWORDS.len());
        assert_eq!(file.caption.min_length, CAPTION_MIN_LENGTH);

        let h = Heuristics::from_file(&file).unwrap();
        assert!(h.is_ai_related(Variant::Description, "Banana split"));
        assert!(!h.is_ai_related(Variant::Description, "midjourney"));
    }

    #[test]
    fn description_stops_at_first_matching_pattern() {
        let h = Heuristics::builtin();
        assert!(h
            .extract_prompt(Variant::Description, "prompt: \" \" in runway")
            .is_none());
    }

    #[test]
    fn caption_skips_short_capture() {
        let h = Heuristics::builtin();
        assert_eq!(
            h.extract_prompt(
                Variant::Caption,
                "prompt: \"fox\"\ngenerated with: a paper fox folding itself #ai"
            )
            .as_deref(),
            Some("a paper fox folding itself")
        );
    }

    #[test]
    fn yaml_extractor_override() {
        let yaml = r#"
description:
  patterns: ['recipe:\s*(.+)$']
"#;
        let file: HeuristicsFile = serde_yaml::from_str(yaml).unwrap();
        assert!(!file.description.strip_hashtags);
        assert_eq!(file.description.min_length, 0);
        let h = Heuristics::from_file(&file).unwrap();
        assert_eq!(
            h.extract_prompt(Variant::Description, "Recipe: pixel art fox")
                .as_deref(),
            Some("pixel art fox")
        );
        assert!(h
            .extract_prompt(Variant::Description, "prompt: \"not used\"")
            .is_none());
    }

    #[test]
    fn invalid_yaml_pattern_surfaces_error() {
        let file = HeuristicsFile {
            caption: ExtractorSpec {
                patterns: vec!["([".to_string()],
                strip_hashtags: true,
                min_length: 10,
                fall_through: true,
            },
            ..HeuristicsFile::default()
        };
        assert!(matches!(
            Heuristics::from_file(&file),
            Err(ExtractError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_heuristics(Path::new("/nonexistent/heuristics.yaml")).unwrap_err();
        assert!(matches!(err, ExtractError::HeuristicsFileIo { .. }));
    }
}
