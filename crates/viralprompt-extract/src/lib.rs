//! Heuristics for spotting AI-generated posts and recovering their prompts.
//!
//! Two pieces: a substring keyword classifier and an ordered-regex prompt
//! extractor. Both are built from a [`Heuristics`] value so the keyword and
//! pattern lists can be swapped through a YAML file or in tests.

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod heuristics;

pub use classifier::KeywordClassifier;
pub use error::ExtractError;
pub use extractor::{ExtractorSpec, PromptExtractor};
pub use heuristics::{load_heuristics, Heuristics, HeuristicsFile, Variant};
