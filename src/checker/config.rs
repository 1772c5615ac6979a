use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checker::tokenizer::{DEFAULT_TOKENIZE_CHAR_CAP, DEFAULT_TOKEN_CACHE_CAPACITY};
use crate::error::{CheckError, Result};
use crate::utils::normalizer::DEFAULT_MAX_TEXT_CHARS;

/// Entries kept by the full-pipeline cache
pub const DEFAULT_PREPROCESS_CACHE_CAPACITY: usize = 256;
/// Characters read per chunk by the large-file variant
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Which segmenter the tokenizer starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// jieba dictionary segmentation, CJK runs as fallback
    #[default]
    Dictionary,
    /// CJK runs only
    CjkRuns,
}

/// How batch preprocessing is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Execution {
    #[default]
    Sequential,
    /// Fan out over a rayon pool; `None` uses one thread per core
    Parallel { threads: Option<usize> },
}

/// Checker configuration
///
/// # Examples
/// ```
/// use plagiarism_checker::CheckerConfig;
/// let config = CheckerConfig::from_toml_str(r#"
///     chunk_size = 2000
///     segmenter = "cjk_runs"
///     [execution]
///     mode = "parallel"
///     threads = 4
/// "#).unwrap();
/// assert_eq!(config.chunk_size, 2000);
/// assert_eq!(config.max_text_chars, 5_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub max_text_chars: usize,
    pub tokenize_char_cap: usize,
    pub token_cache_capacity: usize,
    pub preprocess_cache_capacity: usize,
    pub chunk_size: usize,
    pub segmenter: SegmenterKind,
    pub execution: Execution,
    /// JSON object of canonical word to synonym list; built-in table if unset
    pub synonym_file: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            tokenize_char_cap: DEFAULT_TOKENIZE_CHAR_CAP,
            token_cache_capacity: DEFAULT_TOKEN_CACHE_CAPACITY,
            preprocess_cache_capacity: DEFAULT_PREPROCESS_CACHE_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            segmenter: SegmenterKind::default(),
            execution: Execution::default(),
            synonym_file: None,
        }
    }
}

impl CheckerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: CheckerConfig =
            toml::from_str(toml_str).map_err(|e| CheckError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CheckError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Reject limits that would make the pipeline meaningless
    pub fn validate(&self) -> Result<()> {
        let non_zero = [
            ("max_text_chars", self.max_text_chars),
            ("tokenize_char_cap", self.tokenize_char_cap),
            ("token_cache_capacity", self.token_cache_capacity),
            ("preprocess_cache_capacity", self.preprocess_cache_capacity),
            ("chunk_size", self.chunk_size),
        ];
        if let Some((name, _)) = non_zero.iter().find(|(_, v)| *v == 0) {
            return Err(CheckError::Config(format!("{name} must be greater than 0")));
        }
        if let Execution::Parallel { threads: Some(0) } = self.execution {
            return Err(CheckError::Config(
                "execution.threads must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = CheckerConfig::default();
        assert_eq!(config.max_text_chars, 5_000_000);
        assert_eq!(config.tokenize_char_cap, 10_000);
        assert_eq!(config.token_cache_capacity, 512);
        assert_eq!(config.preprocess_cache_capacity, 256);
        assert_eq!(config.chunk_size, 10_000);
        assert_eq!(config.execution, Execution::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CheckerConfig::from_toml_str("").unwrap(), CheckerConfig::default());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = CheckerConfig::from_toml_str("chunk_size = 0").unwrap_err();
        assert!(matches!(err, CheckError::Config(ref m) if m.contains("chunk_size")));
        let err = CheckerConfig::from_toml_str(
            "[execution]\nmode = \"parallel\"\nthreads = 0",
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CheckerConfig::from_toml_str("fusion_weight = 0.9").is_err());
    }

    #[test]
    fn parallel_without_threads() {
        let config = CheckerConfig::from_toml_str("[execution]\nmode = \"parallel\"").unwrap();
        assert_eq!(config.execution, Execution::Parallel { threads: None });
    }
}
