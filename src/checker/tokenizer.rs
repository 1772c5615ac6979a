use std::sync::{Arc, Mutex};

use jieba_rs::Jieba;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CheckError, Result};
use crate::utils::datastruct::lru::{CacheStats, LruCache};
use crate::utils::normalizer::truncate_chars;

/// Characters segmented per call; longer input is cut to this length
pub const DEFAULT_TOKENIZE_CHAR_CAP: usize = 10_000;
/// Entries kept by the raw tokenization cache
pub const DEFAULT_TOKEN_CACHE_CAPACITY: usize = 512;

static CJK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4e00}-\x{9fa5}]+").expect("static cjk pattern"));

static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Shared token sequence
pub type Tokens = Arc<[String]>;

/// Word segmentation backend
pub trait Segmenter: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Split text into ordered word candidates
    /// Length filtering is done by the caller.
    fn segment(&self, text: &str) -> Result<Vec<String>>;
}

/// Dictionary based segmenter
/// Runs jieba in its fast mode: prefix dictionary + DAG only, no HMM
/// for unknown words. All segmenters share one process-wide dictionary,
/// loaded by the first `new` call.
#[derive(Clone, Copy)]
pub struct DictionarySegmenter {
    jieba: &'static Jieba,
}

impl DictionarySegmenter {
    pub fn new() -> Self {
        Self {
            jieba: Lazy::force(&JIEBA),
        }
    }
}

impl Default for DictionarySegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for DictionarySegmenter {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .jieba
            .cut(text, false)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

/// Pattern based segmenter
/// Emits maximal runs of CJK ideographs and ignores everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct CjkRunSegmenter;

impl CjkRunSegmenter {
    #[inline]
    pub fn runs(&self, text: &str) -> Vec<String> {
        CJK_RUN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Segmenter for CjkRunSegmenter {
    fn name(&self) -> &'static str {
        "cjk_runs"
    }

    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.runs(text))
    }
}

/// Memoizing word tokenizer
/// Segments cleaned text with the primary segmenter, falls back to
/// [`CjkRunSegmenter`] when the primary is absent or fails, and keeps
/// only tokens longer than one character.
///
/// Results are cached per exact input string. The cache never changes
/// what is returned, only how fast.
pub struct Tokenizer {
    primary: Option<Box<dyn Segmenter>>,
    fallback: CjkRunSegmenter,
    char_cap: usize,
    cache: Mutex<LruCache<String, Tokens>>,
}

impl Tokenizer {
    /// Tokenizer backed by the dictionary segmenter with default limits
    pub fn new() -> Self {
        Self::with_segmenter(
            Some(Box::new(DictionarySegmenter::new())),
            DEFAULT_TOKENIZE_CHAR_CAP,
            DEFAULT_TOKEN_CACHE_CAPACITY,
        )
    }

    /// Build a tokenizer from its parts
    ///
    /// # Arguments
    /// * `primary` - primary segmenter, `None` uses the CJK-run path only
    /// * `char_cap` - characters segmented per call
    /// * `cache_capacity` - entries of the memoization cache (0 disables it)
    pub fn with_segmenter(
        primary: Option<Box<dyn Segmenter>>,
        char_cap: usize,
        cache_capacity: usize,
    ) -> Self {
        Self {
            primary,
            fallback: CjkRunSegmenter,
            char_cap,
            cache: Mutex::new(LruCache::new(cache_capacity)),
        }
    }

    #[inline]
    pub fn char_cap(&self) -> usize {
        self.char_cap
    }

    /// Tokenize with memoization
    ///
    /// # Arguments
    /// * `text` - normalized text
    ///
    /// # Returns
    /// * `Result<Tokens>` - tokens longer than one character, in order
    pub fn tokenize(&self, text: &str) -> Result<Tokens> {
        if text.is_empty() {
            return Ok(Arc::from(Vec::new()));
        }
        if let Some(hit) = self.lock_cache()?.get(text) {
            debug!("token cache hit ({} chars)", text.len());
            return Ok(Arc::clone(hit));
        }

        let tokens: Tokens = Arc::from(self.tokenize_uncached(text));
        self.lock_cache()?.put(text.to_string(), Arc::clone(&tokens));
        Ok(tokens)
    }

    /// Tokenize without reading or filling the cache
    pub fn tokenize_uncached(&self, text: &str) -> Vec<String> {
        let text = truncate_chars(text, self.char_cap);
        let words = match &self.primary {
            Some(primary) => match primary.segment(text) {
                Ok(words) => words,
                Err(err) => {
                    warn!(
                        "{} segmenter failed, using {}: {}",
                        primary.name(),
                        self.fallback.name(),
                        err
                    );
                    self.fallback.runs(text)
                }
            },
            None => self.fallback.runs(text),
        };
        words
            .into_iter()
            .filter(|w| w.chars().count() > 1 && !w.trim().is_empty())
            .collect()
    }

    pub fn cache_stats(&self) -> Result<CacheStats> {
        Ok(self.lock_cache()?.stats())
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.lock_cache()?.clear();
        Ok(())
    }

    fn lock_cache(&self) -> Result<std::sync::MutexGuard<'_, LruCache<String, Tokens>>> {
        self.cache
            .lock()
            .map_err(|_| CheckError::computation("token cache lock poisoned"))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("primary", &self.primary.as_ref().map(|s| s.name()))
            .field("char_cap", &self.char_cap)
            .finish()
    }
}
