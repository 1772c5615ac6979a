pub mod compare;
pub mod config;
pub mod stopword;
pub mod stream;
pub mod synonym;
pub mod term;
pub mod tokenizer;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::checker::compare::{SimilarityAlgorithm, SimilarityEngine};
use crate::checker::config::{CheckerConfig, Execution, SegmenterKind};
use crate::checker::stopword::StopwordFilter;
use crate::checker::stream::CharChunks;
use crate::checker::synonym::SynonymTable;
use crate::checker::term::TermFrequency;
use crate::checker::tokenizer::{DictionarySegmenter, Segmenter, Tokenizer, Tokens};
use crate::error::{CheckError, Result};
use crate::utils::datastruct::lru::{CacheStats, LruCache};
use crate::utils::normalizer::Normalizer;

/// Occupancy and hit counters of both memoization layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckerCacheStats {
    /// cleaned text -> raw tokens
    pub tokens: CacheStats,
    /// raw text -> processed tokens
    pub preprocessed: CacheStats,
}

/// Plagiarism checker
/// Entry point of the crate: two texts in, one score in [0, 1] out.
///
/// Pipeline per text: clean -> tokenize -> drop stopwords. The processed
/// token sequences are scored with the fused weighted Jaccard measure.
/// Full pipeline results are memoized per raw text, raw tokenization per
/// cleaned text; both caches are bounded and guarded by a mutex, so one
/// checker can be shared between threads.
///
/// # Examples
/// ```
/// use plagiarism_checker::PlagiarismChecker;
/// let checker = PlagiarismChecker::new();
/// let same = checker.similarity("今天是星期天，天气晴。", "今天是星期天，天气晴。").unwrap();
/// assert_eq!(same, 1.0);
/// assert_eq!(checker.similarity("", "今天是星期天").unwrap(), 0.0);
/// ```
pub struct PlagiarismChecker {
    config: CheckerConfig,
    normalizer: Normalizer,
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    engine: SimilarityEngine,
    preprocess_cache: Mutex<LruCache<String, Tokens>>,
}

impl PlagiarismChecker {
    /// Checker with the default configuration and built-in tables
    pub fn new() -> Self {
        let config = CheckerConfig::default();
        let tokenizer = Tokenizer::with_segmenter(
            Some(Box::new(DictionarySegmenter::new())),
            config.tokenize_char_cap,
            config.token_cache_capacity,
        );
        Self::from_parts(config, tokenizer, SimilarityEngine::default())
    }

    /// Checker built from a configuration
    /// The configuration is validated and a configured synonym file is
    /// loaded here, so later calls never touch the file system for it.
    pub fn with_config(config: CheckerConfig) -> Result<Self> {
        config.validate()?;

        let primary: Option<Box<dyn Segmenter>> = match config.segmenter {
            SegmenterKind::Dictionary => Some(Box::new(DictionarySegmenter::new())),
            SegmenterKind::CjkRuns => None,
        };
        let tokenizer = Tokenizer::with_segmenter(
            primary,
            config.tokenize_char_cap,
            config.token_cache_capacity,
        );

        let synonyms = match &config.synonym_file {
            Some(path) => Arc::new(SynonymTable::load(path)?),
            None => SynonymTable::builtin(),
        };
        debug!(
            "checker configured: segmenter={:?} execution={:?} synonyms={}",
            config.segmenter,
            config.execution,
            synonyms.len()
        );

        Ok(Self::from_parts(
            config,
            tokenizer,
            SimilarityEngine::new(synonyms),
        ))
    }

    fn from_parts(config: CheckerConfig, tokenizer: Tokenizer, engine: SimilarityEngine) -> Self {
        let stopwords = StopwordFilter::new();
        stopwords.warm_up();
        Self {
            normalizer: Normalizer::new(config.max_text_chars),
            preprocess_cache: Mutex::new(LruCache::new(config.preprocess_cache_capacity)),
            config,
            tokenizer,
            stopwords,
            engine,
        }
    }

    #[inline]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    #[inline]
    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Similarity of two texts
    ///
    /// # Arguments
    /// * `text1` - original document
    /// * `text2` - suspect document
    ///
    /// # Returns
    /// * `Result<f64>` - fused score in [0, 1]; 0.0 when either text is
    ///   empty. `InputTooLarge` propagates as is, any other internal fault
    ///   surfaces as `ComputationFailure`.
    pub fn similarity(&self, text1: &str, text2: &str) -> Result<f64> {
        self.similarity_with(SimilarityAlgorithm::Fused, text1, text2)
    }

    /// Similarity of two texts that may be absent; absent counts as empty
    pub fn similarity_opt(&self, text1: Option<&str>, text2: Option<&str>) -> Result<f64> {
        match (text1, text2) {
            (Some(text1), Some(text2)) => self.similarity(text1, text2),
            _ => Ok(0.0),
        }
    }

    /// Similarity of two texts with an explicit algorithm
    /// Same contracts as [`PlagiarismChecker::similarity`].
    pub fn similarity_with(
        &self,
        algorithm: SimilarityAlgorithm,
        text1: &str,
        text2: &str,
    ) -> Result<f64> {
        if text1.is_empty() || text2.is_empty() {
            return Ok(0.0);
        }
        self.score_texts(algorithm, text1, text2)
            .map_err(CheckError::into_boundary)
    }

    fn score_texts(&self, algorithm: SimilarityAlgorithm, text1: &str, text2: &str) -> Result<f64> {
        let words1 = self.preprocess(text1)?;
        let words2 = self.preprocess(text2)?;
        debug!(
            "scoring {:?}: {} vs {} tokens",
            algorithm,
            words1.len(),
            words2.len()
        );
        let score = self.engine.score(algorithm, &words1, &words2)?;
        finite_unit(score)
    }

    /// Full pipeline for one text, memoized per raw text
    ///
    /// # Returns
    /// * `Result<Tokens>` - cleaned, segmented, stopword-free tokens
    pub fn preprocess(&self, text: &str) -> Result<Tokens> {
        if text.is_empty() {
            return Ok(Arc::from(Vec::new()));
        }
        if let Some(hit) = self.lock_preprocess_cache()?.get(text) {
            debug!("preprocess cache hit ({} chars)", text.len());
            return Ok(Arc::clone(hit));
        }

        let words: Tokens = Arc::from(self.preprocess_uncached(text)?);
        self.lock_preprocess_cache()?
            .put(text.to_string(), Arc::clone(&words));
        Ok(words)
    }

    /// Full pipeline without the outer cache (tokenization is still cached)
    pub fn preprocess_uncached(&self, text: &str) -> Result<Vec<String>> {
        let cleaned = self.normalizer.clean(text)?;
        let tokens = self.tokenizer.tokenize(&cleaned)?;
        Ok(self.stopwords.filter(&tokens))
    }

    /// Preprocess many texts
    /// Runs sequentially, or on a rayon pool when the configuration asks
    /// for parallel execution. Results keep the input order either way.
    pub fn preprocess_batch<T>(&self, texts: &[T]) -> Result<Vec<Tokens>>
    where
        T: AsRef<str> + Sync,
    {
        match self.config.execution {
            Execution::Parallel { threads } if texts.len() > 1 => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.unwrap_or(0))
                    .build()
                    .map_err(CheckError::computation)?;
                pool.install(|| {
                    texts
                        .par_iter()
                        .map(|text| self.preprocess(text.as_ref()))
                        .collect()
                })
            }
            _ => texts
                .iter()
                .map(|text| self.preprocess(text.as_ref()))
                .collect(),
        }
    }

    /// Term frequency vector of a processed text
    pub fn vectorize(&self, text: &str) -> Result<TermFrequency> {
        let words = self.preprocess(text)?;
        Ok(TermFrequency::from(&words[..]))
    }

    /// Similarity of two files read in fixed-size character chunks
    /// Each chunk goes through the pipeline on its own; the tokens of all
    /// chunks are concatenated per file and scored once at the end, so the
    /// result depends only on the accumulated tokens.
    ///
    /// # Arguments
    /// * `path1` - original document
    /// * `path2` - suspect document
    /// * `chunk_size` - characters per chunk, must be positive
    pub fn similarity_of_files(
        &self,
        path1: impl AsRef<Path>,
        path2: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<f64> {
        if chunk_size == 0 {
            return Err(CheckError::InvalidInputType(
                "chunk size must be a positive integer".to_string(),
            ));
        }
        self.score_files(path1.as_ref(), path2.as_ref(), chunk_size)
            .map_err(CheckError::into_boundary)
    }

    fn score_files(&self, path1: &Path, path2: &Path, chunk_size: usize) -> Result<f64> {
        let words1 = self.stream_tokens(path1, chunk_size)?;
        let words2 = self.stream_tokens(path2, chunk_size)?;
        finite_unit(self.engine.enhanced_jaccard_similarity(&words1, &words2))
    }

    fn stream_tokens(&self, path: &Path, chunk_size: usize) -> Result<Vec<String>> {
        let mut words = Vec::new();
        let mut chunks = 0usize;
        for chunk in CharChunks::open(path, chunk_size)? {
            let chunk = chunk?;
            words.extend(self.preprocess_uncached(&chunk)?);
            chunks += 1;
        }
        info!(
            "streamed {}: {} chunks, {} tokens",
            path.display(),
            chunks,
            words.len()
        );
        Ok(words)
    }

    pub fn cache_stats(&self) -> Result<CheckerCacheStats> {
        Ok(CheckerCacheStats {
            tokens: self.tokenizer.cache_stats()?,
            preprocessed: self.lock_preprocess_cache()?.stats(),
        })
    }

    /// Empty both caches and reset their counters
    pub fn clear_caches(&self) -> Result<()> {
        self.tokenizer.clear_cache()?;
        self.lock_preprocess_cache()?.clear();
        Ok(())
    }

    fn lock_preprocess_cache(&self) -> Result<MutexGuard<'_, LruCache<String, Tokens>>> {
        self.preprocess_cache
            .lock()
            .map_err(|_| CheckError::computation("preprocess cache lock poisoned"))
    }
}

impl Default for PlagiarismChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlagiarismChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlagiarismChecker")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}

#[inline]
fn finite_unit(score: f64) -> Result<f64> {
    if !score.is_finite() {
        return Err(CheckError::computation(format!(
            "similarity is not a finite number: {score}"
        )));
    }
    Ok(score.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_short_circuits() {
        let checker = PlagiarismChecker::new();
        assert_eq!(checker.similarity("", "").unwrap(), 0.0);
        assert_eq!(checker.similarity("今天", "").unwrap(), 0.0);
        assert_eq!(checker.similarity_opt(None, Some("今天")).unwrap(), 0.0);
        assert_eq!(checker.cache_stats().unwrap().preprocessed.misses, 0);
    }

    #[test]
    fn preprocess_drops_stopwords_and_punctuation() {
        let checker = PlagiarismChecker::new();
        let words = checker.preprocess("我们已经完成了这个项目！").unwrap();
        assert!(words.iter().all(|w| w != "我们" && w != "已经" && w != "这个"));
        assert!(words.iter().all(|w| w.chars().count() > 1));
    }

    #[test]
    fn preprocess_is_memoized() {
        let checker = PlagiarismChecker::new();
        let first = checker.preprocess("今天天气很好，我们去看电影").unwrap();
        let second = checker.preprocess("今天天气很好，我们去看电影").unwrap();
        assert_eq!(first, second);
        let stats = checker.cache_stats().unwrap();
        assert_eq!(stats.preprocessed.hits, 1);
        assert_eq!(stats.preprocessed.misses, 1);
        checker.clear_caches().unwrap();
        let cleared = checker.cache_stats().unwrap();
        assert_eq!(cleared.preprocessed.len, 0);
        assert_eq!(cleared.preprocessed.hits, 0);
        assert_eq!(cleared.tokens.len, 0);
        assert_eq!(cleared.preprocessed.capacity, 256);
    }

    #[test]
    fn too_large_input_is_not_wrapped() {
        let config = CheckerConfig {
            max_text_chars: 5,
            ..CheckerConfig::default()
        };
        let checker = PlagiarismChecker::with_config(config).unwrap();
        let err = checker.similarity("今天天气很好啊", "今天").unwrap_err();
        assert!(matches!(err, CheckError::InputTooLarge { len: 7, max: 5 }));
    }

    #[test]
    fn parallel_batch_keeps_positions() {
        let config = CheckerConfig {
            execution: Execution::Parallel { threads: Some(2) },
            ..CheckerConfig::default()
        };
        let parallel = PlagiarismChecker::with_config(config).unwrap();
        let sequential = PlagiarismChecker::new();
        let texts = ["今天天气很好", "", "论文查重系统设计", "我们去看电影"];
        assert_eq!(
            parallel.preprocess_batch(&texts).unwrap(),
            sequential.preprocess_batch(&texts).unwrap()
        );
    }

    #[test]
    fn vectorize_counts_processed_tokens() {
        let checker = PlagiarismChecker::new();
        let tf = checker.vectorize("").unwrap();
        assert!(tf.is_empty());
        let words = checker.preprocess("论文查重，论文查重").unwrap();
        let tf = checker.vectorize("论文查重，论文查重").unwrap();
        assert_eq!(tf.term_sum(), words.len() as u64);
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let checker = PlagiarismChecker::new();
        let err = checker.similarity_of_files("a.txt", "b.txt", 0).unwrap_err();
        assert!(matches!(err, CheckError::InvalidInputType(_)));
    }

    #[test]
    fn missing_file_is_computation_failure() {
        let checker = PlagiarismChecker::new();
        let err = checker
            .similarity_of_files("/nonexistent/a.txt", "/nonexistent/b.txt", 100)
            .unwrap_err();
        assert!(matches!(err, CheckError::ComputationFailure { .. }));
    }

    #[test]
    fn finite_unit_rejects_nan() {
        assert!(finite_unit(f64::NAN).is_err());
        assert_eq!(finite_unit(1.5).unwrap(), 1.0);
    }
}
