/// This crate is a lexical plagiarism checker for Chinese documents.
pub mod checker;
pub mod error;
pub mod report;
pub mod utils;

/// Plagiarism Checker
/// The top-level struct of this crate. It takes two texts and returns one
/// similarity score in [0, 1].
///
/// Internally, it holds:
/// - A text normalizer
/// - A memoizing word tokenizer (jieba dictionary, CJK-run fallback)
/// - The stopword filter
/// - A similarity engine with its synonym table
/// - A memoization cache of full pipeline results
///
/// Either text empty gives 0.0 without running the pipeline.
/// A streaming variant, `similarity_of_files`, reads two files in fixed-size
/// character chunks.
///
/// # Thread Safety
/// Both caches are mutex guarded; a checker can be shared across threads.
pub use checker::PlagiarismChecker;

/// Cache statistics of a `PlagiarismChecker`
pub use checker::CheckerCacheStats;

/// Checker Configuration
/// Limits, cache sizes, segmenter choice, execution strategy and an optional
/// external synonym file. Loadable from TOML.
pub use checker::config::{CheckerConfig, Execution, SegmenterKind};

/// Similarity Algorithm
/// The `SimilarityAlgorithm` enum selects the score a checker computes.
///
/// Currently, the following algorithms are supported:
/// - Fused: 0.5 Jaccard + 0.3 weighted ratio + 0.2 synonym score (default)
/// - Jaccard: plain set overlap
/// - Weighted Ratio: frequency weighted overlap, long tokens weigh 1.2
/// - Synonym: overlap that also credits registered synonym pairs
/// - Cosine: cosine similarity of term frequency vectors
/// - Word Overlap: set overlap of raw token lists
pub use checker::compare::{FusedScore, SimilarityAlgorithm, SimilarityEngine};

/// Term Frequency structure
/// Occurrence count of every distinct token of one document, plus the total.
/// Iteration follows first-seen order.
pub use checker::term::TermFrequency;

/// Synonym table, built in or loaded from JSON
pub use checker::synonym::SynonymTable;

/// Tokenizer and its segmentation backends
pub use checker::tokenizer::{CjkRunSegmenter, DictionarySegmenter, Segmenter, Tokenizer, Tokens};

pub use checker::stopword::StopwordFilter;

/// Text normalizer
pub use utils::normalizer::Normalizer;

/// Error type and result alias
pub use error::{CheckError, Result};
