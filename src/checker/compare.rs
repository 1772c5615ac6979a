use std::collections::HashSet;
use std::hash::BuildHasher;
use std::sync::Arc;

use ahash::RandomState;
use indexmap::IndexMap;
use num::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::checker::synonym::SynonymTable;
use crate::checker::term::TermFrequency;
use crate::error::{CheckError, Result};

/// Share of plain set Jaccard in the fused score
pub const JACCARD_WEIGHT: f64 = 0.5;
/// Share of the frequency weighted ratio in the fused score
pub const WEIGHTED_RATIO_WEIGHT: f64 = 0.3;
/// Share of the synonym score in the fused score
pub const SYNONYM_WEIGHT: f64 = 0.2;
/// Tokens with more characters than this count as important
pub const LONG_TOKEN_THRESHOLD: usize = 2;
/// Importance weight of long tokens (short tokens weigh 1.0)
pub const LONG_TOKEN_WEIGHT: f64 = 1.2;
/// Award for a registered synonym pair (identical words earn 1.0)
pub const SYNONYM_MATCH_AWARD: f64 = 0.8;

type TokenSet<'a> = HashSet<&'a str, RandomState>;

/// Enum for similarity algorithms the checker can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgorithm {
    /// Fused score: 0.5 Jaccard + 0.3 weighted ratio + 0.2 synonym score
    /// The canonical plagiarism score
    #[default]
    Fused,
    /// Plain Jaccard over distinct tokens
    Jaccard,
    /// Frequency weighted Jaccard ratio with long token boost
    WeightedRatio,
    /// Synonym aware all-pairs score
    Synonym,
    /// Cosine similarity over term frequency vectors
    Cosine,
    /// Word overlap over token lists treated as sets
    WordOverlap,
}

/// Breakdown of one fused computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FusedScore {
    pub jaccard: f64,
    pub weighted_ratio: f64,
    pub synonym: f64,
    pub fused: f64,
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[inline]
fn token_set<T>(tokens: &[T]) -> TokenSet<'_>
where
    T: AsRef<str>,
{
    tokens.iter().map(AsRef::as_ref).collect()
}

/// Plain Jaccard similarity of two sets
/// |A ∩ B| / |A ∪ B|; two empty sets are identical (1.0), one empty set
/// shares nothing (0.0).
pub fn jaccard_similarity<S1, S2>(set1: &HashSet<&str, S1>, set2: &HashSet<&str, S2>) -> f64
where
    S1: BuildHasher,
    S2: BuildHasher,
{
    if set1.is_empty() && set2.is_empty() {
        return 1.0;
    }
    if set1.is_empty() || set2.is_empty() {
        return 0.0;
    }
    let intersection = set1.iter().filter(|w| set2.contains(*w)).count();
    let union = set1.len() + set2.len() - intersection;
    clamp_unit(intersection as f64 / union as f64)
}

/// Word overlap similarity
/// Same formula as [`jaccard_similarity`], taking raw token lists.
pub fn word_overlap_similarity<T>(words1: &[T], words2: &[T]) -> f64
where
    T: AsRef<str>,
{
    jaccard_similarity(&token_set(words1), &token_set(words2))
}

/// Cosine similarity of two term weight maps
/// Both maps are embedded over their union vocabulary (missing terms are 0).
///
/// # Returns
/// * `Result<f64>` - value in [0, 1]; 0.0 when either map is empty or has
///   zero norm. `InvalidInputType` for negative or non-numeric weights.
pub fn cosine_similarity<N, S1, S2>(
    vec1: &IndexMap<String, N, S1>,
    vec2: &IndexMap<String, N, S2>,
) -> Result<f64>
where
    N: Num + Copy + PartialOrd + ToPrimitive,
    S1: BuildHasher,
    S2: BuildHasher,
{
    if vec1.is_empty() || vec2.is_empty() {
        return Ok(0.0);
    }

    let to_f64 = |term: &str, value: N| -> Result<f64> {
        if value < N::zero() {
            return Err(CheckError::InvalidInputType(format!(
                "negative weight for term {term:?}"
            )));
        }
        value
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                CheckError::InvalidInputType(format!("non-numeric weight for term {term:?}"))
            })
    };

    let vocabulary = vec1
        .keys()
        .chain(vec2.keys().filter(|k| !vec1.contains_key(k.as_str())));

    let mut dot = 0.0;
    let mut norm1 = 0.0;
    let mut norm2 = 0.0;
    for term in vocabulary {
        let a = match vec1.get(term.as_str()) {
            Some(&v) => to_f64(term, v)?,
            None => 0.0,
        };
        let b = match vec2.get(term.as_str()) {
            Some(&v) => to_f64(term, v)?,
            None => 0.0,
        };
        dot += a * b;
        norm1 += a * a;
        norm2 += b * b;
    }

    let norm1 = f64::sqrt(norm1);
    let norm2 = f64::sqrt(norm2);
    if norm1 == 0.0 || norm2 == 0.0 {
        return Ok(0.0);
    }
    Ok(clamp_unit(dot / (norm1 * norm2)))
}

/// Frequency weighted Jaccard ratio
/// Per distinct term: min count goes to the intersection, max count to the
/// union, both scaled by [`LONG_TOKEN_WEIGHT`] for terms longer than
/// [`LONG_TOKEN_THRESHOLD`] characters.
pub fn weighted_ratio(freq1: &TermFrequency, freq2: &TermFrequency) -> f64 {
    // integer sums per weight class keep the result order independent
    let mut short_inter = 0u64;
    let mut short_union = 0u64;
    let mut long_inter = 0u64;
    let mut long_union = 0u64;

    let mut tally = |term: &str, c1: u64, c2: u64| {
        if term.chars().count() > LONG_TOKEN_THRESHOLD {
            long_inter += c1.min(c2);
            long_union += c1.max(c2);
        } else {
            short_inter += c1.min(c2);
            short_union += c1.max(c2);
        }
    };
    for (term, c1) in freq1.iter() {
        tally(term, c1, freq2.term_count(term));
    }
    for (term, c2) in freq2.iter() {
        if !freq1.contains_term(term) {
            tally(term, 0, c2);
        }
    }

    let inter = short_inter as f64 + long_inter as f64 * LONG_TOKEN_WEIGHT;
    let union = short_union as f64 + long_union as f64 * LONG_TOKEN_WEIGHT;
    if union > 0.0 {
        clamp_unit(inter / union)
    } else {
        0.0
    }
}

/// Similarity engine
/// Runs the sub-algorithms over processed token sequences and fuses them.
/// Holds the synonym table it scores against.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    synonyms: Arc<SynonymTable>,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(SynonymTable::builtin())
    }
}

impl SimilarityEngine {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self { synonyms }
    }

    #[inline]
    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Synonym aware score
    /// Every pair of distinct words earns 1.0 when equal, 0.8 when one is a
    /// registered synonym of the other; the sum is divided by the size of
    /// the distinct union. Candidate pairs come from the synonym index
    /// instead of a scan over both vocabularies.
    pub fn synonym_similarity<T>(&self, words1: &[T], words2: &[T]) -> f64
    where
        T: AsRef<str>,
    {
        if words1.is_empty() && words2.is_empty() {
            return 1.0;
        }
        if words1.is_empty() || words2.is_empty() {
            return 0.0;
        }
        let set1 = token_set(words1);
        let set2 = token_set(words2);
        self.synonym_similarity_of_sets(&set1, &set2)
    }

    fn synonym_similarity_of_sets(&self, set1: &TokenSet<'_>, set2: &TokenSet<'_>) -> f64 {
        let mut exact = 0usize;
        let mut related = 0usize;
        for word in set1 {
            if set2.contains(word) {
                exact += 1;
            }
            related += self
                .synonyms
                .related(word)
                .filter(|candidate| set2.contains(candidate))
                .count();
        }
        let union = set1.len() + set2.len() - exact;
        if union == 0 {
            return 0.0;
        }
        let awarded = exact as f64 + related as f64 * SYNONYM_MATCH_AWARD;
        clamp_unit(awarded / union as f64)
    }

    /// Fused score with its components
    /// Two empty sequences are identical (all components 1.0), a single
    /// empty sequence scores 0.0.
    pub fn explain<T>(&self, words1: &[T], words2: &[T]) -> FusedScore
    where
        T: AsRef<str>,
    {
        if words1.is_empty() && words2.is_empty() {
            return FusedScore {
                jaccard: 1.0,
                weighted_ratio: 1.0,
                synonym: 1.0,
                fused: 1.0,
            };
        }
        if words1.is_empty() || words2.is_empty() {
            return FusedScore {
                jaccard: 0.0,
                weighted_ratio: 0.0,
                synonym: 0.0,
                fused: 0.0,
            };
        }

        let freq1 = TermFrequency::from(words1);
        let freq2 = TermFrequency::from(words2);
        let set1 = token_set(words1);
        let set2 = token_set(words2);

        let jaccard = jaccard_similarity(&set1, &set2);
        let weighted_ratio = weighted_ratio(&freq1, &freq2);
        let synonym = self.synonym_similarity_of_sets(&set1, &set2);
        let fused = jaccard * JACCARD_WEIGHT
            + weighted_ratio * WEIGHTED_RATIO_WEIGHT
            + synonym * SYNONYM_WEIGHT;

        FusedScore {
            jaccard,
            weighted_ratio,
            synonym,
            fused: clamp_unit(fused),
        }
    }

    /// Enhanced weighted Jaccard, the canonical fused score
    #[inline]
    pub fn enhanced_jaccard_similarity<T>(&self, words1: &[T], words2: &[T]) -> f64
    where
        T: AsRef<str>,
    {
        self.explain(words1, words2).fused
    }

    /// Score two token sequences with the chosen algorithm
    ///
    /// # Arguments
    /// * `algorithm` - which signal to compute
    /// * `words1` - processed tokens of the first document
    /// * `words2` - processed tokens of the second document
    ///
    /// # Returns
    /// * `Result<f64>` - score in [0, 1]
    pub fn score<T>(&self, algorithm: SimilarityAlgorithm, words1: &[T], words2: &[T]) -> Result<f64>
    where
        T: AsRef<str>,
    {
        let score = match algorithm {
            SimilarityAlgorithm::Fused => self.enhanced_jaccard_similarity(words1, words2),
            SimilarityAlgorithm::Jaccard => {
                jaccard_similarity(&token_set(words1), &token_set(words2))
            }
            SimilarityAlgorithm::WeightedRatio => {
                if words1.is_empty() && words2.is_empty() {
                    1.0
                } else {
                    weighted_ratio(&TermFrequency::from(words1), &TermFrequency::from(words2))
                }
            }
            SimilarityAlgorithm::Synonym => self.synonym_similarity(words1, words2),
            SimilarityAlgorithm::Cosine => {
                TermFrequency::from(words1).cosine_similarity(&TermFrequency::from(words2))?
            }
            SimilarityAlgorithm::WordOverlap => word_overlap_similarity(words1, words2),
        };
        Ok(score)
    }
}
