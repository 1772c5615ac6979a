use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::checker::compare;
use crate::error::Result;

/// TermFrequency struct
/// Term frequency vector of one document: every distinct term with the
/// number of times it occurs. Terms keep first-seen order, so iteration
/// is deterministic.
///
/// # Examples
/// ```
/// use plagiarism_checker::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_terms(&["测试", "文本", "测试"]);
///
/// assert_eq!(term_freq.term_count("测试"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create an empty TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Merge counts of another TermFrequency into this one
    pub fn add_terms_from_freq(&mut self, other: &TermFrequency) -> &mut Self {
        for (term, &count) in &other.term_count {
            *self.term_count.entry(term.clone()).or_insert(0) += count;
            self.total_term_count += count;
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate over terms and their counts in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Occurrence count of a term (0 if absent)
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Sum of all counts, equal to the length of the source sequence
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Counts as a map, the input form of [`compare::cosine_similarity`]
    #[inline]
    pub fn as_map(&self) -> &IndexMap<String, u64> {
        &self.term_count
    }

    /// Cosine similarity against another vector
    ///
    /// # Returns
    /// * `Result<f64>` - similarity in [0, 1], 0.0 if either vector is empty
    pub fn cosine_similarity(&self, other: &TermFrequency) -> Result<f64> {
        compare::cosine_similarity(self.as_map(), other.as_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_terms() {
        let words = ["测试", "文本", "测试", "内容", "文本"];
        let tf = TermFrequency::from(&words[..]);
        assert_eq!(tf.term_count("测试"), 2);
        assert_eq!(tf.term_count("文本"), 2);
        assert_eq!(tf.term_count("内容"), 1);
        assert_eq!(tf.term_count("缺失"), 0);
        assert_eq!(tf.term_sum(), words.len() as u64);
        assert_eq!(tf.term_num(), 3);
    }

    #[test]
    fn empty_sequence_is_empty_vector() {
        let none: [&str; 0] = [];
        let tf = TermFrequency::from(&none[..]);
        assert!(tf.is_empty());
        assert_eq!(tf.term_sum(), 0);
    }

    #[test]
    fn keeps_first_seen_order() {
        let tf = TermFrequency::from(&["b", "a", "b", "c"][..]);
        let order: Vec<&str> = tf.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = TermFrequency::from(&["今天", "天气"][..]);
        let b = TermFrequency::from(&["今天", "电影"][..]);
        a.add_terms_from_freq(&b);
        assert_eq!(a.term_count("今天"), 2);
        assert_eq!(a.term_sum(), 4);
    }

    #[test]
    fn map_view_matches_counts() {
        let tf = TermFrequency::from(&["今天", "电影", "今天"][..]);
        let map = tf.as_map();
        assert_eq!(map.get("今天"), Some(&2));
        assert_eq!(map.get("电影"), Some(&1));
        let sim = compare::cosine_similarity(map, map).unwrap();
        assert_eq!(sim, tf.cosine_similarity(&tf).unwrap());
    }

    #[test]
    fn cosine_of_identical_vectors() {
        let tf = TermFrequency::from(&["今天", "天气", "好"][..]);
        let sim = tf.cosine_similarity(&tf).unwrap();
        assert!((sim - 1.0).abs() < 1e-10);
    }
}
