use std::collections::HashSet;

use ahash::RandomState;
use once_cell::sync::Lazy;

/// Function words removed before scoring
const STOP_WORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个",
    "上", "也", "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好",
    "自己", "这", "那", "他", "她", "它", "们", "我们", "你们", "他们", "这个",
    "那个", "什么", "怎么", "为什么", "因为", "所以", "但是", "然后", "如果",
    "虽然", "不过", "而且", "或者", "还是", "就是", "只是", "已经", "正在",
    "可以", "应该", "需要", "必须", "可能", "也许", "大概", "似乎", "看起来",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str, RandomState>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Stateless stopword filter over the built-in word list
#[derive(Debug, Default, Clone, Copy)]
pub struct StopwordFilter;

impl StopwordFilter {
    pub fn new() -> Self {
        StopwordFilter
    }

    #[inline]
    pub fn is_stopword(&self, word: &str) -> bool {
        STOP_WORD_SET.contains(word)
    }

    /// Remove stopwords, keeping the order of the rest
    ///
    /// # Arguments
    /// * `tokens` - token sequence
    ///
    /// # Returns
    /// * `Vec<String>` - tokens not in the stopword set
    pub fn filter<T>(&self, tokens: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !self.is_stopword(t))
            .map(str::to_string)
            .collect()
    }

    /// Number of words in the built-in list
    #[inline]
    pub fn len(&self) -> usize {
        STOP_WORD_SET.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        STOP_WORD_SET.is_empty()
    }

    /// Touch the lazily built set so later calls never build it
    pub(crate) fn warm_up(&self) {
        Lazy::force(&STOP_WORD_SET);
    }
}
