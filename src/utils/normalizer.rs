use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CheckError, Result};

/// Default upper bound of characters accepted in whole-text mode
pub const DEFAULT_MAX_TEXT_CHARS: usize = 5_000_000;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

// CJK unified ideographs, ASCII letters, digits and whitespace survive
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9\s]").expect("static character class")
});

/// Text cleaner
/// Turns raw text into a canonical form: single spaces only, and nothing
/// except CJK ideographs, ASCII letters, digits and spaces.
///
/// # Examples
/// ```
/// use plagiarism_checker::Normalizer;
/// let normalizer = Normalizer::default();
/// let cleaned = normalizer.clean("这是  一个\n测试\t文本。").unwrap();
/// assert_eq!(cleaned, "这是 一个 测试 文本");
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_chars: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_CHARS)
    }
}

impl Normalizer {
    /// Create a normalizer with a character limit
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Character limit of this normalizer
    #[inline]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Clean a text that may be absent
    /// `None` is treated as the empty string.
    #[inline]
    pub fn clean_opt(&self, text: Option<&str>) -> Result<String> {
        self.clean(text.unwrap_or(""))
    }

    /// Clean a text
    ///
    /// # Arguments
    /// * `text` - raw text
    ///
    /// # Returns
    /// * `Result<String>` - cleaned text, or `InputTooLarge` when the text
    ///   has more characters than the limit
    pub fn clean(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(CheckError::InputTooLarge {
                len,
                max: self.max_chars,
            });
        }

        let text = text.replace(['\n', '\t'], " ");
        let text = WHITESPACE_RUN.replace_all(&text, " ");
        let text = DISALLOWED_CHARS.replace_all(&text, "");
        // deleting punctuation can leave two spaces side by side
        let text = WHITESPACE_RUN.replace_all(&text, " ");

        Ok(text.trim().to_string())
    }
}

/// Cut a string to its first `max_chars` characters
/// Returns the input unchanged when it is short enough.
#[inline]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
