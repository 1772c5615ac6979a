use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use ahash::RandomState;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{CheckError, Result};

const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("好", &["棒", "优秀", "出色", "杰出", "卓越"]),
    ("大", &["巨大", "庞大", "宏大", "硕大", "巨大"]),
    ("小", &["微小", "细小", "迷你", "袖珍", "小巧"]),
    ("快", &["迅速", "快速", "急速", "飞快", "敏捷"]),
    ("慢", &["缓慢", "迟缓", "迟钝", "拖沓", "磨蹭"]),
    ("美", &["美丽", "漂亮", "好看", "优美", "动人"]),
    ("丑", &["难看", "丑陋", "不美", "难看", "丑恶"]),
    ("高", &["高大", "高耸", "挺拔", "巍峨", "雄伟"]),
    ("低", &["矮小", "低矮", "短小", "渺小", "卑微"]),
    ("新", &["崭新", "全新", "新鲜", "新颖", "创新"]),
    ("旧", &["古老", "陈旧", "过时", "破旧", "老式"]),
    ("多", &["许多", "大量", "众多", "丰富", "充足"]),
    ("少", &["少量", "稀少", "稀缺", "不足", "缺乏"]),
    ("强", &["强大", "强壮", "有力", "强劲", "坚韧"]),
    ("弱", &["弱小", "脆弱", "无力", "软弱", "虚弱"]),
    ("聪明", &["智慧", "机智", "聪慧", "明智", "睿智"]),
    ("愚蠢", &["愚笨", "笨拙", "迟钝", "糊涂", "无知"]),
    ("快乐", &["高兴", "愉快", "开心", "欢乐", "喜悦"]),
    ("悲伤", &["难过", "痛苦", "伤心", "沮丧", "忧郁"]),
    ("重要", &["关键", "核心", "主要", "首要", "必要"]),
    ("普通", &["一般", "平常", "寻常", "平凡", "常规"]),
    ("特殊", &["特别", "独特", "特殊", "非凡", "罕见"]),
    ("容易", &["简单", "轻松", "便利", "容易", "方便"]),
    ("困难", &["艰难", "复杂", "麻烦", "棘手", "艰巨"]),
    ("开始", &["启动", "开端", "起始", "起初", "最初"]),
    ("结束", &["终止", "完结", "完成", "收尾", "最后"]),
    ("帮助", &["协助", "支援", "援助", "扶持", "支持"]),
    ("阻止", &["妨碍", "阻碍", "阻拦", "制止", "防止"]),
    ("改变", &["变化", "转变", "修改", "调整", "更新"]),
    ("保持", &["维持", "保留", "持续", "坚持", "稳定"]),
];

static BUILTIN: Lazy<Arc<SynonymTable>> = Lazy::new(|| {
    Arc::new(SynonymTable::from_pairs(
        BUILTIN_SYNONYMS
            .iter()
            .map(|(word, syns)| (*word, syns.iter().copied())),
    ))
});

/// Synonym table
/// Maps a canonical word to its synonyms. Lookups go through a symmetric
/// index, so "a is listed under b" and "b is listed under a" are the same
/// question and cost one hash probe.
///
/// Immutable once built; the built-in table is shared process-wide.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: IndexMap<String, Vec<String>>,
    related: RelatedIndex,
}

impl SynonymTable {
    /// The compiled-in table
    pub fn builtin() -> Arc<SynonymTable> {
        Arc::clone(&BUILTIN)
    }

    /// Build a table from (canonical word, synonyms) pairs
    pub fn from_pairs<W, I, S>(pairs: impl IntoIterator<Item = (W, I)>) -> Self
    where
        W: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = SynonymTable::default();
        for (word, syns) in pairs {
            let word = word.as_ref();
            let list = table.entries.entry(word.to_string()).or_default();
            for syn in syns {
                let syn = syn.as_ref();
                if !list.iter().any(|s| s == syn) {
                    list.push(syn.to_string());
                }
                if syn != word {
                    link(&mut table.related, word, syn);
                    link(&mut table.related, syn, word);
                }
            }
        }
        table
    }

    /// Parse a JSON object of `{"word": ["synonym", ...]}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: IndexMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| CheckError::Config(format!("synonym table: {e}")))?;
        Ok(Self::from_pairs(map))
    }

    /// Load a JSON synonym table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CheckError::Config(format!("cannot read synonym table {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Whether two different words are registered synonyms in either direction
    #[inline]
    pub fn is_synonym(&self, a: &str, b: &str) -> bool {
        a != b
            && self
                .related
                .get(a)
                .is_some_and(|set| set.contains(b))
    }

    /// Words related to `word` in either direction, excluding itself
    #[inline]
    pub fn related(&self, word: &str) -> impl Iterator<Item = &str> {
        self.related
            .get(word)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Synonyms listed directly under a canonical word
    #[inline]
    pub fn synonyms_of(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Number of canonical entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type RelatedIndex = HashMap<String, HashSet<String, RandomState>, RandomState>;

fn link(related: &mut RelatedIndex, from: &str, to: &str) {
    related
        .entry(from.to_string())
        .or_default()
        .insert(to.to_string());
}
