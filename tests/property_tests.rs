//! Property-based tests for the checking pipeline.
//!
//! These tests verify invariants that should hold regardless of input:
//! - Scores are always in [0, 1]
//! - Scores are symmetric and reflexive
//! - Normalization is idempotent
//! - Replacing more tokens never raises the score

use std::sync::OnceLock;

use plagiarism_checker::{Normalizer, PlagiarismChecker, SimilarityEngine};
use proptest::prelude::*;

fn checker() -> &'static PlagiarismChecker {
    static CHECKER: OnceLock<PlagiarismChecker> = OnceLock::new();
    CHECKER.get_or_init(PlagiarismChecker::new)
}

prop_compose! {
    /// Short Chinese-looking documents with punctuation, ASCII and whitespace
    fn arb_document()(parts in prop::collection::vec(
        prop::sample::select(vec![
            "今天", "天气", "星期天", "晚上", "电影", "论文", "查重", "系统", "美丽",
            "漂亮", "好", "棒", "的", "我们", "，", "。", "！", " ", "\n", "\t", "abc", "42",
        ]),
        1..40,
    )) -> String {
        parts.concat()
    }
}

mod score_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn score_is_bounded(a in arb_document(), b in arb_document()) {
            let score = checker().similarity(&a, &b).unwrap();
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn score_is_symmetric(a in arb_document(), b in arb_document()) {
            let ab = checker().similarity(&a, &b).unwrap();
            let ba = checker().similarity(&b, &a).unwrap();
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn score_is_reflexive(a in arb_document()) {
            prop_assert_eq!(checker().similarity(&a, &a).unwrap(), 1.0);
        }
    }
}

mod normalizer_props {
    use super::*;

    proptest! {
        #[test]
        fn clean_is_idempotent(text in "\\PC{0,200}") {
            let normalizer = Normalizer::default();
            let once = normalizer.clean(&text).unwrap();
            let twice = normalizer.clean(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn clean_leaves_single_spaces_only(text in "[\\s\\PC]{0,200}") {
            let cleaned = Normalizer::default().clean(&text).unwrap();
            prop_assert!(!cleaned.contains("  "));
            prop_assert!(!cleaned.contains('\n') && !cleaned.contains('\t'));
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }
    }
}

mod degradation_props {
    use super::*;

    proptest! {
        #[test]
        fn replacing_tokens_never_raises_score(n in 2usize..30) {
            let engine = SimilarityEngine::default();
            let original: Vec<String> = (0..n).map(|i| format!("词{i}")).collect();

            let mut previous = 1.0f64;
            for k in 0..=n {
                let mut replaced = original.clone();
                for (i, slot) in replaced.iter_mut().take(k).enumerate() {
                    *slot = format!("新{i}");
                }
                let score = engine.enhanced_jaccard_similarity(&original, &replaced);
                prop_assert!(score <= previous + 1e-12, "k={} {} > {}", k, score, previous);
                previous = score;
            }
            prop_assert_eq!(previous, 0.0);
        }
    }
}
