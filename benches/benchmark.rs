use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plagiarism_checker::{PlagiarismChecker, SimilarityEngine};

const ORIGINAL: &str = "今天是星期天，天气晴，今天晚上我要去看电影。\
论文查重系统通过比较两篇文档的词汇重合程度来判断是否存在抄袭行为。\
系统首先清洗文本，然后进行中文分词，去除停用词后计算相似度。";

const SUSPECT: &str = "今天是周天，天气晴朗，我晚上要去看电影。\
查重系统通过对比两篇文章的词语重叠程度来判断有没有抄袭。\
系统先对文本做清洗，接着中文分词，去掉停用词以后计算相似度。";

fn corpus(repeat: usize) -> (String, String) {
    (ORIGINAL.repeat(repeat), SUSPECT.repeat(repeat))
}

fn similarity_benchmark(c: &mut Criterion) {
    let (original, suspect) = corpus(40);

    let checker = PlagiarismChecker::new();
    c.bench_function("similarity_cold", |b| {
        b.iter(|| {
            checker.clear_caches().expect("clear caches");
            checker.similarity(black_box(&original), black_box(&suspect))
        });
    });

    c.bench_function("similarity_cached", |b| {
        b.iter(|| checker.similarity(black_box(&original), black_box(&suspect)));
    });

    let words1 = checker.preprocess_uncached(&original).expect("preprocess original");
    let words2 = checker.preprocess_uncached(&suspect).expect("preprocess suspect");
    let engine = SimilarityEngine::default();
    c.bench_function("fused_score", |b| {
        b.iter(|| engine.enhanced_jaccard_similarity(black_box(&words1), black_box(&words2)));
    });
}

criterion_group!(benches, similarity_benchmark);
criterion_main!(benches);
