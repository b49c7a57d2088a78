//! Fit and classification benchmarks for the topic pipeline
//!
//! The engine retrains synchronously on every corpus change, so fit time
//! bounds how fast curation commands complete. Classification sits on
//! the per-message hot path.
//!
//! Run with: cargo bench -p autofaq-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use autofaq_classifiers::{evaluate, TopicModel, TrainingSet};
use autofaq_core::{EntryId, FaqEntry};

fn entry(id: u32, short: &str, examples: &[&str]) -> FaqEntry {
    let mut e = FaqEntry::new(EntryId(id), short, format!("answer for {short}"));
    e.examples = examples.iter().map(|s| s.to_string()).collect();
    e
}

/// A corpus shaped like a small community FAQ
fn corpus() -> TrainingSet {
    let nonsense: Vec<String> = [
        "hello there everyone",
        "good morning folks",
        "haha that is hilarious",
        "thanks so much",
        "what a day",
        "see you all tomorrow",
        "congrats on the release",
        "brb getting coffee",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let entries = vec![
        entry(
            0,
            "hours",
            &[
                "when are you open",
                "what are your opening hours",
                "are you open on sunday",
                "how late are you open today",
                "is the shop open right now",
            ],
        ),
        entry(
            1,
            "shipping",
            &[
                "how long does shipping take",
                "when will my package arrive",
                "do you ship abroad",
                "what does shipping cost",
                "where is my order",
            ],
        ),
        entry(
            2,
            "returns",
            &[
                "how do i return an item",
                "can i get a refund",
                "what is your return policy",
                "my item arrived broken what now",
            ],
        ),
        entry(
            3,
            "account",
            &[
                "i cannot log in to my account",
                "how do i reset my password",
                "my account is locked",
                "how do i change my email address",
            ],
        ),
    ];

    TrainingSet::from_corpus(&nonsense, &entries)
}

fn benchmark_fit(c: &mut Criterion) {
    let set = corpus();

    let mut group = c.benchmark_group("TopicModel_Fit");
    group.sample_size(100);

    group.bench_function("fit_small_corpus", |b| {
        b.iter(|| TopicModel::fit(black_box(&set)).unwrap());
    });

    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let model = TopicModel::fit(&corpus()).unwrap();

    let test_cases = vec![
        ("exact_match", "when are you open"),
        ("paraphrase", "are you open late on sundays"),
        ("nonsense", "good morning have a great day"),
        ("unseen_tokens", "completely unrelated gibberish request"),
    ];

    let mut group = c.benchmark_group("TopicModel_Classify");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| model.classify(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_evaluate(c: &mut Criterion) {
    let set = corpus();

    let mut group = c.benchmark_group("Holdout_Evaluation");
    group.sample_size(50);

    group.bench_function("evaluate_split_0_3", |b| {
        b.iter(|| evaluate(black_box(&set), 0.3, 42).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_fit, benchmark_classify, benchmark_evaluate);
criterion_main!(benches);
