use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tf_idf_recommender::{
    CorpusStore, EngineConfig, IndexedCorpus, LexiconBackend, RawItem, RecommendationRequest,
    SentimentLabel,
};

const CATEGORIES: [&str; 8] = [
    "Action", "Comedy", "Crime", "Drama", "Family", "Horror", "Romance", "Sci-Fi",
];

const WORDS: [&str; 32] = [
    "story", "hope", "despair", "city", "night", "war", "family", "love", "journey", "secret",
    "brother", "ship", "space", "detective", "murder", "wonderful", "cruel", "happy", "dark",
    "village", "king", "robot", "island", "storm", "friend", "enemy", "escape", "prison",
    "dream", "ghost", "heist", "train",
];

/// Synthetic corpus of `n` items with random categories and descriptions
fn synthetic_corpus(n: usize) -> CorpusStore {
    let mut rng = StdRng::seed_from_u64(42);
    let records: Vec<RawItem> = (0..n)
        .map(|i| {
            let categories: Vec<&str> = CATEGORIES.choose_multiple(&mut rng, 2).copied().collect();
            let description: Vec<&str> = (0..24)
                .map(|_| *WORDS.choose(&mut rng).unwrap_or(&"story"))
                .collect();
            RawItem::new(format!("Title {i}"))
                .categories(categories.join(", "))
                .description(description.join(" "))
                .quality_score(rng.random_range(1.0..10.0))
        })
        .collect();
    CorpusStore::load(records).expect("synthetic corpus is valid")
}

fn build_index(corpus: &CorpusStore) -> IndexedCorpus {
    IndexedCorpus::build_with_backend(
        corpus.clone(),
        Arc::new(LexiconBackend::default()),
        EngineConfig::default(),
    )
    .expect("default config is valid")
}

fn index_and_recommend_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(5_000);

    c.bench_function("build_index", |b| {
        b.iter(|| build_index(black_box(&corpus)));
    });

    let index = build_index(&corpus);

    c.bench_function("recommend_similarity", |b| {
        let request = RecommendationRequest::new(10).seed_title("Title 1234").category("drama");
        b.iter(|| index.recommend(black_box(&request)).expect("valid request"));
    });

    c.bench_function("recommend_general_mood", |b| {
        let request = RecommendationRequest::new(10)
            .min_quality(5.0)
            .mood(SentimentLabel::Positive);
        b.iter(|| index.recommend(black_box(&request)).expect("valid request"));
    });

    c.bench_function("similar_to_text", |b| {
        b.iter(|| index.similar_to_text(black_box("a wonderful journey to a space island")));
    });
}

criterion_group!(benches, index_and_recommend_benchmark);
criterion_main!(benches);
