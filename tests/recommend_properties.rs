use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tf_idf_recommender::{
    build_index, CorpusStore, EngineConfig, IndexedCorpus, LexiconBackend, RankingMode, RawItem,
    RecommendError, RecommendationRequest, SentimentLabel,
};
use tracing_subscriber::EnvFilter;

const RECORDS: &str = r#"[
    {"Series_Title": "The Shawshank Redemption", "Genre": "Drama", "IMDB_Rating": 9.3,
     "Overview": "Two imprisoned men find hope and friendship over the years"},
    {"Series_Title": "The Godfather", "Genre": "Crime, Drama", "IMDB_Rating": "9.2",
     "Overview": "The aging patriarch of a crime dynasty transfers control to his son"},
    {"Series_Title": "The Dark Knight", "Genre": "Action, Crime, Drama", "IMDB_Rating": 9.0,
     "Overview": "The Joker wreaks cruel and violent chaos on the people of Gotham"},
    {"Series_Title": "Pulp Fiction", "Genre": "Crime, Drama", "IMDB_Rating": 8.9,
     "Overview": "The lives of two mob hitmen and a boxer intertwine in tales of violence"},
    {"Series_Title": "Forrest Gump", "Genre": "Drama, Romance", "IMDB_Rating": 8.8,
     "Overview": "A kind and wonderful man witnesses decades of history"},
    {"Series_Title": "Spirited Away", "Genre": "Animation, Adventure, Family", "IMDB_Rating": 8.6,
     "Overview": "A girl wanders into a world of spirits and gods"},
    {"Series_Title": "Toy Story", "Genre": "Animation, Adventure, Comedy", "IMDB_Rating": 8.3,
     "Overview": "A happy cowboy doll is threatened by a new spaceman toy"},
    {"Series_Title": "Up", "Genre": "Animation, Adventure, Comedy", "IMDB_Rating": 8.3,
     "Overview": "An old man ties balloons to his house and flies away"},
    {"Series_Title": "Se7en", "Genre": "Crime, Drama, Mystery", "IMDB_Rating": 8.6,
     "Overview": "Two detectives hunt a serial killer who uses the deadly sins"},
    {"Series_Title": "Bad Movie", "Genre": "Comedy", "IMDB_Rating": "n/a",
     "Overview": "An awful and terrible mess"}
]"#;

/// Log output for failing runs, e.g. `RUST_LOG=tf_idf_recommender=debug`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn corpus() -> CorpusStore {
    let records: Vec<RawItem> = serde_json::from_str(RECORDS).unwrap();
    CorpusStore::load(records).unwrap()
}

fn index() -> IndexedCorpus {
    init_tracing();
    IndexedCorpus::build_with_backend(corpus(), Arc::new(LexiconBackend::default()), EngineConfig::default())
        .unwrap()
}

fn no_shuffle(count: usize) -> RecommendationRequest {
    RecommendationRequest::new(count).shuffle(false)
}

#[test]
fn example_corpus() {
    init_tracing();
    let index = build_index(
        CorpusStore::load(vec![
            RawItem::new("A").categories("Drama").description("A story of hope").quality_score(9.0),
            RawItem::new("B").categories("Drama").description("A tale of despair").quality_score(5.0),
        ])
        .unwrap(),
    );
    let result = index.recommend(&RecommendationRequest::new(5).min_quality(6.0)).unwrap();
    assert_eq!(result.titles(), vec!["A"]);
    let result = index.recommend(&RecommendationRequest::new(1).seed_title("A")).unwrap();
    assert_eq!(result.titles(), vec!["B"]);
}

#[test]
fn records_load_from_json_with_lenient_scores() {
    let corpus = corpus();
    assert_eq!(corpus.len(), 10);
    assert_eq!(corpus.get(1).unwrap().quality_score, 9.2);
    assert_eq!(corpus.get(9).unwrap().quality_score, 0.0);
    assert!(corpus.list_categories().contains(&"Mystery".to_string()));
}

#[test]
fn one_unit_vector_per_item() {
    let index = index();
    assert_eq!(index.vectors().len(), index.len());
    for id in 0..index.len() {
        let v = index.vector(id).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-5);
        assert!((v.cosine_similarity(v) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn never_more_than_count_or_below_min_quality() {
    let index = index();
    let seeds = [None, Some("The Godfather"), Some("toy"), Some("Nothing Like This")];
    for seed in seeds {
        for count in 1..=6 {
            for min_quality in [0.0, 8.5, 9.1] {
                let mut request = RecommendationRequest::new(count).min_quality(min_quality);
                if let Some(seed) = seed {
                    request = request.seed_title(seed);
                }
                let result = index.recommend(&request).unwrap();
                assert!(result.len() <= count);
                assert!(result.iter().all(|c| c.item.quality_score >= min_quality));
            }
        }
    }
}

#[test]
fn orderings_by_mode() {
    let index = index();
    let similar = index.recommend(&no_shuffle(5).seed_title("The Godfather")).unwrap();
    assert_eq!(similar.mode, RankingMode::Similarity);
    let sims: Vec<f64> = similar.iter().map(|c| c.similarity.unwrap()).collect();
    assert!(sims.windows(2).all(|w| w[0] >= w[1]));

    let general = index.recommend(&no_shuffle(10)).unwrap();
    assert_eq!(general.mode, RankingMode::General);
    let scores: Vec<f64> = general.iter().map(|c| c.item.quality_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    // Toy Story and Up tie at 8.3 and keep corpus order
    let titles = general.titles();
    let toy = titles.iter().position(|t| *t == "Toy Story").unwrap();
    let up = titles.iter().position(|t| *t == "Up").unwrap();
    assert_eq!(up, toy + 1);
}

#[test]
fn category_filter_is_case_insensitive_substring() {
    let index = index();
    let result = index.recommend(&no_shuffle(10).category("ANIM")).unwrap();
    assert_eq!(result.titles(), vec!["Spirited Away", "Toy Story", "Up"]);
}

#[test]
fn mood_relaxation_is_never_empty_with_neutral_items() {
    let index = index();
    for label in [SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative] {
        for category in ["drama", "animation", "comedy", "mystery"] {
            let result = index.recommend(&no_shuffle(3).category(category).mood(label)).unwrap();
            assert!(!result.is_empty(), "{category} / {label}");
        }
    }
    let negative = index.recommend(&no_shuffle(3).mood(SentimentLabel::Negative)).unwrap();
    assert!(negative.iter().all(|c| c.sentiment.label == SentimentLabel::Negative));
}

#[test]
fn idempotent_without_shuffle() {
    let index = index();
    for request in [no_shuffle(4), no_shuffle(4).seed_title("se7en"), no_shuffle(4).mood(SentimentLabel::Positive)] {
        let a = index.recommend(&request).unwrap();
        let b = index.recommend(&request).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn shuffle_keeps_the_result_set_when_nothing_is_cut() {
    let index = index();
    let fixed: BTreeSet<&str> = index.recommend(&no_shuffle(10)).unwrap().titles().into_iter().collect();
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = index
            .recommend_with_rng(&RecommendationRequest::new(10), &mut rng)
            .unwrap();
        let set: BTreeSet<&str> = shuffled.titles().into_iter().collect();
        assert_eq!(set, fixed);
    }
}

#[test]
fn invalid_requests() {
    let index = index();
    assert!(matches!(index.recommend(&RecommendationRequest::new(0)), Err(RecommendError::Validation(_))));
    assert!(matches!(
        index.recommend(&RecommendationRequest::new(2).min_quality(f64::INFINITY)),
        Err(RecommendError::Validation(_))
    ));
}

#[test]
fn missing_title_fails_the_whole_load() {
    let records: Vec<RawItem> =
        serde_json::from_str(r#"[{"title": "Ok"}, {"genre": "Drama", "overview": "no title"}]"#).unwrap();
    let err = CorpusStore::load(records).unwrap_err();
    assert!(matches!(err, RecommendError::Schema { row: 1, .. }));
}
