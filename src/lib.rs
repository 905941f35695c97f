/// This crate is a content-based Recommendation Engine using TF-IDF vectors,
/// cosine similarity and sentiment re-ranking.
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod recommend;
pub mod sentiment;
pub mod utils;
pub mod vectorizer;

/// Indexed Corpus
/// The top-level struct of this crate. It is built once from a `CorpusStore`
/// and answers every recommendation request afterwards.
///
/// Internally, it holds:
/// - The validated corpus items
/// - One L2 normalized TF-IDF vector per item
/// - The fitted vocabulary and its IDF weights
/// - The cached sentiment of each item's description
/// - The sentiment scorer, for mood interpretation
///
/// # Thread Safety
/// Immutable after build, `Send + Sync`.
/// Use `SharedIndex` to swap in a rebuilt index while readers keep running.
///
/// # Serialization
/// CBOR snapshots via `to_cbor` / `from_cbor`.
/// The sentiment backend is not serialized and is supplied on restore.
pub use index::{build_index, IndexedCorpus, SharedIndex};

/// Corpus Store
/// Validates raw records into immutable `Item`s.
/// - `title` is required and unique ignoring case
/// - categories come from a `,` / `|` delimited string or a list
/// - a missing or unparseable quality score becomes 0.0
pub use corpus::{CorpusStore, Item, RawItem};

/// Recommendation request and result types
/// - `RecommendationRequest`: seed title, filters, mood, count and shuffle flag
/// - `RecommendationResult`: ranked `Candidate`s and the mode that ranked them
pub use recommend::{
    Candidate, RankingMode, RecommendationRequest, RecommendationResult, SeedMatch,
};

/// Sentiment Scorer
/// Maps text to a polarity in [-1, 1] and a three-way label through a
/// pluggable `SentimentBackend`.
///
/// Backends provided:
/// - `NoopBackend`: always unavailable, every text is Neutral (default)
/// - `LexiconBackend`: word polarities with negation and intensifiers
pub use sentiment::{
    LexiconBackend, NoopBackend, SentimentBackend, SentimentLabel, SentimentResult,
    SentimentScorer,
};

/// Text Indexer
/// Fits a bounded, alphabetically ordered vocabulary and produces TF-IDF vectors.
pub use vectorizer::{TermVectors, TextIndexer, Vocabulary};

/// Token Frequency structure
/// A struct for analyzing/managing token occurrence frequency within a document.
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
///
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TokenFrequency;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `TextIndexer<N, E>`.
/// A default implementation, `DefaultTFIDFEngine`, is provided and performs
/// raw-count TF with smoothed IDF, L2 normalized.
///
/// The default implementation supports the following value types:
/// - f32
/// - f64
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Similarity Hits and Hit Entry structures
/// Data structures for managing similarity results.
/// - `Hits`: holds a list of results and provides features such as sorting by score
/// - `HitEntry`: represents a single result entry, containing the item index and score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Engine configuration, loadable from TOML
pub use config::{EngineConfig, IndexConfig, RecommendConfig};

pub use error::{RecommendError, Result};
