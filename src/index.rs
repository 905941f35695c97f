use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::EngineConfig,
    corpus::{CorpusStore, Item},
    error::{RecommendError, Result},
    recommend::{self, RecommendationRequest, RecommendationResult},
    sentiment::{SentimentBackend, SentimentResult, SentimentScorer},
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        evaluate::scoring::{cosine_ranking, Hits},
        TermVectors, TextIndexer, Vocabulary,
    },
};

/// Indexed Corpus
/// The immutable, precomputed state every query runs against:
/// - the corpus items
/// - one TF-IDF vector per item and the fitted vocabulary
/// - the sentiment of each item's description
///
/// Nothing mutates it after `build`; share it behind an `Arc` (or a
/// `SharedIndex`) to serve concurrent readers.
#[derive(Debug, Clone)]
pub struct IndexedCorpus {
    corpus: CorpusStore,
    vectors: TermVectors<f32>,
    vocabulary: Vocabulary,
    sentiments: Vec<SentimentResult>,
    scorer: SentimentScorer,
    indexer: TextIndexer<f32>,
    config: EngineConfig,
}

/// Build an index with default configuration and no sentiment backend
pub fn build_index(corpus: CorpusStore) -> IndexedCorpus {
    IndexedCorpus::assemble(corpus, SentimentScorer::noop(), EngineConfig::default())
}

/// Serializable form of `IndexedCorpus`.
/// The sentiment backend is not part of it and is supplied on restore.
#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    items: Vec<Item>,
    vectors: TermVectors<f32>,
    vocabulary: Vocabulary,
    sentiments: Vec<SentimentResult>,
    config: EngineConfig,
}

impl IndexedCorpus {
    /// Vectorize every item and precompute its sentiment.
    /// Fails with `RecommendError::Config` when `config` does not validate.
    pub fn build(corpus: CorpusStore, scorer: SentimentScorer, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(corpus, scorer, config))
    }

    /// `config` must already be valid
    fn assemble(corpus: CorpusStore, scorer: SentimentScorer, config: EngineConfig) -> Self {
        let indexer = TextIndexer::new(&config.index);
        let (vectors, vocabulary) = indexer.build(&corpus.combined_texts());
        let sentiments: Vec<SentimentResult> = corpus
            .items()
            .iter()
            .map(|item| scorer.score(&item.description))
            .collect();
        info!(
            items = corpus.len(),
            vocabulary = vocabulary.len(),
            "index built"
        );
        Self {
            corpus,
            vectors,
            vocabulary,
            sentiments,
            scorer,
            indexer,
            config,
        }
    }

    /// Build with the given backend, labelling with the configured thresholds
    pub fn build_with_backend(
        corpus: CorpusStore,
        backend: Arc<dyn SentimentBackend>,
        config: EngineConfig,
    ) -> Result<Self> {
        let scorer = SentimentScorer::new(backend, &config.recommend);
        Self::build(corpus, scorer, config)
    }

    #[inline]
    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    #[inline]
    pub fn vectors(&self) -> &TermVectors<f32> {
        &self.vectors
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Cached sentiment of item `id`
    #[inline]
    pub fn sentiment(&self, id: usize) -> Option<SentimentResult> {
        self.sentiments.get(id).copied()
    }

    #[inline]
    pub fn vector(&self, id: usize) -> Option<&ZeroSpVec<f32>> {
        self.vectors.get(id)
    }

    /// Score free text (e.g. how the user feels) with the index's scorer
    pub fn interpret_mood(&self, text: &str) -> SentimentResult {
        self.scorer.score(text)
    }

    /// Items ranked by similarity to item `id`, the item itself excluded
    pub fn similar_to_item(&self, id: usize) -> Option<Hits> {
        let seed = self.vectors.get(id)?;
        Some(cosine_ranking(seed, &self.vectors.vectors, Some(id)))
    }

    /// Items ranked by similarity to arbitrary text
    pub fn similar_to_text(&self, text: &str) -> Hits {
        let query = self.indexer.transform(text, &self.vectors, &self.vocabulary);
        cosine_ranking(&query, &self.vectors.vectors, None)
    }

    /// Empty request using this index's default result count
    pub fn request(&self) -> RecommendationRequest {
        RecommendationRequest::from_config(&self.config.recommend)
    }

    /// Run a recommendation request, shuffling with the thread-local RNG
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResult<'_>> {
        recommend::recommend(self, request)
    }

    /// Run a recommendation request with a caller-provided RNG
    pub fn recommend_with_rng<R>(
        &self,
        request: &RecommendationRequest,
        rng: &mut R,
    ) -> Result<RecommendationResult<'_>>
    where
        R: Rng + ?Sized,
    {
        recommend::recommend_with_rng(self, request, rng)
    }

    fn to_snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            items: self.corpus.items().to_vec(),
            vectors: self.vectors.clone(),
            vocabulary: self.vocabulary.clone(),
            sentiments: self.sentiments.clone(),
            config: self.config.clone(),
        }
    }

    /// Encode the index as CBOR
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        serde_cbor::to_vec(&self.to_snapshot()).map_err(|e| RecommendError::Snapshot(e.to_string()))
    }

    /// Decode an index written by `to_cbor`.
    /// Item sentiments come from the snapshot, `backend` only serves
    /// `interpret_mood`.
    pub fn from_cbor(bytes: &[u8], backend: Arc<dyn SentimentBackend>) -> Result<Self> {
        let snapshot: IndexSnapshot =
            serde_cbor::from_slice(bytes).map_err(|e| RecommendError::Snapshot(e.to_string()))?;
        let item_num = snapshot.items.len();
        if snapshot.vectors.len() != item_num || snapshot.sentiments.len() != item_num {
            return Err(RecommendError::Snapshot(format!(
                "snapshot holds {} items but {} vectors and {} sentiments",
                item_num,
                snapshot.vectors.len(),
                snapshot.sentiments.len()
            )));
        }
        if snapshot.vectors.idf.len() != snapshot.vocabulary.len() {
            return Err(RecommendError::Snapshot(
                "idf length does not match vocabulary".to_string(),
            ));
        }
        let dims = snapshot.vocabulary.len();
        if let Some(id) = snapshot.vectors.vectors.iter().position(|v| v.len() != dims) {
            return Err(RecommendError::Snapshot(format!(
                "vector {} has {} dimensions, vocabulary has {}",
                id,
                snapshot.vectors.vectors[id].len(),
                dims
            )));
        }
        snapshot.config.validate()?;
        let corpus = CorpusStore::from_items(snapshot.items)?;
        Ok(Self {
            corpus,
            vectors: snapshot.vectors,
            vocabulary: snapshot.vocabulary,
            sentiments: snapshot.sentiments,
            scorer: SentimentScorer::new(backend, &snapshot.config.recommend),
            indexer: TextIndexer::new(&snapshot.config.index),
            config: snapshot.config,
        })
    }
}

/// Shared handle to the current index.
/// Readers take an `Arc` snapshot; a rebuild swaps the whole snapshot at once,
/// so a query never sees a half-updated index.
#[derive(Debug)]
pub struct SharedIndex {
    current: RwLock<Arc<IndexedCorpus>>,
}

impl SharedIndex {
    pub fn new(index: IndexedCorpus) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<IndexedCorpus> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install `index` and return the previous snapshot
    pub fn replace(&self, index: IndexedCorpus) -> Arc<IndexedCorpus> {
        let next = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Build a new index for `corpus` with the current scorer and config,
    /// then swap it in. The old snapshot stays valid for readers holding it.
    pub fn rebuild(&self, corpus: CorpusStore) -> Arc<IndexedCorpus> {
        let current = self.snapshot();
        // every IndexedCorpus constructor validates its config
        let next = IndexedCorpus::assemble(corpus, current.scorer.clone(), current.config.clone());
        self.replace(next)
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(build_index(CorpusStore::default()))
    }
}
