//! Recommendation Orchestrator
//!
//! Turns a `RecommendationRequest` into a ranked list of candidates. Two modes:
//! - similarity mode, when the seed title resolves to an item
//! - general mode otherwise, ranked by quality with optional mood preference
//!
//! Both modes work on read-only `IndexedCorpus` state.

pub mod request;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::index::IndexedCorpus;
use crate::sentiment::{SentimentLabel, SentimentResult};

pub use request::{Candidate, RankingMode, RecommendationRequest, RecommendationResult, SeedMatch};

/// Run `request` against `index`, shuffling with the thread-local RNG
pub fn recommend<'a>(
    index: &'a IndexedCorpus,
    request: &RecommendationRequest,
) -> Result<RecommendationResult<'a>> {
    recommend_with_rng(index, request, &mut rand::rng())
}

/// Run `request` against `index` with a caller-provided RNG.
/// The RNG is only drawn from when `shuffle_before_rank` is set.
pub fn recommend_with_rng<'a, R>(
    index: &'a IndexedCorpus,
    request: &RecommendationRequest,
    rng: &mut R,
) -> Result<RecommendationResult<'a>>
where
    R: Rng + ?Sized,
{
    request.validate()?;

    let corpus = index.corpus();
    let filtered: Vec<usize> = corpus
        .items()
        .iter()
        .filter(|item| request.accepts(item))
        .map(|item| item.id)
        .collect();
    if filtered.is_empty() {
        debug!(
            category = request.category_filter(),
            min_quality = request.min_quality,
            "no item passes the filters"
        );
        return Ok(RecommendationResult::empty());
    }

    match resolve_seed(index, request, &filtered) {
        Some((seed_id, how)) => {
            debug!(seed = seed_id, matched = ?how, "similarity mode");
            Ok(similarity_mode(index, request, seed_id, how, rng))
        }
        None => {
            debug!(seed = request.seed(), "general mode");
            Ok(general_mode(index, request, filtered, rng))
        }
    }
}

/// Exact title in the whole corpus, then a title substring within the
/// filtered items, then a title substring anywhere
fn resolve_seed(
    index: &IndexedCorpus,
    request: &RecommendationRequest,
    filtered: &[usize],
) -> Option<(usize, SeedMatch)> {
    let seed = request.seed()?;
    let corpus = index.corpus();
    if let Some(id) = corpus.find_title(seed) {
        return Some((id, SeedMatch::Exact));
    }
    if let Some(id) = corpus.find_title_containing(seed, filtered.iter().copied()) {
        return Some((id, SeedMatch::FilteredSubstring));
    }
    corpus
        .find_title_containing(seed, 0..corpus.len())
        .map(|id| (id, SeedMatch::CorpusSubstring))
}

fn candidate<'a>(index: &'a IndexedCorpus, id: usize, similarity: Option<f64>) -> Option<Candidate<'a>> {
    let item = index.corpus().get(id)?;
    Some(Candidate {
        item,
        sentiment: index.sentiment(id).unwrap_or(SentimentResult::NEUTRAL),
        similarity,
    })
}

fn similarity_mode<'a, R>(
    index: &'a IndexedCorpus,
    request: &RecommendationRequest,
    seed_id: usize,
    how: SeedMatch,
    rng: &mut R,
) -> RecommendationResult<'a>
where
    R: Rng + ?Sized,
{
    let limit = request
        .result_count
        .saturating_mul(index.config().recommend.candidate_multiplier);
    let hits = index.similar_to_item(seed_id).unwrap_or_default();

    let mut candidates: Vec<Candidate<'a>> = Vec::with_capacity(limit.min(hits.len()));
    for hit in hits {
        if candidates.len() >= limit {
            break;
        }
        let Some(c) = candidate(index, hit.index, Some(hit.score)) else { continue };
        if request.accepts(c.item) {
            candidates.push(c);
        }
    }
    debug!(collected = candidates.len(), limit, "similarity candidates");

    if request.shuffle_before_rank {
        candidates.shuffle(rng);
    }
    candidates.sort_by(|a, b| {
        let (a, b) = (a.similarity.unwrap_or(0.0), b.similarity.unwrap_or(0.0));
        b.total_cmp(&a)
    });
    candidates.truncate(request.result_count);

    RecommendationResult {
        mode: RankingMode::Similarity,
        seed: index.corpus().get(seed_id).map(|item| (item, how)),
        candidates,
    }
}

fn general_mode<'a, R>(
    index: &'a IndexedCorpus,
    request: &RecommendationRequest,
    filtered: Vec<usize>,
    rng: &mut R,
) -> RecommendationResult<'a>
where
    R: Rng + ?Sized,
{
    let pool: Vec<Candidate<'a>> = filtered
        .into_iter()
        .filter_map(|id| candidate(index, id, None))
        .collect();

    let mut candidates = match request.mood_label {
        Some(label) => relax_mood(pool, label),
        None => pool,
    };

    if request.shuffle_before_rank {
        candidates.shuffle(rng);
    }
    candidates.sort_by(|a, b| b.item.quality_score.total_cmp(&a.item.quality_score));
    candidates.truncate(request.result_count);

    RecommendationResult {
        mode: RankingMode::General,
        seed: None,
        candidates,
    }
}

/// Items with `label`; if none, items with `label` or Neutral; if still
/// none, the whole pool
fn relax_mood(pool: Vec<Candidate<'_>>, label: SentimentLabel) -> Vec<Candidate<'_>> {
    let exact: Vec<Candidate<'_>> = pool
        .iter()
        .filter(|c| c.sentiment.label == label)
        .cloned()
        .collect();
    if !exact.is_empty() {
        return exact;
    }
    let widened: Vec<Candidate<'_>> = pool
        .iter()
        .filter(|c| c.sentiment.label == label || c.sentiment.label == SentimentLabel::Neutral)
        .cloned()
        .collect();
    if !widened.is_empty() {
        debug!(mood = %label, "no exact mood match, widened to neutral");
        return widened;
    }
    debug!(mood = %label, "no mood match, using all candidates");
    pool
}
