use std::collections::{BTreeSet, HashMap};

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RecommendError, Result};

/// Category source as it appears in a record: either one delimited string
/// (`"Drama, Crime"` or `"Drama|Crime"`) or an explicit list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategories {
    Delimited(String),
    List(Vec<String>),
}

/// Quality score as it appears in a record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawScore {
    /// Finite score, `None` when the value is not a finite number
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawScore::Number(n) => *n,
            RawScore::Text(s) => s.trim().parse::<f64>().ok()?,
            RawScore::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Lenient conversion, anything that is not a finite number becomes 0.0
    pub fn coerce(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }
}

/// One corpus record before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawItem {
    #[serde(default, alias = "Title", alias = "Series_Title")]
    pub title: Option<String>,
    #[serde(default, alias = "genre", alias = "Genre")]
    pub categories: Option<RawCategories>,
    #[serde(default, alias = "overview", alias = "Overview")]
    pub description: Option<String>,
    #[serde(default, alias = "rating", alias = "IMDB_Rating")]
    pub quality_score: Option<RawScore>,
}

impl RawItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(RawCategories::Delimited(categories.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(RawScore::Number(score));
        self
    }
}

/// A validated, immutable corpus item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// row position in the corpus
    pub id: usize,
    pub title: String,
    /// category tags in source order
    pub categories: Vec<String>,
    /// category text as given, used for substring matching
    pub category_text: String,
    pub description: String,
    pub quality_score: f64,
    /// `category_text + " " + description`
    pub combined_text: String,
}

impl Item {
    /// Case-insensitive substring match against the category text
    pub fn matches_category(&self, filter: &str) -> bool {
        self.category_text
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }

    /// Split a delimited category string on `,` and `|`
    pub fn split_categories(text: &str) -> Vec<String> {
        text.split([',', '|'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Corpus Store
/// Holds the validated items in row order and a case-insensitive title lookup.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    items: Vec<Item>,
    title_index: HashMap<String, usize>,
}

impl CorpusStore {
    /// Validate records and derive the per-item fields.
    ///
    /// Fails with `RecommendError::Schema` when a title is missing or blank,
    /// or when two titles are equal ignoring case. Missing categories or
    /// description become empty strings; an unparseable quality score
    /// becomes 0.0.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawItem>,
    {
        let mut items = Vec::new();
        let mut coerced_scores = 0usize;
        for (row, record) in records.into_iter().enumerate() {
            let title = match record.title {
                Some(t) if !t.trim().is_empty() => t.trim().to_string(),
                Some(_) => return Err(RecommendError::schema(row, "title is blank")),
                None => return Err(RecommendError::schema(row, "missing required field `title`")),
            };

            let (categories, category_text) = match record.categories {
                Some(RawCategories::Delimited(text)) => (Item::split_categories(&text), text),
                Some(RawCategories::List(list)) => {
                    let list: Vec<String> = list
                        .into_iter()
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect();
                    let text = list.join(", ");
                    (list, text)
                }
                None => (Vec::new(), String::new()),
            };

            let description = record.description.unwrap_or_default();
            let quality_score = match record.quality_score.as_ref().map(RawScore::parse) {
                Some(Some(score)) => score,
                Some(None) => {
                    coerced_scores += 1;
                    0.0
                }
                None => 0.0,
            };
            let combined_text = format!("{} {}", category_text, description);

            items.push(Item {
                id: row,
                title,
                categories,
                category_text,
                description,
                quality_score,
                combined_text,
            });
        }
        if coerced_scores > 0 {
            warn!(coerced_scores, "quality scores could not be parsed and were set to 0.0");
        }
        let store = Self::from_items(items)?;
        debug!(items = store.len(), "corpus loaded");
        Ok(store)
    }

    /// Rebuild a store from already validated items, ids are reassigned by position
    pub(crate) fn from_items(mut items: Vec<Item>) -> Result<Self> {
        let mut title_index = HashMap::with_capacity(items.len());
        for (row, item) in items.iter_mut().enumerate() {
            item.id = row;
            if let Some(first) = title_index.insert(item.title.to_lowercase(), row) {
                return Err(RecommendError::schema(
                    row,
                    format!("duplicate title `{}` (first seen at row {first})", item.title),
                ));
            }
        }
        Ok(Self { items, title_index })
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Item> {
        self.items.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact title lookup ignoring case
    pub fn find_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(&title.trim().to_lowercase()).copied()
    }

    /// First item among `ids` whose title contains `needle`, ignoring case
    pub fn find_title_containing<I>(&self, needle: &str, ids: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let needle = needle.trim().to_lowercase();
        ids.into_iter().find(|&id| {
            self.items
                .get(id)
                .is_some_and(|item| item.title.to_lowercase().contains(&needle))
        })
    }

    /// Every category name in the corpus, sorted and de-duplicated
    pub fn list_categories(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.categories.iter().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// `combined_text` of each item, in corpus order
    pub fn combined_texts(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.combined_text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_derives_combined_text_and_defaults() {
        let store = CorpusStore::load(vec![
            RawItem::new("A").categories("Drama, Crime").description("A story of hope").quality_score(9.0),
            RawItem::new("B"),
        ])
        .unwrap();
        let a = store.get(0).unwrap();
        assert_eq!(a.categories, vec!["Drama", "Crime"]);
        assert_eq!(a.combined_text, "Drama, Crime A story of hope");
        let b = store.get(1).unwrap();
        assert_eq!(b.id, 1);
        assert_eq!(b.description, "");
        assert_eq!(b.category_text, "");
        assert_eq!(b.quality_score, 0.0);
    }

    #[test]
    fn missing_title_is_a_schema_error() {
        let err = CorpusStore::load(vec![RawItem::new("A"), RawItem::default()]).unwrap_err();
        match err {
            RecommendError::Schema { row, .. } => assert_eq!(row, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_titles_ignoring_case_are_rejected() {
        let err = CorpusStore::load(vec![RawItem::new("Heat"), RawItem::new("HEAT")]).unwrap_err();
        assert!(err.to_string().contains("duplicate title"));
    }

    #[test]
    fn unparseable_scores_become_zero() {
        assert_eq!(RawScore::Text("8.5".into()).coerce(), 8.5);
        assert_eq!(RawScore::Text("n/a".into()).coerce(), 0.0);
        assert_eq!(RawScore::Number(f64::NAN).coerce(), 0.0);
        assert_eq!(RawScore::Other(IgnoredAny).coerce(), 0.0);
    }

    #[test]
    fn zero_text_score_is_a_valid_score() {
        assert_eq!(RawScore::Text(" 0 ".into()).parse(), Some(0.0));
        assert_eq!(RawScore::Number(0.0).parse(), Some(0.0));
        assert_eq!(RawScore::Text("n/a".into()).parse(), None);
        assert_eq!(RawScore::Text("inf".into()).parse(), None);
        assert_eq!(RawScore::Number(f64::INFINITY).parse(), None);
        assert_eq!(RawScore::Other(IgnoredAny).parse(), None);

        let store = CorpusStore::load(vec![RawItem {
            quality_score: Some(RawScore::Text("0".into())),
            ..RawItem::new("Zero")
        }])
        .unwrap();
        assert_eq!(store.get(0).unwrap().quality_score, 0.0);
    }

    #[test]
    fn title_lookups() {
        let store = CorpusStore::load(vec![
            RawItem::new("The Dark Knight"),
            RawItem::new("Dark City"),
            RawItem::new("Knight and Day"),
        ])
        .unwrap();
        assert_eq!(store.find_title("the dark KNIGHT"), Some(0));
        assert_eq!(store.find_title("dark"), None);
        assert_eq!(store.find_title_containing("dark", 0..store.len()), Some(0));
        assert_eq!(store.find_title_containing("dark", [1, 2]), Some(1));
        assert_eq!(store.find_title_containing("space", 0..store.len()), None);
    }

    #[test]
    fn categories_split_on_comma_and_pipe() {
        let store = CorpusStore::load(vec![
            RawItem::new("A").categories("Drama|Crime"),
            RawItem::new("B").categories("Comedy, Drama"),
        ])
        .unwrap();
        assert_eq!(store.list_categories(), vec!["Comedy", "Crime", "Drama"]);
        assert!(store.get(0).unwrap().matches_category("crime"));
        assert!(!store.get(1).unwrap().matches_category("crime"));
    }
}
