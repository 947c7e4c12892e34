//! Collaborators that fetch literature data for the graph factories.
//!
//! Network clients live outside this crate; tests pass in-memory fixtures.

use serde_json::{Map, Value};

use crate::pubtator::PubTatorTable;

/// One PubMed search hit; carries at least an `Id`.
pub type ArticleRecord = Map<String, Value>;

pub trait PubMedSearch {
    fn search(&self, keyword: &str) -> anyhow::Result<Vec<ArticleRecord>>;
}

pub trait PubTatorAnnotations {
    /// Annotated entities per article id.
    fn annotations(&self, article_ids: &[u64]) -> anyhow::Result<PubTatorTable>;
}

impl<F> PubMedSearch for F
where
    F: Fn(&str) -> anyhow::Result<Vec<ArticleRecord>>,
{
    fn search(&self, keyword: &str) -> anyhow::Result<Vec<ArticleRecord>> {
        self(keyword)
    }
}

impl PubTatorAnnotations for PubTatorTable {
    fn annotations(&self, article_ids: &[u64]) -> anyhow::Result<PubTatorTable> {
        Ok(self
            .iter()
            .filter(|(pmid, _)| article_ids.contains(pmid))
            .map(|(pmid, entities)| (*pmid, entities.clone()))
            .collect())
    }
}
