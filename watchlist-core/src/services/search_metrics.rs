use serde_json::{Map, Value};

use crate::{
    app_state::DocumentStoreType,
    domain::{poster_url, Document, DocumentId, Movie, Query, SearchMetricsError, TrendingMovie},
    utils::StoreSettings,
};

const SEARCH_TERM: &str = "searchTerm";
const MOVIE_ID: &str = "movie_id";
const COUNT: &str = "count";
const POSTER_URL: &str = "poster_url";
const TITLE: &str = "title";

/// How many searches the home screen shows as trending.
pub const TRENDING_LIMIT: usize = 5;

/// Per-search-term counters behind the trending row.
pub struct SearchMetrics {
    store: DocumentStoreType,
    collection_id: String,
}

impl SearchMetrics {
    pub fn new(store: DocumentStoreType, settings: &StoreSettings) -> Self {
        Self {
            store,
            collection_id: settings.search_collection_id.clone(),
        }
    }

    /// Count one more search for `query`, remembering the movie it led to.
    #[tracing::instrument(name = "Update search count", skip(self, movie))]
    pub async fn update_search_count(
        &self,
        query: &str,
        movie: &Movie,
    ) -> Result<(), SearchMetricsError> {
        let existing = self
            .store
            .list_documents(&self.collection_id, &[Query::equal(SEARCH_TERM, query)])
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error reading search count");
                e
            })?;

        match existing.into_iter().next() {
            Some(document) => {
                let count = document
                    .get_i64(COUNT)
                    .ok_or_else(|| SearchMetricsError::MalformedDocument(document.id.clone()))?;
                let mut data = Map::new();
                data.insert(COUNT.to_owned(), Value::from(count + 1));
                self.store
                    .update_document(&self.collection_id, &document.id, data)
                    .await?;
            }
            None => {
                let mut data = Map::new();
                data.insert(SEARCH_TERM.to_owned(), Value::from(query));
                data.insert(MOVIE_ID.to_owned(), Value::from(movie.id));
                data.insert(COUNT.to_owned(), Value::from(1));
                data.insert(
                    POSTER_URL.to_owned(),
                    Value::from(poster_url(movie.poster_path.as_deref().unwrap_or(""))),
                );
                data.insert(TITLE.to_owned(), Value::from(movie.title.as_str()));
                self.store
                    .create_document(&self.collection_id, DocumentId::Unique, data)
                    .await?;
            }
        }

        Ok(())
    }

    /// The most searched terms, or `None` if the store could not be read.
    #[tracing::instrument(name = "Get trending movies", skip(self))]
    pub async fn get_trending_movies(&self) -> Option<Vec<TrendingMovie>> {
        let queries = [Query::limit(TRENDING_LIMIT), Query::order_desc(COUNT)];
        match self.store.list_documents(&self.collection_id, &queries).await {
            Ok(documents) => Some(documents.into_iter().filter_map(parse_trending).collect()),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching trending movies");
                None
            }
        }
    }
}

fn parse_trending(document: Document) -> Option<TrendingMovie> {
    Some(TrendingMovie {
        search_term: document.get_str(SEARCH_TERM)?.to_string(),
        movie_id: document.get_i64(MOVIE_ID)?,
        title: document.get_str(TITLE).unwrap_or_default().to_string(),
        count: document.get_i64(COUNT)?,
        poster_url: document.get_str(POSTER_URL).unwrap_or_default().to_string(),
        record_id: document.id,
    })
}
