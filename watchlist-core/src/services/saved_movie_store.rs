use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    app_state::DocumentStoreType,
    domain::{
        Document, DocumentId, DocumentStoreError, MovieSnapshot, Query, SavedMovie, SavedStatus,
    },
    utils::StoreSettings,
};

const USER_ID: &str = "userId";
const MOVIE_ID: &str = "movieId";
const MOVIE_DATA: &str = "movieData";

/// How saved-movie records get their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// The store assigns a fresh id to every save. Two racing saves can both land.
    #[default]
    StoreAssigned,
    /// The id is derived from (user, movie), so the store itself rejects a second save.
    KeyedByMovie,
}

/// The saved-movies collection.
///
/// Remote failures never reach the caller: they are logged and turned into
/// "not saved", `None`, `false` or an empty list.
pub struct SavedMovieStore {
    store: DocumentStoreType,
    collection_id: String,
    mode: SaveMode,
}

impl SavedMovieStore {
    pub fn new(store: DocumentStoreType, settings: &StoreSettings) -> Self {
        Self {
            store,
            collection_id: settings.saved_movies_collection_id.clone(),
            mode: SaveMode::default(),
        }
    }

    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }

    #[tracing::instrument(name = "Check if saved", skip(self))]
    pub async fn check_if_saved(&self, user_id: &str, movie_id: i64) -> SavedStatus {
        let queries = [
            Query::equal(USER_ID, user_id),
            Query::equal(MOVIE_ID, movie_id.to_string()),
        ];

        match self.store.list_documents(&self.collection_id, &queries).await {
            Ok(documents) => {
                if documents.len() > 1 {
                    tracing::warn!(
                        matches = documents.len(),
                        "Found duplicate saved-movie records, using the first one"
                    );
                }
                documents
                    .into_iter()
                    .find_map(parse_saved_movie)
                    .map(SavedStatus::from)
                    .unwrap_or_else(SavedStatus::not_saved)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error checking if movie is saved");
                SavedStatus::not_saved()
            }
        }
    }

    /// Returns the id of the record holding the save.
    #[tracing::instrument(name = "Save movie", skip(self, snapshot))]
    pub async fn save_movie(
        &self,
        user_id: &str,
        movie_id: i64,
        snapshot: &MovieSnapshot,
    ) -> Option<String> {
        let movie_data = match serde_json::to_string(snapshot) {
            Ok(movie_data) => movie_data,
            Err(e) => {
                tracing::error!(error = %e, "Error serializing movie snapshot");
                return None;
            }
        };

        let mut data = Map::new();
        data.insert(USER_ID.to_owned(), Value::from(user_id));
        data.insert(MOVIE_ID.to_owned(), Value::from(movie_id.to_string()));
        data.insert(MOVIE_DATA.to_owned(), Value::from(movie_data));

        let document_id = match self.mode {
            SaveMode::StoreAssigned => DocumentId::Unique,
            SaveMode::KeyedByMovie => DocumentId::Custom(keyed_record_id(user_id, movie_id)),
        };

        match self
            .store
            .create_document(&self.collection_id, document_id.clone(), data)
            .await
        {
            Ok(document) => {
                tracing::info!(record_id = %document.id, "Saved movie");
                Some(document.id)
            }
            Err(DocumentStoreError::DocumentAlreadyExists) => match document_id {
                DocumentId::Custom(id) => {
                    tracing::info!(record_id = %id, "Movie was already saved");
                    Some(id)
                }
                DocumentId::Unique => {
                    tracing::error!("Store rejected a generated record id");
                    None
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Error saving movie");
                None
            }
        }
    }

    #[tracing::instrument(name = "Remove saved movie", skip(self))]
    pub async fn remove_saved_movie(&self, record_id: &str) -> bool {
        match self
            .store
            .delete_document(&self.collection_id, record_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Error removing saved movie");
                false
            }
        }
    }

    /// All of a user's saved movies, in whatever order the store returns them.
    #[tracing::instrument(name = "Fetch saved movies", skip(self))]
    pub async fn fetch_saved_movies(&self, user_id: &str) -> Vec<SavedMovie> {
        match self
            .store
            .list_documents(&self.collection_id, &[Query::equal(USER_ID, user_id)])
            .await
        {
            Ok(documents) => documents.into_iter().filter_map(parse_saved_movie).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching saved movies");
                Vec::new()
            }
        }
    }
}

pub fn keyed_record_id(user_id: &str, movie_id: i64) -> String {
    let key = format!("{}:{}", user_id, movie_id);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
        .simple()
        .to_string()
}

fn parse_saved_movie(document: Document) -> Option<SavedMovie> {
    let user_id = document.get_str(USER_ID)?.to_string();
    // Stored as a string so equality queries match it.
    let Some(movie_id) = document.get_str(MOVIE_ID).and_then(|id| id.parse().ok()) else {
        tracing::warn!(record_id = %document.id, "Skipping saved movie without a movie id");
        return None;
    };

    let snapshot = document
        .get_str(MOVIE_DATA)
        .and_then(|raw| match serde_json::from_str::<MovieSnapshot>(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(record_id = %document.id, error = %e, "Unreadable movie snapshot");
                None
            }
        });

    Some(SavedMovie {
        record_id: document.id,
        user_id,
        movie_id,
        snapshot,
    })
}
