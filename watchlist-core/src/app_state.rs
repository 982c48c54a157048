use std::sync::Arc;

use crate::{
    domain::{DocumentStore, MovieCatalog, UserIdentity},
    services::{SaveMode, SavedMovieStore, SearchMetrics},
    utils::StoreSettings,
};

pub type DocumentStoreType = Arc<dyn DocumentStore>;
pub type MovieCatalogType = Arc<dyn MovieCatalog>;
pub type SavedMovieStoreType = Arc<SavedMovieStore>;

/// Everything a screen needs, passed in explicitly: the collaborators, the store layout and
/// the signed-in user, if any.
#[derive(Clone)]
pub struct AppState {
    pub saved_movies: SavedMovieStoreType,
    pub search_metrics: Arc<SearchMetrics>,
    pub catalog: MovieCatalogType,
    pub identity: Option<UserIdentity>,
}

impl AppState {
    pub fn new(
        document_store: DocumentStoreType,
        catalog: MovieCatalogType,
        settings: &StoreSettings,
        save_mode: SaveMode,
    ) -> Self {
        Self {
            saved_movies: Arc::new(
                SavedMovieStore::new(document_store.clone(), settings).with_save_mode(save_mode),
            ),
            search_metrics: Arc::new(SearchMetrics::new(document_store, settings)),
            catalog,
            identity: None,
        }
    }

    pub fn with_identity(mut self, identity: UserIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
    }
}
