pub mod app_state;
pub mod domain;
pub mod services;
pub mod utils;
pub mod view_models;


use std::sync::Arc;

use app_state::AppState;
use services::{AppwriteDocumentStore, SaveMode, TmdbClient};
use utils::Settings;

/// Wire the remote collaborators described by `settings` into an [`AppState`].
pub fn build_app_state(settings: &Settings, save_mode: SaveMode) -> AppState {
    let http_client = reqwest::Client::new();
    let document_store = Arc::new(AppwriteDocumentStore::new(
        http_client.clone(),
        &settings.store,
    ));
    let catalog = Arc::new(TmdbClient::new(http_client, &settings.catalog));

    AppState::new(document_store, catalog, &settings.store, save_mode)
}
