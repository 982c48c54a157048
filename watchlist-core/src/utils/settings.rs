use color_eyre::eyre::{eyre, Result};
use secrecy::Secret;

use super::constants::{
    env, APPWRITE_API_KEY, APPWRITE_COLLECTION_ID, APPWRITE_DATABASE_ID, APPWRITE_ENDPOINT,
    APPWRITE_PROJECT_ID, APPWRITE_SAVED_MOVIES_COLLECTION_ID, TMDB_API_KEY, TMDB_BASE_URL,
};

/// Where the document database lives and which collections hold our records.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: Option<Secret<String>>,
    pub database_id: String,
    /// Collection of search-count documents.
    pub search_collection_id: String,
    pub saved_movies_collection_id: String,
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub catalog: CatalogSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            store: StoreSettings {
                endpoint: required(&APPWRITE_ENDPOINT, env::APPWRITE_ENDPOINT_ENV_VAR)?,
                project_id: required(&APPWRITE_PROJECT_ID, env::APPWRITE_PROJECT_ID_ENV_VAR)?,
                api_key: APPWRITE_API_KEY.clone().map(Secret::new),
                database_id: required(&APPWRITE_DATABASE_ID, env::APPWRITE_DATABASE_ID_ENV_VAR)?,
                search_collection_id: required(
                    &APPWRITE_COLLECTION_ID,
                    env::APPWRITE_COLLECTION_ID_ENV_VAR,
                )?,
                saved_movies_collection_id: required(
                    &APPWRITE_SAVED_MOVIES_COLLECTION_ID,
                    env::APPWRITE_SAVED_MOVIES_COLLECTION_ID_ENV_VAR,
                )?,
            },
            catalog: CatalogSettings {
                base_url: TMDB_BASE_URL.clone(),
                api_key: Secret::new(required(&TMDB_API_KEY, env::TMDB_API_KEY_ENV_VAR)?),
            },
        })
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| eyre!("{} must be set.", name))
}
