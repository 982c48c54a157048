use dotenvy::dotenv;
use lazy_static::lazy_static;
use std::env as std_env;

lazy_static! {
    pub static ref APPWRITE_ENDPOINT: Option<String> = load(env::APPWRITE_ENDPOINT_ENV_VAR);
    pub static ref APPWRITE_PROJECT_ID: Option<String> = load(env::APPWRITE_PROJECT_ID_ENV_VAR);
    pub static ref APPWRITE_API_KEY: Option<String> = load(env::APPWRITE_API_KEY_ENV_VAR);
    pub static ref APPWRITE_DATABASE_ID: Option<String> = load(env::APPWRITE_DATABASE_ID_ENV_VAR);
    pub static ref APPWRITE_COLLECTION_ID: Option<String> =
        load(env::APPWRITE_COLLECTION_ID_ENV_VAR);
    pub static ref APPWRITE_SAVED_MOVIES_COLLECTION_ID: Option<String> =
        load(env::APPWRITE_SAVED_MOVIES_COLLECTION_ID_ENV_VAR);
    pub static ref TMDB_API_KEY: Option<String> = load(env::TMDB_API_KEY_ENV_VAR);
    pub static ref TMDB_BASE_URL: String =
        load(env::TMDB_BASE_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_owned());
}

fn load(name: &str) -> Option<String> {
    // A missing .env file is fine, the variables may come from the process environment.
    dotenv().ok();
    std_env::var(name).ok().filter(|value| !value.is_empty())
}

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

pub mod env {
    pub const APPWRITE_ENDPOINT_ENV_VAR: &str = "APPWRITE_ENDPOINT";
    pub const APPWRITE_PROJECT_ID_ENV_VAR: &str = "APPWRITE_PROJECT_ID";
    pub const APPWRITE_API_KEY_ENV_VAR: &str = "APPWRITE_API_KEY";
    pub const APPWRITE_DATABASE_ID_ENV_VAR: &str = "APPWRITE_DATABASE_ID";
    pub const APPWRITE_COLLECTION_ID_ENV_VAR: &str = "APPWRITE_COLLECTION_ID";
    pub const APPWRITE_SAVED_MOVIES_COLLECTION_ID_ENV_VAR: &str =
        "APPWRITE_SAVED_MOVIES_COLLECTION_ID";
    pub const TMDB_API_KEY_ENV_VAR: &str = "TMDB_API_KEY";
    pub const TMDB_BASE_URL_ENV_VAR: &str = "TMDB_BASE_URL";
}
