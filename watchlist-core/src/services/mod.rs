pub mod data_stores;
pub mod saved_movie_store;
pub mod search_metrics;
pub mod tmdb_client;

pub use data_stores::*;
pub use saved_movie_store::{SaveMode, SavedMovieStore};
pub use search_metrics::SearchMetrics;
pub use tmdb_client::TmdbClient;
