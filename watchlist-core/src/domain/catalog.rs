use color_eyre::eyre::Report;
use thiserror::Error;

use super::{Movie, MovieDetails};

// Read-only movie metadata source.
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// An empty query lists popular movies, anything else searches by title.
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;
    async fn fetch_movie_details(&self, movie_id: i64) -> Result<MovieDetails, CatalogError>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie not found")]
    MovieNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for CatalogError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MovieNotFound, Self::MovieNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
