use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{
    domain::{CatalogError, Movie, MovieCatalog, MovieDetails},
    utils::CatalogSettings,
};

/// Movie catalog backed by The Movie Database v3 API.
pub struct TmdbClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl TmdbClient {
    pub fn new(http_client: Client, settings: &CatalogSettings) -> Self {
        Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(self.api_key.expose_secret())
            .header("accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::UnexpectedError(e.into()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::MovieNotFound);
        }

        response
            .error_for_status()
            .map_err(|e| CatalogError::UnexpectedError(e.into()))?
            .json::<T>()
            .await
            .map_err(|e| CatalogError::UnexpectedError(e.into()))
    }
}

#[derive(Deserialize)]
struct MoviePage {
    results: Vec<Movie>,
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    #[tracing::instrument(name = "Fetch movies", skip(self))]
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let page: MoviePage = if query.is_empty() {
            self.get("/discover/movie", &[("sort_by", "popularity.desc")])
                .await?
        } else {
            self.get("/search/movie", &[("query", query)]).await?
        };
        Ok(page.results)
    }

    #[tracing::instrument(name = "Fetch movie details", skip(self))]
    async fn fetch_movie_details(&self, movie_id: i64) -> Result<MovieDetails, CatalogError> {
        self.get(&format!("/movie/{}", movie_id), &[]).await
    }
}
