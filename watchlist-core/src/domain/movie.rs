use serde::{Deserialize, Serialize};

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Display fields of a movie, captured when it is saved and never re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSnapshot {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
}

impl MovieSnapshot {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(poster_url)
    }
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{}{}", POSTER_BASE_URL, poster_path)
}

/// One entry of a catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
}

impl Movie {
    pub fn snapshot(&self) -> MovieSnapshot {
        MovieSnapshot {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.vote_average,
            release_date: self.release_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub release_date: String,
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

impl MovieDetails {
    pub fn snapshot(&self) -> MovieSnapshot {
        MovieSnapshot {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.vote_average,
            release_date: self.release_date.clone(),
        }
    }
}

/// A user's saved movie as stored in the saved-movies collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedMovie {
    pub record_id: String,
    pub user_id: String,
    pub movie_id: i64,
    /// `None` when the stored snapshot could not be read back.
    pub snapshot: Option<MovieSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedStatus {
    pub is_saved: bool,
    pub saved_record_id: Option<String>,
    pub snapshot: Option<MovieSnapshot>,
}

impl SavedStatus {
    pub fn not_saved() -> Self {
        Self::default()
    }
}

impl From<SavedMovie> for SavedStatus {
    fn from(saved: SavedMovie) -> Self {
        Self {
            is_saved: true,
            saved_record_id: Some(saved.record_id),
            snapshot: saved.snapshot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendingMovie {
    pub record_id: String,
    pub search_term: String,
    pub movie_id: i64,
    pub title: String,
    pub count: i64,
    pub poster_url: String,
}
