pub mod movie_favorite;
pub mod saved_movies_list;

pub use movie_favorite::{FavoriteState, MovieFavorite, ToggleOutcome};
pub use saved_movies_list::{RemoveOutcome, SavedMoviesList};

/// A short message for the user, shown as an alert by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn try_again() -> Self {
        Notice::new("Error", "Failed to update your list. Please try again.")
    }
}
