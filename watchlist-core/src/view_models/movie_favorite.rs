use tokio::sync::RwLock;

use super::Notice;
use crate::{
    app_state::{AppState, SavedMovieStoreType},
    domain::{MovieSnapshot, UserIdentity},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteState {
    /// Not checked against the store yet.
    Unknown,
    NotSaved,
    Saved { record_id: String },
}

impl FavoriteState {
    pub fn is_saved(&self) -> bool {
        matches!(self, FavoriteState::Saved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved(Notice),
    Removed(Notice),
    /// The remote call failed and the state did not change.
    Failed(Notice),
    /// Nothing was sent: another toggle is in flight, there is no user, or the state
    /// is still unknown.
    Ignored,
}

#[derive(Debug)]
struct Inner {
    state: FavoriteState,
    is_saving: bool,
    // Bumped when a toggle starts and when it resolves.
    generation: u64,
}

/// Saved/not-saved state of the movie on a detail screen.
pub struct MovieFavorite {
    saved_movies: SavedMovieStoreType,
    identity: Option<UserIdentity>,
    movie_id: i64,
    inner: RwLock<Inner>,
}

impl MovieFavorite {
    pub fn new(app_state: &AppState, movie_id: i64) -> Self {
        Self {
            saved_movies: app_state.saved_movies.clone(),
            identity: app_state.identity.clone(),
            movie_id,
            inner: RwLock::new(Inner {
                state: FavoriteState::Unknown,
                is_saving: false,
                generation: 0,
            }),
        }
    }

    pub async fn state(&self) -> FavoriteState {
        self.inner.read().await.state.clone()
    }

    /// While true the toggle control is disabled.
    pub async fn is_saving(&self) -> bool {
        self.inner.read().await.is_saving
    }

    /// Re-read the saved status, run when the screen mounts or regains focus.
    #[tracing::instrument(name = "Refresh favorite", skip(self), fields(movie_id = self.movie_id))]
    pub async fn refresh(&self) {
        let Some(identity) = &self.identity else {
            return;
        };

        let generation = self.inner.read().await.generation;
        let status = self
            .saved_movies
            .check_if_saved(&identity.user_id, self.movie_id)
            .await;

        let mut inner = self.inner.write().await;
        // A toggle that overlapped this read owns the state.
        if inner.is_saving || inner.generation != generation {
            tracing::debug!("Dropping stale saved status");
            return;
        }
        inner.state = match status.saved_record_id {
            Some(record_id) if status.is_saved => FavoriteState::Saved { record_id },
            _ => FavoriteState::NotSaved,
        };
    }

    #[tracing::instrument(name = "Toggle favorite", skip_all, fields(movie_id = self.movie_id))]
    pub async fn toggle(&self, movie: &MovieSnapshot) -> ToggleOutcome {
        let Some(identity) = &self.identity else {
            return ToggleOutcome::Ignored;
        };

        let current = {
            let mut inner = self.inner.write().await;
            if inner.is_saving || inner.state == FavoriteState::Unknown {
                tracing::debug!("Ignoring toggle");
                return ToggleOutcome::Ignored;
            }
            inner.is_saving = true;
            inner.generation += 1;
            inner.state.clone()
        };

        let (next, outcome) = match current {
            FavoriteState::Saved { record_id } => {
                if self.saved_movies.remove_saved_movie(&record_id).await {
                    (
                        FavoriteState::NotSaved,
                        ToggleOutcome::Removed(Notice::new(
                            "Removed",
                            format!("{} has been removed from your list.", movie.title),
                        )),
                    )
                } else {
                    (
                        FavoriteState::Saved { record_id },
                        ToggleOutcome::Failed(Notice::try_again()),
                    )
                }
            }
            _ => match self
                .saved_movies
                .save_movie(&identity.user_id, self.movie_id, movie)
                .await
            {
                Some(record_id) => (
                    FavoriteState::Saved { record_id },
                    ToggleOutcome::Saved(Notice::new(
                        "Saved",
                        format!("{} has been added to your list!", movie.title),
                    )),
                ),
                None => (
                    FavoriteState::NotSaved,
                    ToggleOutcome::Failed(Notice::try_again()),
                ),
            },
        };

        let mut inner = self.inner.write().await;
        inner.state = next;
        inner.is_saving = false;
        inner.generation += 1;
        outcome
    }
}
