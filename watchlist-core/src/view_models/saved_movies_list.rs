use tokio::sync::RwLock;

use super::Notice;
use crate::{
    app_state::{AppState, SavedMovieStoreType},
    domain::{SavedMovie, UserIdentity},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Notice),
    /// The delete failed; the record is back in the list.
    Failed(Notice),
    /// No record with that id is listed.
    NotListed,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<SavedMovie>,
    is_loading: bool,
}

/// The signed-in user's saved movies, as shown on the saved tab.
pub struct SavedMoviesList {
    saved_movies: SavedMovieStoreType,
    identity: Option<UserIdentity>,
    inner: RwLock<Inner>,
}

impl SavedMoviesList {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            saved_movies: app_state.saved_movies.clone(),
            identity: app_state.identity.clone(),
            inner: RwLock::new(Inner {
                records: Vec::new(),
                is_loading: true,
            }),
        }
    }

    pub async fn records(&self) -> Vec<SavedMovie> {
        self.inner.read().await.records.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.is_loading
    }

    /// Replace the whole list with what the store holds, run on every focus.
    #[tracing::instrument(name = "Refresh saved movies", skip(self))]
    pub async fn refresh(&self) {
        let Some(identity) = &self.identity else {
            self.inner.write().await.is_loading = false;
            return;
        };

        self.inner.write().await.is_loading = true;
        let records = self.saved_movies.fetch_saved_movies(&identity.user_id).await;

        let mut inner = self.inner.write().await;
        inner.records = records;
        inner.is_loading = false;
    }

    /// Confirmation text shown before removing a record.
    pub fn removal_prompt(record: &SavedMovie) -> Notice {
        Notice::new(
            "Remove Movie",
            format!(
                "Are you sure you want to remove \"{}\" from your list?",
                title_of(record)
            ),
        )
    }

    /// Drop the record from the list right away, then delete it remotely. A failed delete
    /// puts the record back where it was.
    #[tracing::instrument(name = "Remove from saved list", skip(self))]
    pub async fn remove(&self, record_id: &str) -> RemoveOutcome {
        let (position, removed) = {
            let mut inner = self.inner.write().await;
            let Some(position) = inner.records.iter().position(|r| r.record_id == record_id)
            else {
                return RemoveOutcome::NotListed;
            };
            (position, inner.records.remove(position))
        };
        let title = title_of(&removed).to_string();

        if self.saved_movies.remove_saved_movie(record_id).await {
            return RemoveOutcome::Removed(Notice::new(
                "Removed",
                format!("{} has been removed from your list.", title),
            ));
        }

        let mut inner = self.inner.write().await;
        // A refresh may have landed in the meantime and already brought it back.
        if !inner.records.iter().any(|r| r.record_id == record_id) {
            let position = position.min(inner.records.len());
            inner.records.insert(position, removed);
        }
        RemoveOutcome::Failed(Notice::new(
            "Error",
            format!("Failed to remove {}. Please try again.", title),
        ))
    }
}

fn title_of(record: &SavedMovie) -> &str {
    record
        .snapshot
        .as_ref()
        .map_or("this movie", |snapshot| snapshot.title.as_str())
}
