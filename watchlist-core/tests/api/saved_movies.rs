use std::time::Duration;

use serde_json::json;
use test_macros::with_test_app;
use watchlist_core::{
    services::{saved_movie_store::keyed_record_id, SaveMode},
    view_models::{
        FavoriteState, MovieFavorite, Notice, RemoveOutcome, SavedMoviesList, ToggleOutcome,
    },
};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{
    document_list, document_path, documents_path, dune, equal_query, saved_document,
    SAVED_COLLECTION_ID,
};

#[with_test_app]
async fn save_then_check_returns_new_record() {
    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(saved_document("d1", "u1", &dune())),
        )
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .and(equal_query("userId", "u1"))
        .and(equal_query("movieId", "42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(document_list(vec![saved_document("d1", "u1", &dune())])),
        )
        .mount(&app.server)
        .await;

    let saved_movies = &app.app_state.saved_movies;
    let record_id = saved_movies.save_movie("u1", 42, &dune()).await;
    assert_eq!(record_id.as_deref(), Some("d1"));

    let status = saved_movies.check_if_saved("u1", 42).await;
    assert!(status.is_saved);
    assert_eq!(status.saved_record_id.as_deref(), Some("d1"));
    assert_eq!(status.snapshot, Some(dune()));
}

#[with_test_app(SaveMode::KeyedByMovie)]
async fn keyed_save_conflict_resolves_to_existing_record() {
    let record_id = keyed_record_id("u1", 42);
    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .and(body_partial_json(json!({ "documentId": &record_id })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Document with the requested ID already exists.",
            "code": 409,
            "type": "document_already_exists",
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let saved = app.app_state.saved_movies.save_movie("u1", 42, &dune()).await;
    assert_eq!(saved, Some(record_id));
}

#[with_test_app]
async fn check_failure_reads_as_not_saved() {
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    let status = app.app_state.saved_movies.check_if_saved("u1", 42).await;
    assert!(!status.is_saved);
    assert_eq!(status.saved_record_id, None);
    assert!(app
        .app_state
        .saved_movies
        .fetch_saved_movies("u1")
        .await
        .is_empty());
}

#[with_test_app]
async fn second_toggle_while_saving_is_ignored() {
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_list(vec![])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(saved_document("d1", "u1", &dune()))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let favorite = MovieFavorite::new(&app.app_state, 42);
    favorite.refresh().await;
    assert_eq!(favorite.state().await, FavoriteState::NotSaved);

    let movie = dune();
    let (first, second) = tokio::join!(favorite.toggle(&movie), favorite.toggle(&movie));

    assert_eq!(
        first,
        ToggleOutcome::Saved(Notice::new("Saved", "Dune has been added to your list!"))
    );
    assert_eq!(second, ToggleOutcome::Ignored);
    assert_eq!(
        favorite.state().await,
        FavoriteState::Saved {
            record_id: "d1".to_owned()
        }
    );
}

#[with_test_app]
async fn slow_refresh_does_not_undo_a_finished_toggle() {
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_list(vec![])))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(document_list(vec![]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(saved_document("d1", "u1", &dune())),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let favorite = MovieFavorite::new(&app.app_state, 42);
    favorite.refresh().await;
    assert_eq!(favorite.state().await, FavoriteState::NotSaved);

    let movie = dune();
    let (_, outcome) = tokio::join!(favorite.refresh(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        favorite.toggle(&movie).await
    });

    assert!(matches!(outcome, ToggleOutcome::Saved(_)));
    assert_eq!(
        favorite.state().await,
        FavoriteState::Saved {
            record_id: "d1".to_owned()
        }
    );
}

#[with_test_app]
async fn failed_list_removal_is_rolled_back() {
    let other = watchlist_core::domain::MovieSnapshot {
        id: 7,
        title: "Alien".to_owned(),
        ..dune()
    };
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .and(equal_query("userId", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_list(vec![
            saved_document("d1", "u1", &dune()),
            saved_document("d2", "u1", &other),
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(document_path(SAVED_COLLECTION_ID, "d1")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "code": 500 })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(document_path(SAVED_COLLECTION_ID, "d2")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let list = SavedMoviesList::new(&app.app_state);
    list.refresh().await;
    assert_eq!(list.records().await.len(), 2);

    assert_eq!(
        list.remove("d1").await,
        RemoveOutcome::Failed(Notice::new("Error", "Failed to remove Dune. Please try again."))
    );
    let ids: Vec<String> = list.records().await.into_iter().map(|r| r.record_id).collect();
    assert_eq!(ids, vec!["d1", "d2"]);

    assert!(matches!(list.remove("d2").await, RemoveOutcome::Removed(_)));
    let ids: Vec<String> = list.records().await.into_iter().map(|r| r.record_id).collect();
    assert_eq!(ids, vec!["d1"]);
}
