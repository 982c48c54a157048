use serde_json::{json, Map};
use test_macros::with_test_app;
use watchlist_core::{
    domain::{DocumentId, DocumentStore, DocumentStoreError, Query},
    services::AppwriteDocumentStore,
};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{
    document_list, document_path, documents_path, dune, equal_query, saved_document, HasQuery,
    PROJECT_ID, SAVED_COLLECTION_ID,
};

#[with_test_app]
async fn list_sends_project_header_and_queries() {
    Mock::given(method("GET"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .and(header("X-Appwrite-Project", PROJECT_ID))
        .and(equal_query("userId", "u1"))
        .and(HasQuery(json!({ "method": "limit", "values": [5] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_list(vec![
            saved_document("d1", "u1", &dune()),
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let documents = app
        .store
        .list_documents(
            SAVED_COLLECTION_ID,
            &[Query::equal("userId", "u1"), Query::limit(5)],
        )
        .await
        .expect("list should succeed");

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id, "d1");
    assert_eq!(documents[0].get_str("userId"), Some("u1"));
    assert!(documents[0].data.keys().all(|key| !key.starts_with('$')));
}

#[with_test_app]
async fn create_asks_server_for_unique_id() {
    let mut data = Map::new();
    data.insert("userId".to_owned(), json!("u1"));

    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .and(body_json(json!({ "documentId": "unique()", "data": { "userId": "u1" } })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "$id": "d7", "userId": "u1" })),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let document = app
        .store
        .create_document(SAVED_COLLECTION_ID, DocumentId::Unique, data)
        .await
        .expect("create should succeed");
    assert_eq!(document.id, "d7");
}

#[with_test_app]
async fn create_with_taken_id_reports_conflict() {
    Mock::given(method("POST"))
        .and(path(documents_path(SAVED_COLLECTION_ID)))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Document with the requested ID already exists.",
            "code": 409,
            "type": "document_already_exists"
        })))
        .mount(&app.server)
        .await;

    let result = app
        .store
        .create_document(
            SAVED_COLLECTION_ID,
            DocumentId::Custom("taken".to_owned()),
            Map::new(),
        )
        .await;
    assert_eq!(result, Err(DocumentStoreError::DocumentAlreadyExists));
}

#[with_test_app]
async fn update_patches_only_given_attributes() {
    let mut data = Map::new();
    data.insert("count".to_owned(), json!(2));

    Mock::given(method("PATCH"))
        .and(path(document_path("searches", "s1")))
        .and(body_json(json!({ "data": { "count": 2 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "s1",
            "searchTerm": "dune",
            "count": 2
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let document = app
        .store
        .update_document("searches", "s1", data)
        .await
        .expect("update should succeed");
    assert_eq!(document.get_i64("count"), Some(2));
}

#[with_test_app]
async fn delete_maps_status_codes() {
    Mock::given(method("DELETE"))
        .and(path(document_path(SAVED_COLLECTION_ID, "d1")))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(document_path(SAVED_COLLECTION_ID, "d1")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(document_path(SAVED_COLLECTION_ID, "d2")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&app.server)
        .await;

    assert_eq!(app.store.delete_document(SAVED_COLLECTION_ID, "d1").await, Ok(()));
    assert_eq!(
        app.store.delete_document(SAVED_COLLECTION_ID, "d1").await,
        Err(DocumentStoreError::DocumentNotFound)
    );
    assert!(matches!(
        app.store.delete_document(SAVED_COLLECTION_ID, "d2").await,
        Err(DocumentStoreError::UnexpectedError(_))
    ));
}

#[tokio::test]
async fn unreachable_store_is_unavailable() {
    let app = crate::helpers::TestApp::new().await;
    let mut settings = app.settings.store.clone();
    // Nothing listens on the discard port.
    settings.endpoint = "http://127.0.0.1:9".to_owned();
    let store = AppwriteDocumentStore::new(reqwest::Client::new(), &settings);

    assert!(matches!(
        store.list_documents(SAVED_COLLECTION_ID, &[]).await,
        Err(DocumentStoreError::Unavailable(_))
    ));
}
