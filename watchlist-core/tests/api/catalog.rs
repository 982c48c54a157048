use serde_json::json;
use test_macros::with_test_app;
use watchlist_core::domain::{CatalogError, MovieCatalog};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::helpers::TMDB_API_KEY;

fn page() -> serde_json::Value {
    json!({
        "page": 1,
        "results": [
            {
                "id": 438631,
                "title": "Dune",
                "overview": "Paul Atreides...",
                "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "vote_average": 7.8,
                "release_date": "2021-09-15"
            },
            { "id": 348, "title": "Alien", "poster_path": null }
        ],
        "total_pages": 1,
        "total_results": 2
    })
}

#[with_test_app]
async fn empty_query_discovers_popular_movies() {
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(header("authorization", format!("Bearer {}", TMDB_API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page()))
        .expect(1)
        .mount(&app.server)
        .await;

    let movies = app.catalog.fetch_movies("").await.expect("discover should succeed");
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Dune");
    assert_eq!(movies[1].poster_path, None);
}

#[with_test_app]
async fn query_searches_by_title() {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page()))
        .expect(1)
        .mount(&app.server)
        .await;

    let movies = app.catalog.fetch_movies("dune").await.expect("search should succeed");
    assert_eq!(movies[0].snapshot().id, 438631);
}

#[with_test_app]
async fn details_include_budget_and_companies() {
    Mock::given(method("GET"))
        .and(path("/movie/438631"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 438631,
            "title": "Dune",
            "overview": "Paul Atreides...",
            "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
            "vote_average": 7.8,
            "vote_count": 9000,
            "release_date": "2021-09-15",
            "runtime": 155,
            "genres": [{ "id": 878, "name": "Science Fiction" }],
            "budget": 165000000,
            "revenue": 402027830,
            "production_companies": [{ "id": 923, "name": "Legendary Pictures", "logo_path": null }]
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let details = app
        .catalog
        .fetch_movie_details(438631)
        .await
        .expect("details should succeed");
    assert_eq!(details.runtime, Some(155));
    assert_eq!(details.budget, 165_000_000);
    assert_eq!(details.production_companies[0].name, "Legendary Pictures");
}

#[with_test_app]
async fn unknown_movie_is_not_found() {
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/2"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    assert_eq!(
        app.catalog.fetch_movie_details(1).await,
        Err(CatalogError::MovieNotFound)
    );
    assert!(matches!(
        app.catalog.fetch_movie_details(2).await,
        Err(CatalogError::UnexpectedError(_))
    ));
}
