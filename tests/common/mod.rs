#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records what the client asked for, so tests can assert on request counts and keys.
#[derive(Clone, Default)]
pub struct StubBackend {
    pub searches: Arc<Mutex<Vec<String>>>,
    pub details: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn details(&self) -> Vec<String> {
        self.details.lock().unwrap().clone()
    }
}

async fn search_books(
    State(backend): State<StubBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let query = params.get("query").cloned().unwrap_or_default();
    backend.searches.lock().unwrap().push(query.clone());

    let body = match query.as_str() {
        "dune" => json!({
            "books": [
                {
                    "workId": "/works/OL1W",
                    "title": "Dune",
                    "author": "Frank Herbert",
                    "cover": "https://covers.openlibrary.org/b/id/1-M.jpg",
                    "year": 1965
                },
                {
                    "workId": "/works/OL2W",
                    "title": "Dune Messiah",
                    "author": "Frank Herbert",
                    "year": 1969
                }
            ]
        }),
        "war & peace" => json!({
            "books": [{ "workId": "/works/OL3W", "title": "War and Peace", "author": ["Leo Tolstoy"] }]
        }),
        "raw" => json!([{ "key": "/works/OL1W", "title": "Dune", "author_name": ["Frank Herbert"] }]),
        _ => json!({ "books": [] }),
    };

    Json(body)
}

async fn book_details(
    State(backend): State<StubBackend>,
    Path(key): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    backend.details.lock().unwrap().push(key.clone());

    match key.as_str() {
        "OL1W" => Ok(Json(json!({
            "title": "Dune",
            "description": { "type": "/type/text", "value": "Set on the desert planet Arrakis." },
            "covers": [11481354],
            "subjects": ["Science fiction", "Arrakis", "Desert"],
            "created": { "type": "/type/datetime", "value": "2009-10-15T11:34:21.437031" }
        }))),
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Serves the stub on an ephemeral local port and returns its base URL.
pub async fn spawn_backend() -> (String, StubBackend) {
    let backend = StubBackend::default();

    let app = Router::new()
        .route("/api/search", get(search_books))
        .route("/api/book/:key", get(book_details))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

/// A base URL nothing is listening on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
