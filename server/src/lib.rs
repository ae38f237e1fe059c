use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pressdex_core::persist::{load_index, IndexPaths};
use pressdex_core::search::{search, Bm25Params, SearchHit};
use pressdex_core::{DocId, IndexSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ArticleHit>,
}

/// One serialized hit. A score that came out non-finite is reported as null
/// rather than leaking NaN into the JSON payload.
#[derive(Serialize)]
pub struct ArticleHit {
    pub doc_id: DocId,
    pub score: Option<f32>,
    pub article_id: String,
    pub source_name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: String,
}

impl From<SearchHit> for ArticleHit {
    fn from(hit: SearchHit) -> Self {
        let doc = hit.document;
        Self {
            doc_id: hit.doc_id,
            score: if hit.score.is_nan() { None } else { Some(hit.score) },
            article_id: doc.article_id,
            source_name: doc.source_name,
            title: doc.title,
            description: doc.description,
            url: doc.url,
            url_to_image: doc.url_to_image,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexSnapshot>,
    pub params: Bm25Params,
}

pub fn build_app(index_dir: String) -> Result<Router> {
    // Load the full snapshot at startup; it is never mutated afterwards.
    let paths = IndexPaths::new(&index_dir);
    let index = load_index(&paths)?;
    let state = AppState { index: Arc::new(index), params: Bm25Params::default() };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query cannot be empty".into()));
    }

    let start = std::time::Instant::now();
    let hits = search(query, &state.index, &state.params);
    let took_s = start.elapsed().as_secs_f64();

    let total_hits = hits.len();
    let results = hits.into_iter().map(ArticleHit::from).collect();
    Ok(Json(SearchResponse {
        query: query.to_string(),
        took_s,
        total_hits,
        results,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match state.index.forward.get(&doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc_id,
            "article_id": doc.article_id,
            "source_name": doc.source_name,
            "title": doc.title,
            "description": doc.description,
            "full_content": doc.full_content,
            "url": doc.url,
            "url_to_image": doc.url_to_image,
        }))),
        None => Err((StatusCode::NOT_FOUND, "not found".into())),
    }
}
