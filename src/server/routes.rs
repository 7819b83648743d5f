use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::server::AppState;
use crate::storage::DictionaryStats;
use crate::{Entry, Error, Language, QueryService};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub language: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomResponse {
    pub entry: Option<Entry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(err: Error) -> ApiError {
    let status = match err {
        Error::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Request failed: {}", err);
    (status, Json(ErrorResponse { error: err.to_string() }))
}

/// Run a storage call on the blocking pool
async fn with_service<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&QueryService) -> crate::Result<T> + Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: format!("Query task failed: {}", e) }),
            )
        })?
        .map(Json)
        .map_err(api_error)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn languages() -> Json<Vec<&'static str>> {
    Json(Language::all().iter().map(Language::as_str).collect())
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResponse> {
    with_service(&state, move |service| {
        service
            .search(&params.language, &params.query)
            .map(|results| SearchResponse { results })
    })
    .await
}

pub async fn random(State(state): State<Arc<AppState>>) -> ApiResult<RandomResponse> {
    with_service(&state, |service| {
        service.random_entry().map(|entry| RandomResponse { entry })
    })
    .await
}

pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<DictionaryStats> {
    with_service(&state, |service| service.stats()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SourceRow;
    use crate::storage::DictionaryStore;

    fn state(dir: &tempfile::TempDir, ready: bool) -> Arc<AppState> {
        let store = DictionaryStore::open(&dir.path().join("bizu.db")).unwrap();
        let service = QueryService::new(
            store,
            vec![
                SourceRow::new(Some("ሰላም"), None, None, Some("hello")),
                SourceRow::new(Some("ውሃ"), None, None, Some("water")),
            ],
        );
        if ready {
            service.ensure_ready().unwrap();
        }
        Arc::new(AppState { service: Arc::new(service) })
    }

    fn params(language: &str, query: &str) -> Query<SearchParams> {
        Query(SearchParams {
            language: language.to_string(),
            query: query.to_string(),
        })
    }

    #[tokio::test]
    async fn test_search_route() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir, true);

        let Json(response) = search(State(state.clone()), params("English", "WAT")).await.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].amharic.as_deref(), Some("ውሃ"));

        let Json(response) = search(State(state.clone()), params("Klingon", "wat")).await.unwrap();
        assert!(response.results.is_empty());

        let Json(response) = search(State(state), params("english", "wat")).await.unwrap();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_random_route() {
        let dir = tempfile::tempdir().unwrap();
        let Json(response) = random(State(state(&dir, true))).await.unwrap();
        assert!(response.entry.is_some());
    }

    #[tokio::test]
    async fn test_not_ready_is_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir, false);

        let (status, Json(body)) = search(State(state.clone()), params("English", "hello"))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.error.contains("not ready"));

        let (status, _) = stats(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_languages_route() {
        let Json(names) = languages().await;
        assert_eq!(names, vec!["Amharic", "OromLatin", "OromSaba", "English"]);
    }
}
