use crate::error::VisibilityError;
use crate::github::GitHubClient;
use crate::history::{record_scan, HistoryStore, ScanRecord};
use crate::pipeline::{apply_llm, BenchmarkMode, Evaluator, Mode, ScanOptions};
use crate::presets::{list_presets as preset_ids, load_preset, preset_from_value};
use crate::serve::AppState;
use crate::types::config::{AppConfig, DEFAULT_PRESET};
use crate::types::preset::Preset;
use crate::types::report::RepoEvaluation;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub const HISTORY_LIMIT_CAP: usize = 100;
const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<VisibilityError> for ApiError {
    fn from(err: VisibilityError) -> Self {
        let status = match err {
            VisibilityError::PresetNotFound { .. }
            | VisibilityError::InvalidPreset { .. }
            | VisibilityError::MissingToken => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

fn default_preset_id() -> String {
    DEFAULT_PRESET.to_string()
}

#[derive(Deserialize)]
pub struct ScanRequest {
    pub username: String,
    pub token: String,
    #[serde(default = "default_preset_id")]
    pub preset: String,
    #[serde(default)]
    pub preset_payload: Option<serde_json::Value>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub benchmark: BenchmarkMode,
    #[serde(default)]
    pub use_llm: bool,
    #[serde(default)]
    pub llm_api_key: Option<String>,
    #[serde(default)]
    pub community: bool,
}

impl fmt::Debug for ScanRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanRequest")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("preset", &self.preset)
            .field("repo", &self.repo)
            .field("mode", &self.mode)
            .field("benchmark", &self.benchmark)
            .field("use_llm", &self.use_llm)
            .field("community", &self.community)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub username: String,
    pub limit: Option<usize>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn scan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<Vec<RepoEvaluation>>, ApiError> {
    info!(username = %request.username, preset = %request.preset, "scan requested");
    let evaluations = tokio::task::spawn_blocking(move || run_scan(&state.config, request))
        .await
        .map_err(|err| ApiError::internal(err.to_string()))??;
    Ok(Json(evaluations))
}

/// The blocking part of `/scan`. The token lives only inside this call.
pub fn run_scan(config: &AppConfig, request: ScanRequest) -> Result<Vec<RepoEvaluation>, ApiError> {
    let preset = resolve_preset(config, &request)?;
    if request.token.trim().is_empty() {
        return Err(VisibilityError::MissingToken.into());
    }

    let client = GitHubClient::new(request.token, &config.github.api_root);
    let options = ScanOptions {
        mode: request.mode,
        benchmark: request.benchmark,
        repo_filter: request.repo,
        community: request.community || config.github.community_profile,
    };
    let mut evaluations =
        Evaluator::new(&client, &preset, options).evaluate_account(&request.username)?;

    let _ = record_scan(&config.history, &request.username, &preset.id, &evaluations);

    if request.use_llm && request.mode == Mode::Suggest {
        let _ = apply_llm(
            &mut evaluations,
            &config.llm,
            request.llm_api_key.as_deref(),
            &preset,
        );
    }
    Ok(evaluations)
}

fn resolve_preset(config: &AppConfig, request: &ScanRequest) -> Result<Preset, VisibilityError> {
    match &request.preset_payload {
        Some(payload) if payload.is_object() => preset_from_value(&request.preset, payload.clone()),
        _ => load_preset(&config.presets.dir, &request.preset),
    }
}

pub async fn list_presets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(preset_ids(&state.config.presets.dir)?))
}

pub async fn get_preset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match load_preset(&state.config.presets.dir, &id) {
        Ok(preset) => Ok(Json(
            serde_json::to_value(&preset).map_err(|err| ApiError::internal(err.to_string()))?,
        )),
        Err(VisibilityError::PresetNotFound { .. }) => {
            Err(ApiError::not_found(format!("preset not found: {id}")))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<ScanRecord>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(HISTORY_LIMIT_CAP);
    let records = tokio::task::spawn_blocking(move || -> crate::error::Result<Vec<ScanRecord>> {
        let Some(path) = state.config.history.resolved_path() else {
            warn!("history requested but no history path is available");
            return Ok(Vec::new());
        };
        HistoryStore::open(&path)?.recent(&params.username, limit)
    })
    .await
    .map_err(|err| ApiError::internal(err.to_string()))??;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serve::router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state(history_dir: &TempDir) -> Arc<AppState> {
        let mut config = AppConfig::default();
        config.presets.dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("presets");
        config.history.path = Some(history_dir.path().join("scans.db"));
        Arc::new(AppState { config })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    fn scan_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/scan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    #[tokio::test]
    async fn health_is_ok() {
        let dir = TempDir::new().expect("temp dir");
        let response = router(state(&dir))
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn presets_are_listed_sorted() {
        let dir = TempDir::new().expect("temp dir");
        let response = router(state(&dir))
            .oneshot(Request::get("/presets").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(
            value,
            serde_json::json!(["indie-hacker", "open-source-maintainer"])
        );
    }

    #[tokio::test]
    async fn single_preset_or_404() {
        let dir = TempDir::new().expect("temp dir");
        let app = router(state(&dir));
        let response = app
            .clone()
            .oneshot(
                Request::get("/presets/indie-hacker")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["id"], "indie-hacker");
        assert!(value["weights"]["readmeStructure"].as_f64().unwrap_or(0.0) >= 1.0);

        let response = app
            .oneshot(Request::get("/presets/missing").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "preset not found: missing");
    }

    #[tokio::test]
    async fn scan_with_unknown_preset_is_bad_request() {
        let dir = TempDir::new().expect("temp dir");
        let response = router(state(&dir))
            .oneshot(scan_request(serde_json::json!({
                "username": "octo",
                "token": "ghp_never_logged",
                "preset": "no-such-preset"
            })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let detail = body_json(response).await["detail"].to_string();
        assert!(detail.contains("preset not found: no-such-preset"));
        assert!(!detail.contains("ghp_never_logged"));
    }

    #[tokio::test]
    async fn scan_with_blank_token_is_bad_request() {
        let dir = TempDir::new().expect("temp dir");
        let response = router(state(&dir))
            .oneshot(scan_request(serde_json::json!({
                "username": "octo",
                "token": "  "
            })))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_reads_recorded_scans_with_capped_limit() {
        let dir = TempDir::new().expect("temp dir");
        let state = state(&dir);
        let path = state
            .config
            .history
            .path
            .clone()
            .expect("history path is set");
        {
            let store = HistoryStore::open(&path).expect("store");
            for _ in 0..3 {
                store.record("octo", "indie-hacker", &[]).expect("record");
            }
        }

        let response = router(state)
            .oneshot(
                Request::get("/history?username=octo&limit=500")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        let records = value.as_array().expect("array");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["scan_id"], 3);
        assert_eq!(records[0]["preset_id"], "indie-hacker");
    }

    #[test]
    fn request_debug_redacts_token() {
        let request: ScanRequest = serde_json::from_value(serde_json::json!({
            "username": "octo",
            "token": "ghp_secret"
        }))
        .expect("request should parse");
        assert_eq!(request.preset, "indie-hacker");
        assert_eq!(request.mode, Mode::Suggest);
        assert_eq!(request.benchmark, BenchmarkMode::None);
        assert!(!request.use_llm);
        assert!(!format!("{request:?}").contains("ghp_secret"));
    }

    #[test]
    fn api_error_status_mapping() {
        let not_found: ApiError = VisibilityError::PresetNotFound {
            id: "x".to_string(),
            path: "presets/x.json".to_string(),
        }
        .into();
        assert_eq!(not_found.status, StatusCode::BAD_REQUEST);
        let upstream: ApiError = VisibilityError::Api {
            status: 502,
            url: "https://api.github.com/users/octo/repos".to_string(),
        }
        .into();
        assert_eq!(upstream.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
