//! HTTP API
//!
//! `GET /` answers a health message; `POST /analyze` takes
//! `{"repoUrl": "https://github.com/<owner>/<repo>"}` and returns the
//! analysis. Every failure is reported as `{"error": "<message>"}`.

use repolens_core::error::{RepolensError, RepolensResult, UnifiedError};
use repolens_core::{AnalysisOrchestrator, RepoId};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "repoUrl", default)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub message: String,
}

/// Shared per-server state
pub struct ApiState {
    orchestrator: AnalysisOrchestrator,
    web_base: String,
}

impl ApiState {
    /// `web_base` is the prefix every accepted repository URL must carry.
    pub fn new(orchestrator: AnalysisOrchestrator, web_base: impl Into<String>) -> Self {
        Self {
            orchestrator,
            web_base: web_base.into(),
        }
    }

    async fn analyze(&self, request: AnalyzeRequest) -> RepolensResult<repolens_core::AnalysisResult> {
        let url = request.repo_url.unwrap_or_default();
        let repo = RepoId::parse_with_base(&url, &self.web_base)?;
        info!("Analyzing {}", repo);
        self.orchestrator.analyze(&repo).await
    }
}

/// The complete API filter, CORS and request logging included.
pub fn routes(state: Arc<ApiState>) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&HealthBody {
            message: "Repolens API is running".to_string(),
        })
    });

    let analyze = warp::path("analyze")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(warp::any().map(move || state.clone()))
        .and_then(handle_analyze);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    // Errors are rendered inside the CORS layer so browsers can read them;
    // the outer recover only sees the layer's own preflight rejections.
    health
        .or(analyze)
        .recover(handle_rejection)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::log("repolens::http"))
}

async fn handle_analyze(request: AnalyzeRequest, state: Arc<ApiState>) -> Result<Response, Infallible> {
    Ok(match state.analyze(request).await {
        Ok(result) => warp::reply::json(&result).into_response(),
        Err(e) => error_response(&e),
    })
}

/// Message sent to clients for an analysis failure.
pub fn client_message(error: &RepolensError) -> String {
    match error {
        RepolensError::TooLarge { .. } => error.to_string(),
        RepolensError::UpstreamFailure { .. } | RepolensError::Unexpected { .. } => {
            format!("Failed to analyze repository: {}", error.message())
        }
        _ => error.message().to_string(),
    }
}

fn error_response(error: &RepolensError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("{} ({})", error, error.error_code());
    } else {
        info!("Rejected request: {} ({})", error, error.error_code());
    }
    json_error(client_message(error), status)
}

fn json_error(message: impl Into<String>, status: StatusCode) -> Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.into(),
        }),
        status,
    )
    .into_response()
}

async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let response = if rejection.is_not_found() {
        json_error("Not found", StatusCode::NOT_FOUND)
    } else if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        json_error(format!("Invalid request body: {}", e), StatusCode::BAD_REQUEST)
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        json_error("Request body too large", StatusCode::PAYLOAD_TOO_LARGE)
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        json_error("Expected a JSON body", StatusCode::UNSUPPORTED_MEDIA_TYPE)
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        json_error("Content-Length required", StatusCode::LENGTH_REQUIRED)
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        json_error("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else if let Some(e) = rejection.find::<warp::cors::CorsForbidden>() {
        json_error(e.to_string(), StatusCode::FORBIDDEN)
    } else {
        error!("Unhandled rejection: {:?}", rejection);
        json_error("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
    };
    Ok(response)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn start_http_server(state: Arc<ApiState>, addr: SocketAddr) -> RepolensResult<()> {
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
        })
        .map_err(|e| RepolensError::config(format!("Failed to bind {}: {}", addr, e)))?;

    info!("HTTP server listening on http://{}", bound);
    server.await;
    Ok(())
}
