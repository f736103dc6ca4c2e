//! End-to-end tests of the HTTP API with in-memory collaborators

use async_trait::async_trait;
use repolens_cli::{ApiState, routes};
use repolens_core::analysis::{CommitSummary, RepoMetadata, RepoProvider};
use repolens_core::cache::{CacheConfig, RepoCache};
use repolens_core::config::AnalysisConfig;
use repolens_core::error::{RepolensError, RepolensResult};
use repolens_core::ingest::{Ingestion, Ingestor};
use repolens_core::tree::TreeNode;
use repolens_core::{AnalysisOrchestrator, RepoId};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use warp::http::StatusCode;

/// Ingestor that reports a fixed token estimate for every repository
struct StubIngestor {
    estimate: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl Ingestor for StubIngestor {
    async fn ingest(&self, repo: &RepoId, _exclude: &[String]) -> RepolensResult<Ingestion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Ingestion {
            summary: format!(
                "Repository: {}\nFiles analyzed: 2\n\nEstimated tokens: {}",
                repo, self.estimate
            ),
            tree: json!("src/\n  main.rs\nREADME.md\n"),
            content: json!([]),
        })
    }
}

/// Provider that knows a single repository, `octo/demo`
struct StubProvider;

#[async_trait]
impl RepoProvider for StubProvider {
    async fn exists(&self, repo: &RepoId) -> bool {
        repo.owner() == "octo" && repo.repo() == "demo"
    }

    async fn fetch_tree(&self, _repo: &RepoId) -> RepolensResult<Vec<TreeNode>> {
        Ok(Vec::new())
    }

    async fn fetch_metadata(&self, repo: &RepoId) -> RepolensResult<RepoMetadata> {
        if repo.repo() == "private" {
            return Err(RepolensError::forbidden(
                "Repository is private or rate limit exceeded",
            ));
        }
        Ok(RepoMetadata {
            branches: vec!["refs/heads/main".to_string()],
            recent_commits: vec![CommitSummary {
                sha: "0123456789".to_string(),
                message: "Add parser".to_string(),
                author: "Ada".to_string(),
                date: "2024-05-01T12:00:00Z".to_string(),
            }],
            default_branch: "refs/heads/main".to_string(),
        })
    }
}

struct Harness {
    _temp_dir: TempDir,
    cache_dir: std::path::PathBuf,
    ingestor: Arc<StubIngestor>,
    state: Arc<ApiState>,
}

fn harness(estimate: &'static str) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let cache_dir = temp_dir.path().join("repo_cache");
    let ingestor = Arc::new(StubIngestor {
        estimate,
        calls: AtomicUsize::new(0),
    });
    let cache = RepoCache::new(&CacheConfig {
        dir: cache_dir.clone(),
        ..CacheConfig::default()
    });
    let orchestrator = AnalysisOrchestrator::new(
        cache,
        ingestor.clone(),
        Arc::new(StubProvider),
        AnalysisConfig::default(),
    );
    Harness {
        _temp_dir: temp_dir,
        cache_dir,
        ingestor,
        state: Arc::new(ApiState::new(orchestrator, "https://github.com/")),
    }
}

impl Harness {
    async fn post_analyze(&self, body: Value) -> (StatusCode, Value) {
        let response = warp::test::request()
            .method("POST")
            .path("/analyze")
            .json(&body)
            .reply(&routes(self.state.clone()))
            .await;
        let value = serde_json::from_slice(response.body()).unwrap();
        (response.status(), value)
    }

    fn cache(&self) -> RepoCache {
        RepoCache::new(&CacheConfig {
            dir: self.cache_dir.clone(),
            ..CacheConfig::default()
        })
    }

    fn cached_files(&self) -> usize {
        std::fs::read_dir(&self.cache_dir)
            .map(|dir| dir.count())
            .unwrap_or(0)
    }
}

#[tokio::test]
async fn test_health() {
    let harness = harness("1.0K");
    let response = warp::test::request()
        .method("GET")
        .path("/")
        .reply(&routes(harness.state.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_analyze_success_then_cache_hit() {
    let harness = harness("1.0K");

    let (status, body) = harness
        .post_analyze(json!({"repoUrl": "https://github.com/octo/demo"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["structure"],
        json!([
            {
                "type": "directory",
                "name": "src",
                "path": "src",
                "children": [{"type": "file", "name": "main.rs", "path": "src/main.rs"}]
            },
            {"type": "file", "name": "README.md", "path": "README.md"}
        ])
    );
    assert_eq!(body["branches"], json!(["refs/heads/main"]));
    assert_eq!(body["default_branch"], "refs/heads/main");
    assert_eq!(body["recent_commits"][0]["sha"], "0123456789");
    assert_eq!(harness.cached_files(), 1);

    let (status, again) = harness
        .post_analyze(json!({"repoUrl": "https://github.com/octo/demo/"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, body);
    assert_eq!(harness.ingestor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_repository_is_404_without_cache_write() {
    let harness = harness("1.0K");

    let (status, body) = harness
        .post_analyze(json!({"repoUrl": "https://github.com/octo/missing"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Repository not found or inaccessible"}));
    assert_eq!(harness.cached_files(), 0);
    assert_eq!(harness.ingestor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_repository_is_400_without_cache_write() {
    let harness = harness("2.3M");

    let (status, body) = harness
        .post_analyze(json!({"repoUrl": "https://github.com/octo/demo"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Repository too large"));
    assert_eq!(harness.cached_files(), 0);
}

#[tokio::test]
async fn test_invalid_urls_are_400() {
    let harness = harness("1.0K");

    for (request, expected) in [
        (json!({}), "Repository URL is required"),
        (json!({"repoUrl": ""}), "Repository URL is required"),
        (json!({"repoUrl": "https://gitlab.com/o/r"}), "Invalid GitHub repository URL"),
        (json!({"repoUrl": "https://github.com/octo"}), "Invalid repository URL format"),
        (json!({"repoUrl": "https://github.com/a/b/c"}), "Invalid repository URL format"),
    ] {
        let (status, body) = harness.post_analyze(request.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {request}");
        assert_eq!(body["error"], expected, "for {request}");
    }
    assert_eq!(harness.ingestor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let harness = harness("1.0K");
    let response = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&routes(harness.state.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_metadata_forbidden_is_403() {
    let harness = harness("1.0K");
    // Seed the cache so the request gets as far as the metadata fetch.
    harness
        .cache()
        .store("octo", "private", "cached", &json!(["a.rs"]), &json!(null))
        .await;

    let (status, body) = harness
        .post_analyze(json!({"repoUrl": "https://github.com/octo/private"}))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Repository is private or rate limit exceeded");
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let harness = harness("1.0K");
    let filter = routes(harness.state.clone());

    let response = warp::test::request().path("/nope").reply(&filter).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = warp::test::request()
        .method("GET")
        .path("/analyze")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let harness = harness("1.0K");
    let response = warp::test::request()
        .method("OPTIONS")
        .path("/analyze")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .reply(&routes(harness.state.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let harness = harness("1.0K");
    let filter = routes(harness.state.clone());
    let origin = "http://localhost:3000";

    let malformed = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("origin", origin)
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&filter)
        .await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    assert_eq!(malformed.headers()["access-control-allow-origin"], origin);

    let missing = warp::test::request()
        .path("/nope")
        .header("origin", origin)
        .reply(&filter)
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.headers()["access-control-allow-origin"], origin);

    let wrong_method = warp::test::request()
        .method("GET")
        .path("/analyze")
        .header("origin", origin)
        .reply(&filter)
        .await;
    assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(wrong_method.headers()["access-control-allow-origin"], origin);
}
