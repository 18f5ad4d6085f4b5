mod parts;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use partfinder_agent::{FinderError, PartFinder};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<PartFinder>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    search: &'static str,
    extraction: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps an orchestrator failure onto the public error contract. Internal
/// causes are logged, never echoed to the caller.
pub(super) fn map_finder_error(request_id: String, error: &FinderError) -> ApiError {
    match error {
        FinderError::Validation(e) => ApiError::new(request_id, "validation_error", e.to_string()),
        FinderError::Configuration(reason) => {
            tracing::error!(request_id = %request_id, error = %reason, "search unavailable");
            ApiError::new(
                request_id,
                "service_unavailable",
                format!("Service configuration error: {reason}"),
            )
        }
        FinderError::Search(_) | FinderError::Client(_) => {
            tracing::error!(request_id = %request_id, error = %error, "part search failed");
            ApiError::new(
                request_id,
                "internal_error",
                "An error occurred while searching for parts. Please try again.",
            )
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/parts/search", post(parts::search_parts))
        .route("/api/v1/parts/quick", get(parts::quick_search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let extraction = if state.finder.enrichment_enabled() {
        "configured"
    } else {
        "disabled"
    };

    if state.finder.search_configured() {
        (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    search: "configured",
                    extraction,
                },
                meta,
            }),
        )
    } else {
        tracing::warn!("health check: search API key missing");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                data: HealthData {
                    status: "degraded",
                    search: "missing",
                    extraction,
                },
                meta,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use partfinder_agent::FinderOptions;
    use partfinder_enrich::{EnrichmentEngine, PageFetcher};
    use partfinder_search::SerperClient;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(serper_key: Option<&str>, base_url: &str) -> Router {
        let search =
            SerperClient::with_base_url(serper_key.map(str::to_owned), 5, base_url, "lk")
                .expect("serper client");
        let fetcher = PageFetcher::new(5, "partfinder-test/0.1").expect("fetcher");
        let finder = PartFinder::new(
            search,
            EnrichmentEngine::new(fetcher, None, 50_000),
            FinderOptions {
                default_location: "Sri Lanka".to_owned(),
                default_currency: "LKR".to_owned(),
                enrich_concurrency: 1,
                max_enrichments: 10,
            },
        );
        build_app(AppState {
            finder: Arc::new(finder),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn api_error_codes_map_to_statuses() {
        let cases = [
            ("validation_error", StatusCode::BAD_REQUEST),
            ("service_unavailable", StatusCode::SERVICE_UNAVAILABLE),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1", code, "message").into_response();
            assert_eq!(response.status(), expected, "code {code}");
        }
    }

    #[tokio::test]
    async fn health_reports_degraded_without_search_key() {
        let (status, body) = send(app(None, "http://127.0.0.1:1"), get_request("/api/v1/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["status"], "degraded");
        assert_eq!(body["data"]["search"], "missing");
        assert_eq!(body["data"]["extraction"], "disabled");
    }

    #[tokio::test]
    async fn health_ok_with_search_key() {
        let (status, body) = send(
            app(Some("key"), "http://127.0.0.1:1"),
            get_request("/api/v1/health"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .expect("request");
        let response = app(Some("key"), "http://127.0.0.1:1")
            .oneshot(request)
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("abc-123")
        );
    }

    #[tokio::test]
    async fn search_returns_enveloped_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shopping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "shopping": [
                    {"title": "SKF 6205", "source": "Bearing House",
                     "link": "https://bearinghouse.lk/6205", "price": "Rs 1,250"}
                ]
            })))
            .mount(&server)
            .await;

        let (status, body) = send(
            app(Some("key"), &server.uri()),
            post_json(
                "/api/v1/parts/search",
                &json!({"part_name": "6205 bearing", "max_results": 1}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["search_query"], "buy 6205 bearing Sri Lanka");
        assert_eq!(body["data"]["total_results"], 1);
        assert_eq!(body["data"]["fast_path_count"], 1);
        let result = &body["data"]["results"][0];
        assert_eq!(result["vendor_name"], "Bearing House");
        assert_eq!(result["price"], 1250.0);
        assert_eq!(result["availability"], "Unknown");
        assert_eq!(result["source_type"], "serper_snippet");
        assert!(body["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn quick_search_is_fast_path_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shopping"))
            .and(wiremock::matchers::body_partial_json(json!({
                "num": 5,
                "location": "India",
                "gl": "in"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shopping": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [{"title": "Relay", "link": "https://relay.example/1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = send(
            app(Some("key"), &server.uri()),
            get_request("/api/v1/parts/quick?part_name=relay&location=India"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_results"], 1);
        assert_eq!(body["data"]["slow_path_count"], 0);
    }

    #[tokio::test]
    async fn quick_search_requires_part_name() {
        let (status, body) = send(
            app(Some("key"), "http://127.0.0.1:1"),
            get_request("/api/v1/parts/quick?location=India"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn out_of_range_request_is_rejected() {
        let (status, body) = send(
            app(Some("key"), "http://127.0.0.1:1"),
            post_json(
                "/api/v1/parts/search",
                &json!({"part_name": "relay", "max_results": 51}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/parts/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let (status, body) = send(app(Some("key"), "http://127.0.0.1:1"), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn missing_search_key_is_service_unavailable() {
        let (status, body) = send(
            app(None, "http://127.0.0.1:1"),
            post_json("/api/v1/parts/search", &json!({"part_name": "relay"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "service_unavailable");
        let message = body["error"]["message"].as_str().expect("message");
        assert!(message.starts_with("Service configuration error:"));
    }

    #[tokio::test]
    async fn upstream_failure_is_generic_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shopping"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway secret"))
            .mount(&server)
            .await;

        let (status, body) = send(
            app(Some("key"), &server.uri()),
            post_json("/api/v1/parts/search", &json!({"part_name": "relay"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");
        assert!(!body["error"]["message"]
            .as_str()
            .expect("message")
            .contains("502"));
    }
}
