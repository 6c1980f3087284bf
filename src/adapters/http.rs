//! HTTP adapter: `PredictionClient` over a blocking reqwest client.
//!
//! One JSON POST per call. No timeout is configured, so a hung service
//! keeps the caller waiting.

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{ErrorBody, PredictionRequest, PredictionResponse};
use crate::ports::{PredictionClient, PredictionOutcome, TransportError};

/// Path of the prediction endpoint, relative to the service base URL.
pub const PREDICT_PATH: &str = "api/predict";

/// Error type for building the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Invalid prediction endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client setup failed: {0}")]
    Build(#[from] reqwest::Error),
}

/// Resolve the prediction URL under `base`, keeping any path prefix.
///
/// # Errors
/// Returns `url::ParseError` if the joined URL is invalid.
pub fn predict_url(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICT_PATH)
}

pub struct HttpPredictionClient {
    client: Client,
    url: Url,
}

impl HttpPredictionClient {
    /// Create a client for the service rooted at `base`.
    ///
    /// # Errors
    /// Returns error if the URL cannot be resolved or the TLS backend
    /// fails to initialize.
    pub fn new(base: &Url) -> Result<Self, HttpClientError> {
        let url = predict_url(base)?;
        let client = Client::builder().timeout(None).build()?;
        tracing::info!("Prediction endpoint: {}", url);
        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, TransportError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Prediction service answered {}", status);

        if status.is_success() {
            let body: PredictionResponse = response
                .json()
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Ok(PredictionOutcome::Success(body))
        } else {
            let body: ErrorBody = response
                .json()
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Ok(PredictionOutcome::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tokio::runtime::Runtime;

    /// Serve `app` on an ephemeral port. Keep the runtime alive for the
    /// duration of the test.
    fn spawn_server(app: Router) -> (Runtime, Url) {
        let rt = Runtime::new().expect("Should create runtime");
        let listener = rt
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("Should bind");
        let addr = listener.local_addr().expect("Should have address");
        rt.spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let base = Url::parse(&format!("http://{addr}")).expect("Valid URL");
        (rt, base)
    }

    fn sample_request() -> PredictionRequest {
        let mut request = PredictionRequest::new();
        request.insert("age", 54.0);
        request.insert("height", 174.0);
        request.insert("weight", 86.5);
        request
    }

    #[test]
    fn test_predict_url_keeps_prefix() {
        let base = Url::parse("http://localhost:8000").expect("Valid URL");
        assert_eq!(
            predict_url(&base).expect("join").as_str(),
            "http://localhost:8000/api/predict"
        );

        let base = Url::parse("https://example.org/cardio").expect("Valid URL");
        assert_eq!(
            predict_url(&base).expect("join").as_str(),
            "https://example.org/cardio/api/predict"
        );
    }

    #[test]
    fn test_success_response() {
        let app = Router::new().route(
            "/api/predict",
            post(|Json(body): Json<Value>| async move {
                let fields: Vec<String> = body
                    .as_object()
                    .map(|o| o.keys().cloned().collect())
                    .unwrap_or_default();
                Json(json!({
                    "label": fields.join(","),
                    "confidence": body["age"],
                    "recommendation": "Keep healthy weight; monitor BP occasionally.",
                }))
            }),
        );
        let (_rt, base) = spawn_server(app);
        let client = HttpPredictionClient::new(&base).expect("Should build client");

        let response = match client.predict(&sample_request()).expect("Should answer") {
            PredictionOutcome::Success(response) => response,
            other => panic!("expected success, got {other:?}"),
        };
        let mut fields: Vec<&str> = response.label.split(',').collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["age", "height", "weight"]);
        assert!((response.confidence - 54.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejected_response() {
        let app = Router::new().route(
            "/api/predict",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Validation failed",
                        "details": {"ap_hi": "Missing value"},
                    })),
                )
            }),
        );
        let (_rt, base) = spawn_server(app);
        let client = HttpPredictionClient::new(&base).expect("Should build client");

        match client.predict(&sample_request()).expect("Should answer") {
            PredictionOutcome::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body.message(), "Validation failed");
                assert_eq!(body.field_errors(), Some(&json!({"ap_hi": "Missing value"})));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_is_decode_failure() {
        let app = Router::new().route(
            "/api/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let (_rt, base) = spawn_server(app);
        let client = HttpPredictionClient::new(&base).expect("Should build client");

        let err = client
            .predict(&sample_request())
            .expect_err("Body is not JSON");
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_unreachable_service_is_request_failure() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("Should bind");
        let base = Url::parse(&format!("http://{addr}")).expect("Valid URL");
        let client = HttpPredictionClient::new(&base).expect("Should build client");

        let err = client
            .predict(&sample_request())
            .expect_err("Nothing listens there");
        assert!(matches!(err, TransportError::Request(_)));
    }
}
