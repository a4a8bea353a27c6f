//! Authenticated HTTP client for the Housecall Pro REST API.
//!
//! [`HousecallClient::request`] is the single request primitive: it performs
//! exactly one call and returns the decoded JSON body or a
//! [`ClassifiedError`]. The verb helpers (`get`, `post`, ...) and the
//! paginator in [`super::pagination`] are thin layers over it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ApiResult, ClassifiedError};
use crate::core::config::ApiConfig;
use crate::core::{Error, Result};

/// A JSON object, used for query parameters and argument bags.
pub type JsonObject = serde_json::Map<String, Value>;

/// Client for the Housecall Pro API.
///
/// Cheap to clone; all clones share the same connection pool and credentials.
#[derive(Clone)]
pub struct HousecallClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    authorization: HeaderValue,
}

impl HousecallClient {
    /// Build a client from the API configuration.
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config("HOUSECALL_PRO_API_KEY environment variable is required"))?;

        Self::with_base_url(api_key, &config.base_url, config.timeout())
    }

    /// Build a client against an explicit base URL.
    pub fn with_base_url(api_key: &str, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::config("API key contains characters not allowed in an HTTP header"))?;
        authorization.set_sensitive(true);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                authorization,
            }),
        })
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Perform one authenticated request.
    ///
    /// Caller headers are merged over the JSON defaults; the bearer token is
    /// applied last and cannot be overridden.
    #[instrument(skip(self, body, headers), fields(method = %method))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.inner.base_url, path);
        debug!("Sending request to {}", path);

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .headers(self.merge_headers(headers));
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifiedError::from_transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClassifiedError::from_transport(&e))?;

        if !status.is_success() {
            let message = error_message(status, &text);
            debug!("API returned {}: {}", status.as_u16(), message);
            return Err(ClassifiedError::api(status.as_u16(), message, text));
        }

        decode_body(&text)
    }

    /// GET with optional query parameters.
    pub async fn get(&self, path: &str, query: Option<&JsonObject>) -> ApiResult<Value> {
        let target = match query {
            Some(params) => with_query(path, params),
            None => path.to_string(),
        };
        self.request(Method::GET, &target, None, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        self.request(Method::POST, path, body, None).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        self.request(Method::PUT, path, body, None).await
    }

    pub async fn patch(&self, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        self.request(Method::PATCH, path, body, None).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::DELETE, path, None, None).await
    }

    fn merge_headers(&self, overrides: Option<HeaderMap>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(overrides) = overrides {
            headers.extend(overrides);
        }
        headers.insert(AUTHORIZATION, self.inner.authorization.clone());
        headers
    }
}

impl fmt::Debug for HousecallClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HousecallClient")
            .field("base_url", &self.inner.base_url)
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

/// Append a URL-encoded query string built from `params` to `path`.
///
/// Null values are skipped and arrays are joined with commas.
pub fn with_query(path: &str, params: &JsonObject) -> String {
    let pairs: Vec<(&str, String)> = params
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.as_str(), v)))
        .collect();

    if pairs.is_empty() {
        return path.to_string();
    }

    match serde_urlencoded::to_string(&pairs) {
        Ok(query) => {
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{path}{separator}{query}")
        }
        Err(e) => {
            warn!("Dropping query parameters for {}: {}", path, e);
            path.to_string()
        }
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| query_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Pick the most useful message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )
    };

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    ["message", "error"]
        .iter()
        .find_map(|key| {
            match json.get(key)? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                scalar @ (Value::Number(_) | Value::Bool(_)) => Some(scalar.to_string()),
                _ => None,
            }
        })
        .unwrap_or_else(fallback)
}

fn decode_body(body: &str) -> ApiResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).map_err(|e| {
        ClassifiedError::network(format!("Invalid JSON in response body: {e}"), body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HousecallClient {
        HousecallClient::with_base_url("test-key", &server.uri(), None).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_body_verbatim_with_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/J-1"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "J-1", "extra": [1, 2]})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server).get("/jobs/J-1", None).await.unwrap();
        assert_eq!(value, json!({"id": "J-1", "extra": [1, 2]}));
    }

    #[tokio::test]
    async fn test_caller_headers_cannot_override_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/company"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("x-trace", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut overrides = HeaderMap::new();
        overrides.insert(AUTHORIZATION, HeaderValue::from_static("Bearer attacker"));
        overrides.insert("x-trace", HeaderValue::from_static("abc"));

        let value = client_for(&server)
            .request(Method::GET, "/company", None, Some(overrides))
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tags"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "vip"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "T-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server)
            .post("/tags", Some(&json!({"name": "vip"})))
            .await
            .unwrap();
        assert_eq!(value["id"], "T-1");
    }

    #[tokio::test]
    async fn test_error_message_taken_from_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/J-404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"message":"Job not found"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get("/jobs/J-404", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), 404);
        assert_eq!(err.message(), "Job not found");
        assert_eq!(err.details(), r#"{"message":"Job not found"}"#);
    }

    #[tokio::test]
    async fn test_error_field_used_when_message_missing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/tags/T-1"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Tag in use"})))
            .mount(&server)
            .await;

        let err = client_for(&server).delete("/tags/T-1").await.unwrap_err();
        assert_eq!(err.status(), 422);
        assert_eq!(err.message(), "Tag in use");
    }

    #[tokio::test]
    async fn test_non_json_error_body_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get("/customers", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "HTTP 502: Bad Gateway");
        assert_eq!(err.details(), "<html>bad gateway</html>");
    }

    #[tokio::test]
    async fn test_unregistered_status_falls_back_to_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(599))
            .mount(&server)
            .await;

        let err = client_for(&server).get("/jobs", None).await.unwrap_err();
        assert_eq!(err.status(), 599);
        assert_eq!(err.message(), "HTTP 599: Unknown");
    }

    #[tokio::test]
    async fn test_numeric_error_message_is_rendered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": 123})))
            .mount(&server)
            .await;

        let err = client_for(&server).post("/jobs", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "123");
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/company"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).get("/company", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert!(err.message().starts_with("Invalid JSON in response body"));
        assert_eq!(err.details(), "not json");
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on port 1.
        let client = HousecallClient::with_base_url("test-key", "http://127.0.0.1:1", None).unwrap();
        let err = client.get("/jobs", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert!(!err.message().is_empty());
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/leads/L-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let value = client_for(&server).delete("/leads/L-1").await.unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_get_appends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dispatch/board"))
            .and(query_param("date", "2024-01-15"))
            .and(query_param("employee_ids", "E-1,E-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobs": []})))
            .expect(1)
            .mount(&server)
            .await;

        let query = json!({"date": "2024-01-15", "employee_ids": ["E-1", "E-2"], "unused": null});
        let value = client_for(&server)
            .get("/dispatch/board", query.as_object())
            .await
            .unwrap();
        assert_eq!(value, json!({"jobs": []}));
    }

    #[test]
    fn test_with_query_encodes_values() {
        let params = json!({"active": true, "page": 2, "search": "a b&c", "skip": null});
        let target = with_query("/customers", params.as_object().unwrap());
        assert_eq!(target, "/customers?active=true&page=2&search=a+b%26c");
    }

    #[test]
    fn test_with_query_empty_keeps_path() {
        let params = json!({"skip": null});
        assert_eq!(with_query("/tags", params.as_object().unwrap()), "/tags");
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client =
            HousecallClient::with_base_url("k", "https://api.example.com/", None).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client =
            HousecallClient::with_base_url("super_secret", "https://api.example.com", None)
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super_secret"));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = ApiConfig {
            api_key: None,
            ..ApiConfig::default()
        };
        assert!(matches!(HousecallClient::new(&config), Err(Error::Config(_))));
    }
}
