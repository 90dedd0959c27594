//! HTTP request core.
//!
//! [`ApiClient`] is the single choke point between logical operations and
//! the wire: it composes URLs from the configured origin, negotiates the
//! body encoding (JSON vs multipart), injects the bearer token, and
//! normalizes every response into an [`ApiResult`].

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::token::{FileTokenStore, TokenStore};

/// Path prefix for auth-domain endpoints.
pub(crate) const AUTH_PREFIX: &str = "/api/auth";
/// Path prefix for profile-domain endpoints.
pub(crate) const USER_PREFIX: &str = "/api/user";
/// Path prefix for admin-domain endpoints.
pub(crate) const ADMIN_PREFIX: &str = "/api/admin";

/// Request body variants.
///
/// Multipart bodies never set a content type here - reqwest must own the
/// header so the boundary parameter is correct.
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

/// Client for the user-management REST backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the token
/// store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// Extract the most specific message: for 400 a joined validation
    /// list, otherwise `message` then `error`.
    fn into_message(self, status: StatusCode) -> Option<String> {
        if status == StatusCode::BAD_REQUEST
            && let Some(errors) = self.errors.filter(|e| !e.is_empty())
        {
            return Some(errors.join(", "));
        }
        self.message.or(self.error)
    }
}

impl ApiClient {
    /// Create a client from configuration, persisting tokens at the
    /// configured path.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_store(
            config.base_url.clone(),
            Arc::new(FileTokenStore::new(config.token_path.clone())),
        )
    }

    /// Create a client with an explicit token store.
    #[must_use]
    pub fn with_store(base_url: String, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    /// Read the stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// Persist a bearer token. Empty tokens are ignored.
    pub fn set_token(&self, token: &str) {
        self.tokens.set(token);
    }

    /// Drop the stored bearer token.
    pub fn clear_token(&self) {
        self.tokens.clear();
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Stored token, or [`ApiError::NotAuthenticated`].
    ///
    /// Client-side guard only; the backend remains the authority.
    pub(crate) fn require_token(&self) -> ApiResult<String> {
        self.tokens.get().ok_or(ApiError::NotAuthenticated)
    }

    /// Issue a request and decode the JSON success body into `T`.
    #[instrument(skip(self, body, token), fields(path = %path))]
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let response = self.send(method, path, body, token).await?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(ApiError::Decode);
        }
        Err(Self::error_from_response(status, response).await)
    }

    /// Issue a request and return the raw success body (CSV export).
    #[instrument(skip(self, token), fields(path = %path))]
    pub(crate) async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<Vec<u8>> {
        let response = self.send(method, path, RequestBody::Empty, token).await?;
        let status = response.status();
        if status.is_success() {
            return response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(ApiError::Decode);
        }
        Err(Self::error_from_response(status, response).await)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> ApiResult<Response> {
        let url = format!("{}{path}", self.base_url);

        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request = match body {
            RequestBody::Empty => request,
            // .json() sets Content-Type: application/json
            RequestBody::Json(value) => request.json(&value),
            // .multipart() lets reqwest set the boundary content type
            RequestBody::Multipart(form) => request.multipart(form),
        };

        request.send().await.map_err(|e| {
            debug!(url = %url, error = %e, "request failed to complete");
            ApiError::Transport(e)
        })
    }

    /// Map a non-2xx response to an [`ApiError`].
    ///
    /// 409 and 422 get fixed messages regardless of the body. Everything
    /// else extracts a message from the JSON body, falling back to the
    /// status reason phrase when the body is not parseable JSON.
    async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
        match status {
            StatusCode::CONFLICT => return ApiError::EmailAlreadyRegistered,
            StatusCode::UNPROCESSABLE_ENTITY => return ApiError::InvalidSubmission,
            _ => {}
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("API request failed")
            .to_owned();

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.into_message(status).unwrap_or(fallback),
            Err(_) => fallback,
        };

        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}
