use crate::api::error::{error_detail, ApiError, ApiResult};
use crate::api::models::*;
use crate::diagnostics::{log_perf, started};
use once_cell::sync::Lazy;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Typed access to the catalog, auth, favorites and playlist endpoints.
///
/// Cheap to clone; holds only the server config and the optional token.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    pub config: ApiConfig,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct SongIdBody {
    song_id: TrackId,
}

#[derive(Debug, Serialize)]
struct PlaylistNameBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(default)]
    email: Option<String>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn music_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.music_url(), path.trim_start_matches('/'))
    }

    fn users_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.users_url(), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = HTTP_CLIENT
            .request(method, url)
            .header("Content-Type", "application/json");
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Token {token}")),
            None => builder,
        }
    }

    /// Builder for an endpoint that requires a signed-in user.
    fn authed(&self, method: Method, url: &str) -> ApiResult<RequestBuilder> {
        if self.token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(self.request(method, url))
    }

    async fn send(&self, scope: &str, builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let started_at = started();
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        log_perf(scope, started_at, status.as_str());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        })
    }

    async fn send_json<T>(&self, scope: &str, builder: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(scope, builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_unit(&self, scope: &str, builder: RequestBuilder) -> ApiResult<()> {
        self.send(scope, builder).await.map(|_| ())
    }
}

include!("auth.rs");
include!("catalog.rs");
include!("library.rs");

/// Collapse an error into a fallback value for read paths that render "nothing"
/// instead of failing.
fn or_fallback<T>(scope: &str, result: ApiResult<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("{scope} failed: {err}");
            fallback
        }
    }
}
