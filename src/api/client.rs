use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Where the bearer credential comes from. Injected rather than read
/// from ambient global state so callers control the session scope.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed-token store for tests and headless tooling.
pub struct StaticTokenStore(Option<String>);

impl StaticTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl TokenStore for StaticTokenStore {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Uniform response envelope used by every non-streaming endpoint.
/// `code == 0` means success; business failures can arrive with HTTP
/// 200 and a non-zero code.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin typed wrapper over the service's REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.tokens.token().unwrap_or_default();
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {token}"))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        unwrap_envelope(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        unwrap_envelope(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        unwrap_envelope(response).await
    }

    /// PUT where the server acknowledges with a bare success envelope.
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        check_envelope(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.request(Method::DELETE, path).send().await?;
        unwrap_envelope(response).await
    }

    pub async fn delete_unit(&self, path: &str) -> AppResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        check_envelope(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> AppResult<T> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        unwrap_envelope(response).await
    }
}

/// Decode the envelope and require a data payload.
async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let envelope: Envelope<T> = decode_envelope(response).await?;
    envelope
        .data
        .ok_or_else(|| AppError::Api("Response is missing data".into()))
}

/// Decode the envelope, discarding any data payload.
async fn check_envelope(response: Response) -> AppResult<()> {
    decode_envelope::<serde_json::Value>(response).await.map(|_| ())
}

async fn decode_envelope<T: DeserializeOwned>(response: Response) -> AppResult<Envelope<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, response).await);
    }

    let envelope: Envelope<T> = response.json().await?;
    if envelope.code != 0 {
        let message = if envelope.message.is_empty() {
            format!("Request failed (code {})", envelope.code)
        } else {
            envelope.message
        };
        return Err(AppError::Api(message));
    }
    Ok(envelope)
}

async fn status_error(status: StatusCode, response: Response) -> AppError {
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed ({status})"));

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Api(message),
    }
}
