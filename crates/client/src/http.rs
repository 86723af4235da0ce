//! Request execution, error mapping, and transparent token refresh.
//!
//! Every request goes through [`ApiClient::execute`], which takes a closure
//! producing a fresh `RequestBuilder`. Builders are not reusable after
//! `send`, and multipart bodies cannot be cloned, so rebuilding from scratch
//! is the only way a request can be retried after a token refresh.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use fathom_shared::{AppError, AppResult};

use crate::auth::TokenPair;
use crate::ApiClient;

/// Error payload shape returned by the API.
///
/// The canonical form is `{"error": {"code": "...", "message": "..."}}`, but
/// some endpoints return a bare `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Extracts the human-readable message from an error response body,
/// falling back to a generic status description.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.error {
            return detail.message;
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }
    format!("Request failed with status {status}")
}

fn transport_error(err: &reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Network("Request timed out".to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

impl ApiClient {
    /// Executes a request, refreshing the session once on 401.
    ///
    /// The closure must produce an equivalent request each time it is
    /// called; it is invoked once normally and at most once more after a
    /// successful token refresh.
    pub(crate) async fn execute<F>(&self, build: F) -> AppResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let response = self.send_authorized(&build).await?;

        if response.status().as_u16() != 401 {
            return self.check_status(response).await;
        }

        // One transparent refresh, then one retry. A second 401 surfaces.
        if !self.refresh_session().await {
            return Err(AppError::Unauthorized(
                "Session expired, please sign in again".to_string(),
            ));
        }

        let retried = self.send_authorized(&build).await?;
        self.check_status(retried).await
    }

    async fn send_authorized<F>(&self, build: &F) -> AppResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut request = build();
        if let Some(token) = self.auth().access_token().await {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(|e| transport_error(&e))
    }

    /// Maps non-success responses to the error taxonomy.
    async fn check_status(&self, response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(code, &body);
        tracing::warn!(status = code, %message, "api request failed");
        Err(AppError::from_status(code, message))
    }

    /// Exchanges the refresh token for a new pair. Returns false (and
    /// clears the session) if no refresh token is held or the exchange is
    /// rejected.
    async fn refresh_session(&self) -> bool {
        let Some(refresh_token) = self.auth().refresh_token().await else {
            return false;
        };

        tracing::debug!("access token rejected, attempting refresh");

        let result = self
            .http
            .post(self.url(&self.refresh_path))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await;

        let Ok(response) = result else {
            return false;
        };
        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), "token refresh rejected");
            self.auth().clear().await;
            return false;
        }

        match response.json::<TokenPair>().await {
            Ok(pair) => {
                self.auth().install(pair).await;
                true
            }
            Err(_) => {
                self.auth().clear().await;
                false
            }
        }
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<T> {
        let url = self.url(path);
        let response = self
            .execute(|| self.http.get(&url).query(query))
            .await?;
        decode(response).await
    }

    /// POST a JSON body, decoding a JSON response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(path);
        let response = self.execute(|| self.http.post(&url).json(body)).await?;
        decode(response).await
    }

    /// POST with no request body, decoding a JSON response. Used by
    /// lifecycle transition endpoints.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        let response = self.execute(|| self.http.post(&url)).await?;
        decode(response).await
    }

    /// PUT a JSON body, decoding a JSON response.
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(path);
        let response = self.execute(|| self.http.put(&url).json(body)).await?;
        decode(response).await
    }

    /// DELETE a resource, ignoring any response body.
    pub(crate) async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.url(path);
        self.execute(|| self.http.delete(&url)).await?;
        Ok(())
    }

    /// POST a multipart form, decoding a JSON response.
    ///
    /// The form builder is a closure for the same reason as `execute`:
    /// multipart bodies are consumed on send.
    pub(crate) async fn post_multipart<T: DeserializeOwned, F>(
        &self,
        path: &str,
        form: F,
    ) -> AppResult<T>
    where
        F: Fn() -> reqwest::multipart::Form,
    {
        let url = self.url(path);
        let response = self
            .execute(|| self.http.post(&url).multipart(form()))
            .await?;
        decode(response).await
    }

    /// GET raw bytes (attachment download).
    pub(crate) async fn get_bytes(&self, path: &str) -> AppResult<bytes::Bytes> {
        let url = self.url(path);
        let response = self.execute(|| self.http.get(&url)).await?;
        response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.to_string()))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to decode response: {e}")))
}
