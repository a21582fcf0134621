// Gitness API HTTP client.
// Handles authentication, request dispatch, and error body conversion.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;

use crate::error::{AppError, Result};

use super::types::ErrorBody;

const API_PREFIX: &str = "/api/v1";

/// Gitness API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct GitnessClient {
    client: Client,
    base_url: String,
}

impl GitnessClient {
    /// Create a new client for the given server, optionally authenticated.
    pub fn new(server_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| AppError::Config(e.to_string()))?,
            );
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("repodesk"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AppError::Api)?;

        Ok(Self {
            client,
            base_url: format!("{}{}", server_url.trim_end_matches('/'), API_PREFIX),
        })
    }

    /// Root of the versioned API, e.g. `http://localhost:3000/api/v1`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to the API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(AppError::Api)?;

        self.check_response(response).await
    }

    /// Make a PATCH request with a JSON body.
    pub async fn patch_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "PATCH");
        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(AppError::Api)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let message = error_message(response).await;
        tracing::warn!(%url, %status, %message, "request failed");

        match status {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            StatusCode::FORBIDDEN => Err(AppError::Forbidden(message)),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(url)),
            status => Err(AppError::Server { status, message }),
        }
    }
}

/// Extract the `message` field of an error body, or the raw body text.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = GitnessClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn test_rejects_invalid_token() {
        let result = GitnessClient::new("http://localhost:3000", Some("bad\ntoken"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_error_body_message_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/boom")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"title too long"}"#)
            .create_async()
            .await;

        let client = GitnessClient::new(&server.url(), None).unwrap();
        let err = client.get("/boom").await.unwrap_err();
        mock.assert_async().await;

        match err {
            AppError::Server { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "title too long");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/boom")
            .with_status(502)
            .with_body("bad gateway\n")
            .create_async()
            .await;

        let client = GitnessClient::new(&server.url(), None).unwrap();
        let err = client.get("/boom").await.unwrap_err();
        assert_eq!(err.user_message(), "bad gateway");
    }

    #[tokio::test]
    async fn test_json_error_body_without_message_keeps_raw_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/boom")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"x"}"#)
            .create_async()
            .await;

        let client = GitnessClient::new(&server.url(), None).unwrap();
        let err = client.get("/boom").await.unwrap_err();
        assert_eq!(err.user_message(), r#"{"error":"x"}"#);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/private")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/missing")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/locked")
            .with_status(403)
            .with_body(r#"{"message":"forbidden"}"#)
            .create_async()
            .await;

        let client = GitnessClient::new(&server.url(), Some("token")).unwrap();
        assert!(matches!(
            client.get("/private").await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            client.get("/missing").await,
            Err(AppError::NotFound(_))
        ));
        match client.get("/locked").await {
            Err(AppError::Forbidden(message)) => assert_eq!(message, "forbidden"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
