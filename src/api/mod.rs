//! HTTP API client.
//!
//! A thin wrapper over `reqwest` bound to the configured base URL. It knows
//! nothing about tutorials; callers pass resource paths and payload types.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::errors::ClientError;

/// JSON HTTP client for the tutorials API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` with an optional transport timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(&config.base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path such as `/tutorials/1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with optional query parameters and decode the JSON body.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ClientError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let resp = self.send("GET", path, request).await?;
        decode(resp).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let resp = self.send("POST", path, request).await?;
        decode(resp).await
    }

    /// PUT a JSON body to `path` and decode the JSON response.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).json(body);
        let resp = self.send("PUT", path, request).await?;
        decode(resp).await
    }

    /// DELETE `path`; the response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(path));
        self.send("DELETE", path, request).await?;
        Ok(())
    }

    /// Send a request and map non-success statuses to `ClientError::Server`.
    async fn send(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        tracing::debug!("{} {}", method, path);

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::debug!("{} {} -> {}", method, path, status);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp)
    }
}

/// Decode a success body. An empty body decodes as JSON `null`.
async fn decode<R: DeserializeOwned>(resp: Response) -> Result<R, ClientError> {
    let body = resp.text().await?;
    decode_body(&body)
}

fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ClientError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}
