use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ConfigError};

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// String `detail` of an error payload, if the service sent one.
    pub fn detail(&self) -> Option<String> {
        let payload: Value = serde_json::from_str(&self.body).ok()?;
        match payload.get("detail")? {
            Value::String(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    /// Maps a non-success reply to the error surfaced to the user.
    pub fn failure(&self, fallback: &str) -> ClientError {
        match self.detail() {
            Some(detail) => ClientError::Service {
                status: self.status,
                detail,
            },
            None => ClientError::Transport(fallback.to_string()),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

/// Request seam between the pipeline and the remote service.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<HttpReply, ClientError>;
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, ClientError>;
}

impl<T: Transport> Transport for &T {
    async fn get(&self, path: &str) -> Result<HttpReply, ClientError> {
        (**self).get(path).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, ClientError> {
        (**self).post_json(path, body).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<HttpReply, ClientError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(unreachable)?;
        read_reply(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, ClientError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(unreachable)?;
        read_reply(response).await
    }
}

async fn read_reply(response: reqwest::Response) -> Result<HttpReply, ClientError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(unreachable)?;
    debug!(status, bytes = body.len(), "reply");
    Ok(HttpReply { status, body })
}

fn unreachable(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}
