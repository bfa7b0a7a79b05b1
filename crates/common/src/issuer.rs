//! Request issuer
//!
//! One reusable entry point for every outbound call: method, URL, optional
//! query pairs and an optional form or JSON body. The issuer never retries;
//! a failed call is returned to the caller as a [`CoreError`].

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::CoreError;

/// Body encoding strategy for an outbound request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Sent as `application/json`.
    Json(serde_json::Value),
}

impl RequestBody {
    pub fn form<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RequestBody::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Status plus the fully read body of a completed call.
#[derive(Debug, Clone)]
pub struct IssuedResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl IssuedResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[derive(Debug, Clone)]
pub struct Issuer {
    client: Client,
}

impl Issuer {
    /// `None` keeps the client defaults; `Some` applies a fixed per-request budget.
    pub fn new(timeout: Option<Duration>) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("cannot build http client: {e}")))?;
        Ok(Self { client })
    }

    /// Parse `url` and append `query` as an encoded query string.
    pub fn build_url(url: &str, query: &[(&str, &str)]) -> Result<Url, CoreError> {
        let mut target = Url::parse(url).map_err(|e| CoreError::InvalidUrl(format!("{url}: {e}")))?;
        if !query.is_empty() {
            target.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(target)
    }

    /// Perform one call and read the whole body. Non-2xx statuses are returned, not raised.
    pub async fn issue(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> Result<IssuedResponse, CoreError> {
        let target = Self::build_url(url, query)?;
        debug!(%method, url = %target, "issuing request");

        let req = self.client.request(method.clone(), target.clone());
        let req = match body {
            RequestBody::Empty => req,
            RequestBody::Form(pairs) => req.form(&pairs),
            RequestBody::Json(value) => req.json(&value),
        };

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!(%method, url = %target, status = status.as_u16(), bytes = bytes.len(), "request completed");
        Ok(IssuedResponse { status, body: bytes.to_vec() })
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<IssuedResponse, CoreError> {
        self.issue(Method::GET, url, query, RequestBody::Empty).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        self.get(url, query).await?.json()
    }

    pub async fn post_json(&self, url: &str, value: serde_json::Value) -> Result<IssuedResponse, CoreError> {
        self.issue(Method::POST, url, &[], RequestBody::Json(value)).await
    }

    pub async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<IssuedResponse, CoreError> {
        self.issue(Method::POST, url, &[], RequestBody::form(fields.iter().copied())).await
    }

    /// GET `url` and stream the body into `writer` chunk by chunk.
    /// Returns the number of bytes copied.
    pub async fn copy_to<W>(&self, url: &str, writer: &mut W) -> Result<u64, CoreError>
    where
        W: AsyncWrite + Unpin,
    {
        let target = Self::build_url(url, &[])?;
        let mut resp = self.client.get(target).send().await?;
        let mut copied = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| CoreError::Transport(format!("write failed after {copied} bytes: {e}")))?;
            copied += chunk.len() as u64;
        }
        writer
            .flush()
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;
        Ok(copied)
    }
}
