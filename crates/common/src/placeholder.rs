//! Client calls against a JSONPlaceholder-style REST service.
//!
//! The base URL is a parameter so the same calls can target the public
//! service or a local stand-in.

use std::time::Duration;

use tokio::io::AsyncWrite;

use crate::{
    issuer::Issuer,
    types::{Comment, CreatedPost},
    CoreError,
};

#[derive(Debug, Clone)]
pub struct PlaceholderClient {
    base_url: String,
    /// Default client, no request budget.
    issuer: Issuer,
    /// Client with a fixed per-request timeout.
    timed: Issuer,
}

impl PlaceholderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        Ok(Self {
            base_url: base_url.into(),
            issuer: Issuer::new(None)?,
            timed: Issuer::new(Some(timeout))?,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// GET `/posts/{id}` and return the raw body.
    pub async fn fetch_post(&self, id: u32) -> Result<String, CoreError> {
        let resp = self.issuer.get(&self.endpoint(&format!("posts/{id}")), &[]).await?;
        Ok(resp.text())
    }

    /// GET `/posts/{id}` straight into `writer`; returns the bytes copied.
    pub async fn stream_post<W>(&self, id: u32, writer: &mut W) -> Result<u64, CoreError>
    where
        W: AsyncWrite + Unpin,
    {
        self.issuer.copy_to(&self.endpoint(&format!("posts/{id}")), writer).await
    }

    /// GET `/comments?postId={post_id}` and return the raw body.
    pub async fn fetch_comments_raw(&self, post_id: u32) -> Result<String, CoreError> {
        let post_id = post_id.to_string();
        let resp = self
            .issuer
            .get(&self.endpoint("comments"), &[("postId", post_id.as_str())])
            .await?;
        Ok(resp.text())
    }

    pub async fn fetch_users_raw(&self) -> Result<String, CoreError> {
        let resp = self.timed.get(&self.endpoint("users"), &[]).await?;
        Ok(resp.text())
    }

    /// Decoded `/comments?postId={post_id}`, under the timed client.
    pub async fn fetch_comments(&self, post_id: u32) -> Result<Vec<Comment>, CoreError> {
        let post_id = post_id.to_string();
        self.timed
            .get_json(&self.endpoint("comments"), &[("postId", post_id.as_str())])
            .await
    }

    /// POST `fields` as a JSON object to `/posts`; returns the raw reply.
    pub async fn create_post_json(&self, fields: &[(&str, &str)]) -> Result<String, CoreError> {
        let object: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        let resp = self
            .issuer
            .post_json(&self.endpoint("posts"), serde_json::Value::Object(object))
            .await?;
        Ok(resp.text())
    }

    /// POST `fields` form-encoded to `/posts` and decode the echoed record.
    pub async fn create_post_form(&self, fields: &[(&str, &str)]) -> Result<CreatedPost, CoreError> {
        self.issuer.post_form(&self.endpoint("posts"), fields).await?.json()
    }
}

/// POST `fields` form-encoded to an httpbin-style echo and return its `form` member.
pub async fn echo_form(
    issuer: &Issuer,
    url: &str,
    fields: &[(&str, &str)],
) -> Result<serde_json::Value, CoreError> {
    let mut reply: serde_json::Value = issuer.post_form(url, fields).await?.json()?;
    reply
        .get_mut("form")
        .map(serde_json::Value::take)
        .ok_or_else(|| CoreError::Decode("echo reply has no `form` member".into()))
}
