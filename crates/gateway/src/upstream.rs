//! The outbound side of the gateway: one trait method per upstream call,
//! plus the reqwest-backed implementation used in production.

use async_trait::async_trait;
use common::types::Post;
use configs::UpstreamConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::GatewayError;
use crate::form::PostId;
use crate::observability::{UPSTREAM_ERRORS_TOTAL, UPSTREAM_REQUEST_DURATION};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Body of `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[async_trait]
pub trait PostsUpstream: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, GatewayError>;
    /// The echoed post is returned as parsed, unknown fields included.
    async fn create(&self, post: &NewPost) -> Result<Value, GatewayError>;
    async fn update(&self, id: &PostId, post: &PostUpdate) -> Result<Value, GatewayError>;
    /// The response body is never read.
    async fn delete(&self, id: &PostId) -> Result<(), GatewayError>;
}

/// reqwest-backed upstream rooted at `{base_url}/posts`.
#[derive(Debug, Clone)]
pub struct HttpPostsUpstream {
    client: Client,
    posts_url: String,
}

impl HttpPostsUpstream {
    /// Build a client with the connect and request timeouts from `cfg`.
    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .build()
            .map_err(|e| GatewayError::Network(format!("cannot build http client: {e}")))?;
        Ok(Self::with_client(client, &cfg.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        let posts_url = format!("{}/posts", base_url.trim_end_matches('/'));
        Self { client, posts_url }
    }

    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }

    fn post_url(&self, id: &PostId) -> String {
        format!("{}/{}", self.posts_url, id)
    }

    fn with_json<B: Serialize>(req: RequestBuilder, body: &B) -> Result<RequestBuilder, GatewayError> {
        let bytes = serde_json::to_vec(body)?;
        Ok(req.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes))
    }

    async fn send(&self, method: &'static str, req: RequestBuilder) -> Result<Response, GatewayError> {
        let timer = UPSTREAM_REQUEST_DURATION.with_label_values(&[method]).start_timer();
        let res = req.send().await;
        timer.observe_duration();
        match res {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    debug!(method, %status, url = %resp.url(), "upstream responded");
                } else {
                    warn!(method, %status, url = %resp.url(), "upstream responded with non-success status");
                }
                Ok(resp)
            }
            Err(e) => {
                UPSTREAM_ERRORS_TOTAL.with_label_values(&[method]).inc();
                Err(e.into())
            }
        }
    }

    async fn decode<T: DeserializeOwned>(method: &'static str, resp: Response) -> Result<T, GatewayError> {
        let bytes = resp.bytes().await.map_err(|e| {
            UPSTREAM_ERRORS_TOTAL.with_label_values(&[method]).inc();
            GatewayError::from(e)
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            UPSTREAM_ERRORS_TOTAL.with_label_values(&[method]).inc();
            GatewayError::from(e)
        })
    }
}

#[async_trait]
impl PostsUpstream for HttpPostsUpstream {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        let resp = self.send("GET", self.client.get(&self.posts_url)).await?;
        Self::decode("GET", resp).await
    }

    async fn create(&self, post: &NewPost) -> Result<Value, GatewayError> {
        let req = Self::with_json(self.client.post(&self.posts_url), post)?;
        let resp = self.send("POST", req).await?;
        Self::decode("POST", resp).await
    }

    async fn update(&self, id: &PostId, post: &PostUpdate) -> Result<Value, GatewayError> {
        let req = Self::with_json(self.client.put(self.post_url(id)), post)?;
        let resp = self.send("PUT", req).await?;
        Self::decode("PUT", resp).await
    }

    async fn delete(&self, id: &PostId) -> Result<(), GatewayError> {
        self.send("DELETE", self.client.delete(self.post_url(id))).await?;
        Ok(())
    }
}
