use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::models::{Detection, DetectionStats};

/// Thin JSON client for the detection backend. No retry, no auth; transport
/// errors and non-2xx statuses surface as `Err` for the caller to log.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    conversation_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /detections?limit=N&search=S, most recent first (server-ordered).
    pub async fn list_detections(
        &self,
        limit: usize,
        search: Option<&str>,
    ) -> Result<Vec<Detection>, reqwest::Error> {
        let mut req = self
            .http
            .get(format!("{}/detections", self.base_url))
            .query(&[("limit", limit.to_string())]);
        if let Some(term) = search {
            req = req.query(&[("search", term)]);
        }
        req.send().await?.error_for_status()?.json().await
    }

    /// GET /detections/stats/summary
    pub async fn stats_summary(&self) -> Result<DetectionStats, reqwest::Error> {
        self.http
            .get(format!("{}/detections/stats/summary", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// POST /ai/chat, one request/response round trip, no streaming.
    pub async fn chat(
        &self,
        message: &str,
        conversation_id: &str,
    ) -> Result<ChatReply, reqwest::Error> {
        self.http
            .post(format!("{}/ai/chat", self.base_url))
            .json(&ChatRequest {
                message,
                conversation_id,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
