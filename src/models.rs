use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ── Detection lifecycle ──────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    New,
    InProgress,
    Resolved,
    FalsePositive,
}

/// Ordinal risk classification, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

// ── Detection ────────────────────────────────────────────
/// Backend-produced security alert. The view never mutates one; the backend
/// owns the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: DetectionStatus,
    pub severity: Severity,
    pub confidence: f64,
    pub source: String,
    #[serde(default)]
    pub endpoint_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Aggregate stats (GET /detections/stats/summary) ──────
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total: u64,
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
    #[serde(default)]
    pub by_severity: HashMap<String, u64>,
    #[serde(default)]
    pub by_source: HashMap<String, u64>,
    #[serde(default)]
    pub recent: Vec<Detection>,
}

impl DetectionStats {
    pub fn severity_count(&self, severity: Severity) -> u64 {
        self.by_severity.get(severity.as_str()).copied().unwrap_or(0)
    }
}

// ── Chat session (view-local) ────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: ChatRole, content: String) -> Self {
        let timestamp = Utc::now();
        ChatMessage {
            id: timestamp.timestamp_millis().to_string(),
            role,
            content,
            timestamp,
        }
    }

    pub fn user(content: String) -> Self {
        Self::now(ChatRole::User, content)
    }

    pub fn assistant(content: String) -> Self {
        Self::now(ChatRole::Assistant, content)
    }
}

// ── Realtime frame ───────────────────────────────────────
/// Open tagged record off the realtime channel. Anything with a `type` field
/// is accepted; the rest of the payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

// ── Endpoint inventory ───────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub hostname: String,
    pub ip_address: String,
    pub os: String,
    pub status: EndpointStatus,
    pub last_seen: DateTime<Utc>,
    pub threat_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_parses_backend_json() {
        let raw = r#"{
            "id": 42,
            "title": "Suspicious PowerShell execution",
            "description": "Encoded command spawned from winword.exe",
            "status": "in_progress",
            "severity": "high",
            "confidence": 0.87,
            "source": "edr",
            "tags": ["powershell", "t1059"],
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-01T12:05:00Z"
        }"#;
        let d: Detection = serde_json::from_str(raw).unwrap();
        assert_eq!(d.id, 42);
        assert_eq!(d.status, DetectionStatus::InProgress);
        assert_eq!(d.severity, Severity::High);
        assert_eq!(d.endpoint_id, None);
        assert_eq!(d.tags.len(), 2);
    }

    #[test]
    fn severity_is_ordinal() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn stats_counts_default_to_zero() {
        let stats: DetectionStats =
            serde_json::from_str(r#"{"total": 3, "by_severity": {"critical": 2}}"#).unwrap();
        assert_eq!(stats.severity_count(Severity::Critical), 2);
        assert_eq!(stats.severity_count(Severity::Low), 0);
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn realtime_message_requires_a_type_tag() {
        let ok: RealtimeMessage =
            serde_json::from_str(r#"{"type":"detection","id":1}"#).unwrap();
        assert_eq!(ok.msg_type, "detection");
        assert_eq!(ok.payload["id"], serde_json::json!(1));

        assert!(serde_json::from_str::<RealtimeMessage>(r#"{"id":1}"#).is_err());
    }
}
