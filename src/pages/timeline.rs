use std::fmt::Write;

use crate::api::ApiClient;
use crate::models::Detection;
use crate::pages::FetchSlot;

const TIMELINE_LIMIT: usize = 50;

/// Incident timeline: the 50 most recent detections in arrival order.
#[derive(Default)]
pub struct TimelinePage {
    pub detections: FetchSlot<Vec<Detection>>,
}

impl TimelinePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.detections = FetchSlot::Loading;
        let result = api.list_detections(TIMELINE_LIMIT, None).await;
        self.detections.settle(result, "timeline");
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Incident timeline:");
        if let Some(list) = self.detections.value() {
            for d in list {
                let _ = writeln!(
                    out,
                    "  {} [{}] {} ({})",
                    d.created_at.to_rfc3339(),
                    d.severity.as_str().to_uppercase(),
                    d.title,
                    d.source
                );
            }
        }
        out
    }
}
