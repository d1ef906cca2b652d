use crate::api::ApiClient;
use crate::models::Detection;
use crate::pages::FetchSlot;

const SEARCH_LIMIT: usize = 20;

/// Canned starting points shown next to the search box.
pub const QUICK_QUERIES: [&str; 4] = [
    "Ransomware activity",
    "C2 beaconing",
    "PowerShell execution",
    "Process injection",
];

/// Threat-hunting page: free-text search over the detection store.
#[derive(Default)]
pub struct HuntingPage {
    pub query: String,
    pub results: FetchSlot<Vec<Detection>>,
}

impl HuntingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn is_searching(&self) -> bool {
        self.results.is_loading()
    }

    /// Run the current query. A blank query is a no-op.
    pub async fn search(&mut self, api: &ApiClient) {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return;
        }
        self.results = FetchSlot::Loading;
        let result = api.list_detections(SEARCH_LIMIT, Some(&query)).await;
        self.results.settle(result, "hunt results");
    }
}
