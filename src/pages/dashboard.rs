use std::fmt::Write;

use crate::api::ApiClient;
use crate::models::{Detection, DetectionStats, Severity};
use crate::pages::FetchSlot;

/// Severity counter cards derived from the stats slot. A failed or pending
/// stats fetch renders as zeros rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounters {
    pub total: u64,
    pub critical: u64,
    pub high: u64,
    pub medium_low: u64,
}

/// Main overview page: recent detections, severity counters, and the
/// realtime channel's connection status. The two fetches settle
/// independently; only the loading flag is derived from both.
pub struct DashboardPage {
    pub detections: FetchSlot<Vec<Detection>>,
    pub stats: FetchSlot<DetectionStats>,
    limit: usize,
}

impl DashboardPage {
    pub fn new(limit: usize) -> Self {
        DashboardPage {
            detections: FetchSlot::Idle,
            stats: FetchSlot::Idle,
            limit,
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.detections = FetchSlot::Loading;
        self.stats = FetchSlot::Loading;

        let (detections, stats) = tokio::join!(
            api.list_detections(self.limit, None),
            api.stats_summary()
        );
        self.detections.settle(detections, "detections");
        self.stats.settle(stats, "detection stats");
    }

    pub fn is_loading(&self) -> bool {
        self.detections.is_loading() || self.stats.is_loading()
    }

    pub fn counters(&self) -> SeverityCounters {
        match self.stats.value() {
            Some(stats) => SeverityCounters {
                total: stats.total,
                critical: stats.severity_count(Severity::Critical),
                high: stats.severity_count(Severity::High),
                medium_low: stats.severity_count(Severity::Medium)
                    + stats.severity_count(Severity::Low),
            },
            None => SeverityCounters::default(),
        }
    }

    /// Plain-text rendering for the console binary.
    pub fn render(&self, connected: bool) -> String {
        let c = self.counters();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Total alerts: {} | Critical: {} | High: {} | Medium/Low: {}",
            c.total, c.critical, c.high, c.medium_low
        );
        let _ = writeln!(
            out,
            "Backend: {}",
            if connected { "Connected" } else { "Disconnected" }
        );
        let _ = writeln!(out, "Recent alerts:");
        match self.detections.value() {
            Some(list) if !list.is_empty() => {
                for d in list {
                    let _ = writeln!(
                        out,
                        "  [{}] {} (source: {})",
                        d.severity.as_str().to_uppercase(),
                        d.title,
                        d.source
                    );
                }
            }
            _ => {
                let _ = writeln!(
                    out,
                    "  {}",
                    if connected {
                        "No recent alerts. Everything looks quiet."
                    } else {
                        "Connecting to backend..."
                    }
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u64, critical: u64, high: u64, medium: u64, low: u64) -> DetectionStats {
        let mut s = DetectionStats {
            total,
            ..DetectionStats::default()
        };
        s.by_severity.insert("critical".into(), critical);
        s.by_severity.insert("high".into(), high);
        s.by_severity.insert("medium".into(), medium);
        s.by_severity.insert("low".into(), low);
        s
    }

    #[test]
    fn counters_fold_medium_and_low_together() {
        let mut page = DashboardPage::new(20);
        page.stats = FetchSlot::Ready(stats(10, 2, 3, 4, 1));

        let c = page.counters();
        assert_eq!(c.total, 10);
        assert_eq!(c.critical, 2);
        assert_eq!(c.high, 3);
        assert_eq!(c.medium_low, 5);
    }

    #[test]
    fn failed_stats_render_as_zeros() {
        let mut page = DashboardPage::new(20);
        page.stats = FetchSlot::Failed;
        assert_eq!(page.counters(), SeverityCounters::default());
    }

    #[test]
    fn loading_until_both_slots_settle() {
        let mut page = DashboardPage::new(20);
        assert!(!page.is_loading());

        page.detections = FetchSlot::Loading;
        page.stats = FetchSlot::Loading;
        assert!(page.is_loading());

        page.stats = FetchSlot::Failed;
        assert!(page.is_loading());

        page.detections = FetchSlot::Ready(vec![]);
        assert!(!page.is_loading());
    }
}
