mod chat;
mod dashboard;
mod endpoints;
mod hunting;
mod settings;
mod timeline;

pub use chat::ChatPage;
pub use dashboard::{DashboardPage, SeverityCounters};
pub use endpoints::EndpointsPage;
pub use hunting::{HuntingPage, QUICK_QUERIES};
pub use settings::{Settings, SettingsPage};
pub use timeline::TimelinePage;

/// Outcome slot for one fetch. Pages keep one slot per request so a partial
/// failure never masks the other request's result; failures are logged at
/// the point of settlement and absorbed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchSlot<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed,
}

impl<T> FetchSlot<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchSlot::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchSlot::Ready(v) => Some(v),
            _ => None,
        }
    }

    fn settle(&mut self, result: Result<T, reqwest::Error>, what: &str) {
        *self = match result {
            Ok(v) => FetchSlot::Ready(v),
            Err(e) => {
                tracing::error!("Failed to load {what}: {e}");
                FetchSlot::Failed
            }
        };
    }
}
