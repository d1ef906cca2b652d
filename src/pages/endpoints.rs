use std::fmt::Write;

use chrono::Utc;

use crate::models::{Endpoint, EndpointStatus};

/// Managed-endpoints inventory. Populated with a fabricated fleet for now;
/// stands in until the backend grows an endpoints API.
#[derive(Default)]
pub struct EndpointsPage {
    pub endpoints: Vec<Endpoint>,
}

impl EndpointsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) {
        self.endpoints = sample_fleet();
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Managed endpoints:");
        for ep in &self.endpoints {
            let _ = writeln!(
                out,
                "  {:<16} {:<15} {:<12} {:?} threats={}",
                ep.hostname, ep.ip_address, ep.os, ep.status, ep.threat_count
            );
        }
        out
    }
}

fn sample_fleet() -> Vec<Endpoint> {
    let now = Utc::now();
    vec![
        Endpoint {
            id: "ep-001".to_string(),
            hostname: "workstation-01".to_string(),
            ip_address: "192.168.1.100".to_string(),
            os: "Windows 11".to_string(),
            status: EndpointStatus::Online,
            last_seen: now,
            threat_count: 3,
        },
        Endpoint {
            id: "ep-002".to_string(),
            hostname: "server-03".to_string(),
            ip_address: "192.168.1.50".to_string(),
            os: "Ubuntu 22.04".to_string(),
            status: EndpointStatus::Online,
            last_seen: now,
            threat_count: 1,
        },
        Endpoint {
            id: "ep-003".to_string(),
            hostname: "laptop-07".to_string(),
            ip_address: "192.168.1.75".to_string(),
            os: "macOS 14".to_string(),
            status: EndpointStatus::Online,
            last_seen: now,
            threat_count: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_fills_the_sample_fleet() {
        let mut page = EndpointsPage::new();
        assert!(page.endpoints.is_empty());
        page.load();
        assert_eq!(page.endpoints.len(), 3);
        assert_eq!(page.endpoints[0].hostname, "workstation-01");
        assert_eq!(page.endpoints[2].threat_count, 0);
    }
}
