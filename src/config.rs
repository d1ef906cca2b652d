use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub ws_url: String,
    pub detection_limit: usize,
    /// Opt-in reconnect delay for the realtime channel. Absent means the
    /// channel stays closed once it drops, like the original dashboard.
    #[serde(default)]
    pub reconnect_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            ws_url: "ws://localhost:8000/ws?client_id=dashboard".to_string(),
            detection_limit: 20,
            reconnect_secs: None,
        }
    }
}

pub fn load_config() -> Config {
    let mut cfg = match fs::read_to_string("config.toml") {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse config.toml: {e}, using defaults");
            Config::default()
        }),
        Err(_) => {
            tracing::info!("No config.toml found, using defaults");
            Config::default()
        }
    };

    // Env overrides win over the file.
    if let Ok(url) = env::var("SENTINEL_API_URL") {
        cfg.api_base_url = url;
    }
    if let Ok(url) = env::var("SENTINEL_WS_URL") {
        cfg.ws_url = url;
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base_url, "http://localhost:8000/api/v1");
        assert_eq!(cfg.ws_url, "ws://localhost:8000/ws?client_id=dashboard");
        assert_eq!(cfg.detection_limit, 20);
        assert!(cfg.reconnect_secs.is_none());
    }

    #[test]
    fn reconnect_is_opt_in() {
        let cfg: Config = toml::from_str(
            r#"
            api_base_url = "http://ops.internal/api/v1"
            ws_url = "ws://ops.internal/ws?client_id=dashboard"
            detection_limit = 50
            reconnect_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.reconnect_secs, Some(5));
        assert_eq!(cfg.detection_limit, 50);
    }
}
