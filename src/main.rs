use std::time::Duration;

use sentinel::api::ApiClient;
use sentinel::config;
use sentinel::pages::DashboardPage;
use sentinel::realtime::{ChannelOptions, ChannelState, RealtimeChannel};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .init();

    let cfg = config::load_config();
    tracing::info!("Config loaded: api {}, ws {}", cfg.api_base_url, cfg.ws_url);

    let api = match ApiClient::new(&cfg) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot build HTTP client: {e}");
            return;
        }
    };

    let channel = RealtimeChannel::open_with(
        &cfg.ws_url,
        ChannelOptions {
            reconnect: cfg.reconnect_secs.map(Duration::from_secs),
        },
    );

    let mut dashboard = DashboardPage::new(cfg.detection_limit);
    dashboard.load(&api).await;
    print!("{}", dashboard.render(channel.is_connected()));

    // Follow the push feed until the channel closes or we are interrupted.
    let follow = async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut seen = 0u64;
        loop {
            interval.tick().await;

            let total = channel.total_received();
            if total > seen {
                let fresh = (total - seen) as usize;
                // Buffer is newest-first; replay the new tail in arrival order.
                for msg in channel.messages().into_iter().take(fresh).rev() {
                    tracing::info!(
                        "Realtime event: {}",
                        serde_json::to_string(&msg).unwrap_or_default()
                    );
                }
                seen = total;
            }

            if channel.state() == ChannelState::Disconnected && cfg.reconnect_secs.is_none() {
                tracing::warn!("Realtime channel closed");
                break;
            }
        }
    };

    tokio::select! {
        _ = follow => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted, shutting down"),
    }
    channel.shutdown();
}
