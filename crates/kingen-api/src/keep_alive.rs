//! Optional self-ping loop.
//!
//! Some free-tier hosts spin the service down after idling; pinging a public
//! URL on an interval keeps the instance warm. Disabled unless KEEP_ALIVE_URL
//! is set. Ping failures are logged and never fatal.

use std::time::Duration;

use kingen_core::Config;

pub fn spawn(config: &Config) {
    let Some(url) = config.keep_alive_url().map(|s| s.to_string()) else {
        return;
    };
    let interval_secs = config.keep_alive_interval_secs;

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; skip it so the ping cadence
        // starts one interval after boot.
        interval.tick().await;

        tracing::info!(url = %url, interval_secs, "Keep-alive ping enabled");

        loop {
            interval.tick().await;
            match client.get(&url).send().await {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "Keep-alive ping sent");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Keep-alive ping failed");
                }
            }
        }
    });
}
