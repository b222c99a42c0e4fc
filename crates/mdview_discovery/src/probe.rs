//! Timeout-bounded liveness probing.
//!
//! A probe distinguishes a stale advertisement from a live server. It is a
//! pure boolean check: any HTTP response counts as alive regardless of
//! status, while connection errors and timeouts count as dead. It never
//! returns an error and never hangs past its timeout.

use std::time::Duration;

/// Probes whether a local port has a live, responding HTTP server.
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReachabilityProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Issues `GET http://127.0.0.1:<port>/` and reports whether anything
    /// answered within the timeout. A response past the timeout is abandoned.
    pub async fn is_reachable(&self, port: u16) -> bool {
        let url = format!("http://127.0.0.1:{port}/");
        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => {
                tracing::trace!(port, status = %response.status(), "Probe hit a live server");
                true
            }
            Err(err) => {
                tracing::trace!(port, %err, "Probe found no live server");
                false
            }
        }
    }
}

impl Default for ReachabilityProbe {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}
