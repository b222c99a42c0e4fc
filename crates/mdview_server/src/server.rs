//! Server startup sequence and lifecycle.
//!
//! The ordering matters: bind first (port 0, OS picks), then advertise, then
//! serve. The socket accepts connections as soon as the bind succeeds, so a
//! client probing the advertised port never sees a false negative. The
//! advertisement guard is held for the whole serve loop and dropped on the
//! way out, covering both signal-triggered shutdown and error returns.

use crate::routes::router;
use crate::url::{preview_url, PreviewTarget};
use mdview_discovery::PortAdvertisement;
use tokio::net::TcpListener;

/// A bound, not yet serving, preview server.
#[derive(Debug)]
pub struct PreviewServer {
    listener: TcpListener,
    port: u16,
}

impl PreviewServer {
    /// Binds an OS-assigned ephemeral port on the loopback interface.
    pub async fn bind() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        tracing::info!(port, "Preview server bound");
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Publishes the advertisement and serves until interrupted or
    /// terminated; the advertisement file is removed again on the way out.
    ///
    /// When `open_in_browser` is set, the matching preview URL is opened
    /// after the advertisement is in place. A browser failure is logged,
    /// not fatal; the server keeps running for other clients.
    pub async fn run(
        self,
        advertisement: &PortAdvertisement,
        open_in_browser: Option<PreviewTarget>,
    ) -> std::io::Result<()> {
        let app = router();
        let _guard = advertisement.publish(self.port)?;

        if let Some(target) = open_in_browser {
            let url = preview_url(self.port, &target, false);
            if let Err(err) = webbrowser::open(&url) {
                tracing::warn!(%err, url, "Failed to open the browser");
            }
        }

        tracing::debug!("Listening on {:?}", self.listener);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Resolves when an interrupt (ctrl-c) or terminate signal arrives.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Failed to install interrupt signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install terminate signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received, cleaning up");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bind_picks_ephemeral_port() {
        let server = PreviewServer::bind().await.unwrap();
        assert_ne!(server.port(), 0);
    }

    #[tokio::test]
    async fn test_run_advertises_bound_port_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = PortAdvertisement::new(dir.path().join("server.port"));

        let server = PreviewServer::bind().await.unwrap();
        let port = server.port();

        let advertisement_for_run = advertisement.clone();
        let serving =
            tokio::spawn(async move { server.run(&advertisement_for_run, None).await });

        for _ in 0..100 {
            if advertisement.read().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(advertisement.read(), Some(port));

        // The advertised port answers with the home page.
        let body = reqwest::get(format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("mdview"));

        // Dropping the serve future must remove the advertisement.
        serving.abort();
        let _ = serving.await;
        assert_eq!(advertisement.read(), None);
    }
}
