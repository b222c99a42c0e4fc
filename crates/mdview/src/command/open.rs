use anyhow::{Context, Result};
use clap::Parser;
use mdview_config::Config;
use mdview_discovery::{DetachedLauncher, DiscoveryService, DiscoverySettings, LaunchSpec};
use mdview_server::{preview_url, PreviewTarget};
use std::time::Duration;

/// The discovery client: reuse a live preview server when one is advertised,
/// start a fresh one otherwise, then open the preview.
#[derive(Parser, Debug)]
pub struct Open {
    /// Markdown file or URL to preview; defaults to the home page.
    pub target: Option<String>,

    /// Print the preview URL to stdout instead of opening a browser.
    ///
    /// Intended for editor integrations that embed the URL themselves.
    #[clap(long)]
    pub print_url: bool,

    /// Request the chrome-less rendering used by editor preview panes.
    #[clap(long)]
    pub embed: bool,
}

impl Open {
    pub async fn run(self, config: &Config) -> Result<()> {
        let discovery = &config.discovery;
        let service = DiscoveryService::new(
            discovery.port_file_path(),
            DiscoverySettings {
                probe_timeout: Duration::from_millis(discovery.probe_timeout_ms),
                poll_interval: Duration::from_millis(discovery.poll_interval_ms),
                max_attempts: discovery.max_attempts,
            },
        );

        let current_exe = std::env::current_exe().context("cannot locate the mdview binary")?;
        let server = LaunchSpec::new(current_exe).arg("serve").arg("--no-browser");

        let port = service.ensure_running(&DetachedLauncher, &server).await?;

        let target = match self.target.as_deref() {
            Some(arg) => {
                PreviewTarget::classify(arg).with_context(|| format!("File not found: {arg}"))?
            }
            None => PreviewTarget::Home,
        };

        let url = preview_url(port, &target, self.embed);

        if self.print_url {
            println!("{url}");
        } else {
            webbrowser::open(&url).context("failed to open the browser")?;
        }

        Ok(())
    }
}
