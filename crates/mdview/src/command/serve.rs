use anyhow::Result;
use clap::Parser;
use mdview_config::Config;
use mdview_discovery::PortAdvertisement;
use mdview_server::{PreviewServer, PreviewTarget};

/// Runs the preview server: bind an ephemeral port, advertise it, serve
/// until interrupted.
#[derive(Parser, Debug)]
pub struct Serve {
    /// Markdown file or URL to open once the server is up.
    pub target: Option<String>,

    /// Do not open a browser after startup.
    #[clap(long)]
    pub no_browser: bool,
}

impl Serve {
    pub async fn run(self, config: &Config) -> Result<()> {
        let server = PreviewServer::bind().await?;
        let advertisement = PortAdvertisement::new(config.discovery.port_file_path());

        println!("mdview running at http://127.0.0.1:{}", server.port());

        let no_browser = self.no_browser
            || std::env::var("MDVIEW_NO_BROWSER")
                .map(|value| value == "1")
                .unwrap_or(false);

        let open_in_browser = if no_browser {
            None
        } else {
            Some(match self.target.as_deref() {
                Some(arg) => PreviewTarget::classify(arg).unwrap_or_else(|| {
                    eprintln!("Error: File not found: {arg}");
                    PreviewTarget::Home
                }),
                None => PreviewTarget::Home,
            })
        };

        server.run(&advertisement, open_in_browser).await?;

        Ok(())
    }
}
