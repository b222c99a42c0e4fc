//! The local markdown preview server.
//!
//! Binds an OS-assigned ephemeral port on the loopback interface, publishes
//! the port through the advertisement file, and serves GitHub-styled
//! renderings of local files, posted text and remote Gist/raw URLs. On
//! interrupt or terminate the advertisement is removed again before exit.
//!
//! # Modules
//!
//! - [`server`] - Bind/advertise/serve startup sequence and graceful shutdown
//! - [`routes`] - The HTTP surface
//! - [`gist`] - Gist web URL to raw URL normalization
//! - [`url`] - Preview URL construction shared with the discovery client

pub mod gist;
pub mod routes;
pub mod server;
pub mod url;

pub use gist::normalize_gist_url;
pub use routes::router;
pub use server::PreviewServer;
pub use url::{preview_url, PreviewTarget};
