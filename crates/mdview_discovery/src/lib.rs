//! Discovery and lifecycle protocol for the local preview server.
//!
//! The preview server binds an OS-assigned ephemeral port and publishes it in
//! a well-known advertisement file. A client locates a live server by reading
//! that file and probing the advertised port, starting a fresh server process
//! only when the probe fails. The advertisement is only ever a hint: a server
//! killed without cleanup leaves a stale file behind, so readers always probe
//! before trusting it.
//!
//! # Modules
//!
//! - [`advertisement`] - The port advertisement file protocol
//! - [`probe`] - Timeout-bounded reachability probing
//! - [`retry`] - Bounded fixed-delay retry combinator
//! - [`launcher`] - Detached server process launching
//! - [`service`] - The ensure-running state machine tying it all together

pub mod advertisement;
pub mod launcher;
pub mod probe;
pub mod retry;
pub mod service;

use thiserror::Error;

pub use advertisement::{AdvertisementGuard, PortAdvertisement};
pub use launcher::{DetachedLauncher, LaunchSpec, ProcessHandle, ProcessLauncher};
pub use probe::ReachabilityProbe;
pub use retry::retry_with_fixed_delay;
pub use service::{DiscoveryService, DiscoverySettings};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to launch the preview server process: {0}")]
    Launch(#[source] std::io::Error),
    #[error("preview server failed to start or respond")]
    ServerUnresponsive,
}
