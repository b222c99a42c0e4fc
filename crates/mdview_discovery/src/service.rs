//! The ensure-running state machine.
//!
//! Produces a guaranteed-reachable port for a client to use, starting a new
//! server process only when no live one is advertised:
//!
//! 1. Read the advertisement file; probe the advertised port.
//! 2. Reachable: return that port (fast path, no spawn).
//! 3. Otherwise launch the server detached and poll read-then-probe on a
//!    fixed interval until it answers or the attempt budget runs out.
//!
//! Two clients racing through step 3 may both spawn a server; the later
//! advertisement overwrites the earlier one and the losing server just
//! idles. That inefficiency is accepted instead of a lock, this is a
//! single-user local tool.

use crate::advertisement::PortAdvertisement;
use crate::launcher::{LaunchSpec, ProcessLauncher};
use crate::probe::ReachabilityProbe;
use crate::retry::retry_with_fixed_delay;
use crate::DiscoveryError;
use std::path::PathBuf;
use std::time::Duration;

/// Tunables of the discovery protocol.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// How long a single reachability probe may take.
    pub probe_timeout: Duration,
    /// Delay between two polling attempts after a spawn.
    pub poll_interval: Duration,
    /// Polling attempt budget; exhausting it fails the discovery.
    pub max_attempts: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(500),
            max_attempts: 20,
        }
    }
}

/// Discovery of a live preview server, configured with the advertisement
/// path and probe/poll timing. One value per client invocation; the result
/// is not cached across invocations.
#[derive(Debug)]
pub struct DiscoveryService {
    advertisement: PortAdvertisement,
    probe: ReachabilityProbe,
    poll_interval: Duration,
    max_attempts: usize,
}

impl DiscoveryService {
    pub fn new(port_file: impl Into<PathBuf>, settings: DiscoverySettings) -> Self {
        Self {
            advertisement: PortAdvertisement::new(port_file),
            probe: ReachabilityProbe::new(settings.probe_timeout),
            poll_interval: settings.poll_interval,
            max_attempts: settings.max_attempts,
        }
    }

    pub fn advertisement(&self) -> &PortAdvertisement {
        &self.advertisement
    }

    /// Returns the port of a live preview server, launching `server` via
    /// `launcher` if no advertised server answers.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::Launch`] if the spawn itself fails, and
    /// [`DiscoveryError::ServerUnresponsive`] if the freshly started server
    /// never becomes reachable within the attempt budget. Neither is retried
    /// here; the caller decides how to surface the failure.
    pub async fn ensure_running(
        &self,
        launcher: &dyn ProcessLauncher,
        server: &LaunchSpec,
    ) -> Result<u16, DiscoveryError> {
        if let Some(port) = self.check_advertised().await {
            tracing::debug!(port, "Reusing already running preview server");
            return Ok(port);
        }

        let handle = launcher.launch(server).map_err(DiscoveryError::Launch)?;
        tracing::debug!(pid = handle.pid, "No live server found, launched a new one");

        retry_with_fixed_delay(self.max_attempts, self.poll_interval, || {
            self.check_advertised()
        })
        .await
        .ok_or(DiscoveryError::ServerUnresponsive)
    }

    /// One read-then-probe pass: the advertised port, if it actually answers.
    async fn check_advertised(&self) -> Option<u16> {
        let port = self.advertisement.read()?;
        self.probe.is_reachable(port).await.then_some(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::ProcessHandle;
    use crate::probe::tests::{dead_port, spawn_http_stub};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Records whether a launch happened and runs an optional side effect in
    /// place of a real spawn.
    #[derive(Default)]
    struct RecordingLauncher {
        launched: Arc<AtomicBool>,
        side_effect: Option<Box<dyn Fn() + Send + Sync>>,
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&self, _spec: &LaunchSpec) -> std::io::Result<ProcessHandle> {
            self.launched.store(true, Ordering::SeqCst);
            if let Some(side_effect) = &self.side_effect {
                side_effect();
            }
            Ok(ProcessHandle { pid: 0 })
        }
    }

    struct FailingLauncher;

    impl ProcessLauncher for FailingLauncher {
        fn launch(&self, _spec: &LaunchSpec) -> std::io::Result<ProcessHandle> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such program",
            ))
        }
    }

    fn fast_settings() -> DiscoverySettings {
        DiscoverySettings {
            probe_timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(20),
            max_attempts: 10,
        }
    }

    fn server_spec() -> LaunchSpec {
        LaunchSpec::new("mdview").arg("serve").arg("--no-browser")
    }

    #[tokio::test]
    async fn test_fast_path_reuses_live_server_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let port_file = dir.path().join("server.port");

        let port = spawn_http_stub().await;
        std::fs::write(&port_file, port.to_string()).unwrap();

        let service = DiscoveryService::new(&port_file, fast_settings());
        let launcher = RecordingLauncher::default();
        let discovered = service
            .ensure_running(&launcher, &server_spec())
            .await
            .unwrap();

        assert_eq!(discovered, port);
        assert!(!launcher.launched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_absent_advertisement_spawns() {
        let dir = tempfile::tempdir().unwrap();
        let port_file = dir.path().join("server.port");

        // Simulated server: binds a stub and advertises it once "launched".
        let advertised_port = spawn_http_stub().await;
        let port_file_for_launch = port_file.clone();
        let launcher = RecordingLauncher {
            launched: Arc::new(AtomicBool::new(false)),
            side_effect: Some(Box::new(move || {
                std::fs::write(&port_file_for_launch, advertised_port.to_string()).unwrap();
            })),
        };

        let service = DiscoveryService::new(&port_file, fast_settings());
        let discovered = service
            .ensure_running(&launcher, &server_spec())
            .await
            .unwrap();

        assert_eq!(discovered, advertised_port);
        assert!(launcher.launched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_stale_advertisement_spawns_and_finds_new_port() {
        let dir = tempfile::tempdir().unwrap();
        let port_file = dir.path().join("server.port");

        let stale_port = dead_port().await;
        std::fs::write(&port_file, stale_port.to_string()).unwrap();

        let fresh_port = spawn_http_stub().await;
        let port_file_for_launch = port_file.clone();
        let launcher = RecordingLauncher {
            launched: Arc::new(AtomicBool::new(false)),
            side_effect: Some(Box::new(move || {
                std::fs::write(&port_file_for_launch, fresh_port.to_string()).unwrap();
            })),
        };

        let service = DiscoveryService::new(&port_file, fast_settings());
        let discovered = service
            .ensure_running(&launcher, &server_spec())
            .await
            .unwrap();

        assert_eq!(discovered, fresh_port);
        assert_ne!(discovered, stale_port);
        assert!(launcher.launched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_server_that_never_answers_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let port_file = dir.path().join("server.port");

        // "Launch" does nothing: no advertisement ever shows up.
        let service = DiscoveryService::new(
            &port_file,
            DiscoverySettings {
                probe_timeout: Duration::from_millis(50),
                poll_interval: Duration::from_millis(10),
                max_attempts: 3,
            },
        );
        let launcher = RecordingLauncher::default();
        let err = service
            .ensure_running(&launcher, &server_spec())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::ServerUnresponsive));
        assert!(launcher.launched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_spawn_failure_propagates_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let service = DiscoveryService::new(dir.path().join("server.port"), fast_settings());

        let err = service
            .ensure_running(&FailingLauncher, &server_spec())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::Launch(_)));
    }
}
