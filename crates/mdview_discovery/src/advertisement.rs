//! The port advertisement file protocol.
//!
//! The server writes its bound port as plain decimal text to a fixed path
//! right after binding; clients read the file to learn where to probe. The
//! file is deleted again on graceful shutdown via [`AdvertisementGuard`].
//! An absent file means "no known server", never an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Handle to the well-known advertisement file.
#[derive(Debug, Clone)]
pub struct PortAdvertisement {
    path: PathBuf,
}

impl PortAdvertisement {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the advertised port, if any.
    ///
    /// Unreadable or unparsable content is logged and treated the same as a
    /// missing file: there is no known server, discovery moves on to spawning
    /// one.
    pub fn read(&self) -> Option<u16> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::debug!(path = ?self.path, %err, "Failed to read port advertisement");
                return None;
            }
        };

        match contents.trim().parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::debug!(
                    path = ?self.path,
                    content = %contents.trim(),
                    "Ignoring unparsable port advertisement"
                );
                None
            }
        }
    }

    /// Publishes `port`, overwriting any prior advertisement.
    ///
    /// Must only be called once the socket behind `port` is accepting
    /// connections, otherwise a concurrent client probe hits a false
    /// negative. The returned guard removes the file again when dropped.
    pub fn publish(&self, port: u16) -> std::io::Result<AdvertisementGuard> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, port.to_string())?;
        tracing::debug!(port, path = ?self.path, "Published port advertisement");
        Ok(AdvertisementGuard {
            path: self.path.clone(),
        })
    }
}

/// Scoped cleanup for a published advertisement: dropping the guard deletes
/// the file. Covers every graceful exit path; an abrupt kill leaves a stale
/// file behind, which readers tolerate by probing.
#[derive(Debug)]
pub struct AdvertisementGuard {
    path: PathBuf,
}

impl Drop for AdvertisementGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Removed port advertisement");
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = ?self.path, %err, "Failed to remove port advertisement");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advertisement_in(dir: &tempfile::TempDir) -> PortAdvertisement {
        PortAdvertisement::new(dir.path().join("preview-server.port"))
    }

    #[test]
    fn test_absent_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(advertisement_in(&dir).read(), None);
    }

    #[test]
    fn test_publish_writes_decimal_text() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = advertisement_in(&dir);

        let _guard = advertisement.publish(34567).unwrap();
        let raw = std::fs::read_to_string(advertisement.path()).unwrap();
        assert_eq!(raw, "34567");
        assert_eq!(advertisement.read(), Some(34567));
    }

    #[test]
    fn test_publish_overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = advertisement_in(&dir);

        let guard = advertisement.publish(1024).unwrap();
        std::mem::forget(guard);
        let _guard = advertisement.publish(2048).unwrap();
        assert_eq!(advertisement.read(), Some(2048));
    }

    #[test]
    fn test_publish_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = PortAdvertisement::new(dir.path().join("nested/cache/server.port"));
        let _guard = advertisement.publish(9999).unwrap();
        assert_eq!(advertisement.read(), Some(9999));
    }

    #[test]
    fn test_guard_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = advertisement_in(&dir);

        let guard = advertisement.publish(4242).unwrap();
        assert!(advertisement.path().exists());
        drop(guard);
        assert!(!advertisement.path().exists());
        assert_eq!(advertisement.read(), None);
    }

    #[test]
    fn test_corrupt_content_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = advertisement_in(&dir);

        std::fs::write(advertisement.path(), "not a port").unwrap();
        assert_eq!(advertisement.read(), None);

        // Out of u16 range.
        std::fs::write(advertisement.path(), "70000").unwrap();
        assert_eq!(advertisement.read(), None);
    }

    #[test]
    fn test_read_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let advertisement = advertisement_in(&dir);

        std::fs::write(advertisement.path(), "8080\n").unwrap();
        assert_eq!(advertisement.read(), Some(8080));
    }
}
