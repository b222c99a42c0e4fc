//! Preview URL construction.
//!
//! Shared between the server (auto-opened browser view) and the discovery
//! client (`mdview open`), so both sides address the same endpoints.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};

/// Characters escaped in a query value; the complement of what browsers'
/// encodeURIComponent leaves alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What a preview request points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// A markdown file on the local disk.
    LocalFile(PathBuf),
    /// A remote Gist or raw markdown URL.
    RemoteUrl(String),
    /// The landing page.
    Home,
}

impl PreviewTarget {
    /// Classifies a CLI argument. An existing local path wins; otherwise an
    /// http(s) string is a remote URL. Returns `None` for anything else
    /// (typically a misspelled file name) so the caller can warn and fall
    /// back to the home page.
    pub fn classify(arg: &str) -> Option<Self> {
        let path = Path::new(arg);
        if path.exists() {
            let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            return Some(Self::LocalFile(absolute));
        }
        if arg.starts_with("http://") || arg.starts_with("https://") {
            return Some(Self::RemoteUrl(arg.to_string()));
        }
        None
    }
}

/// Builds the URL a browser or editor pane should load for `target` against
/// a server on `port`. `embed` requests the chrome-less rendering used by
/// editor preview panes; it only applies to local files.
pub fn preview_url(port: u16, target: &PreviewTarget, embed: bool) -> String {
    let base = format!("http://127.0.0.1:{port}");
    match target {
        PreviewTarget::Home => format!("{base}/"),
        PreviewTarget::LocalFile(path) => {
            let file = utf8_percent_encode(&path.to_string_lossy(), QUERY_VALUE).to_string();
            let embed_param = if embed { "&embed=true" } else { "" };
            format!("{base}/local?file={file}{embed_param}")
        }
        PreviewTarget::RemoteUrl(url) => {
            format!("{base}/view?url={}", utf8_percent_encode(url, QUERY_VALUE))
        }
    }
}
