//! Embedded web assets for the preview server.

/// The home page: URL form plus a drag-and-drop zone posting to `/render`.
pub const HOME_PAGE: &str = include_str!("../assets/home.html");

/// GitHub-flavored markdown CSS applied to every rendered page.
pub const GITHUB_CSS: &str = include_str!("../assets/github.css");

/// The favicon served at `/favicon.svg`.
pub const FAVICON_SVG: &str = include_str!("../assets/favicon.svg");
