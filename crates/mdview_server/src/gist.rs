//! Gist URL normalization.

use std::borrow::Cow;

/// Rewrites a Gist web URL to the raw content URL it fronts.
///
/// `https://gist.github.com/<user>/<id>` serves an HTML page; the markdown
/// itself lives at `https://gist.githubusercontent.com/<user>/<id>/raw`.
/// URLs that already point at raw content, or anywhere else, pass through
/// untouched.
pub fn normalize_gist_url(url: &str) -> Cow<'_, str> {
    let rest = match url
        .strip_prefix("https://gist.github.com/")
        .or_else(|| url.strip_prefix("http://gist.github.com/"))
    {
        Some(rest) => rest,
        None => return Cow::Borrowed(url),
    };

    let path = rest.split(&['?', '#'][..]).next().unwrap_or("");
    let path = path.trim_end_matches('/');

    if path.ends_with("/raw") || path.contains("/raw/") {
        return Cow::Borrowed(url);
    }

    // A gist path is at least <user>/<id>.
    if path.split('/').filter(|s| !s.is_empty()).count() < 2 {
        return Cow::Borrowed(url);
    }

    Cow::Owned(format!("https://gist.githubusercontent.com/{path}/raw"))
}
