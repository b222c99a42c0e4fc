//! The GitHub-styled page shell.
//!
//! Wraps a rendered markdown fragment in a complete HTML document: embedded
//! CSS, print rules, and a small floating action menu. Embed mode (used by
//! editor preview panes) drops the menu so only the document itself shows.

use crate::assets::GITHUB_CSS;

const ACTION_MENU_STYLES: &str = r#"
  .actions-flag {
    position: fixed;
    top: 16px;
    right: 16px;
    z-index: 100;
  }
  .flag-toggle {
    padding: 4px 12px;
    border-radius: 999px;
    border: 1px solid #d0d7de;
    background: #f6f8fa;
    font-size: 12px;
    color: #57606a;
    cursor: pointer;
    transition: all 0.2s;
  }
  .flag-toggle:hover {
    background: #eaeef2;
    border-color: #afb8c1;
  }
  .flag-menu {
    position: absolute;
    top: calc(100% + 8px);
    right: 0;
    background: #fff;
    border-radius: 8px;
    border: 1px solid #d0d7de;
    box-shadow: 0 8px 24px rgba(140,149,159,0.2);
    padding: 4px 0;
    min-width: 160px;
    opacity: 0;
    transform: translateY(-8px);
    pointer-events: none;
    transition: opacity 0.2s, transform 0.2s;
  }
  .flag-menu.open {
    opacity: 1;
    transform: translateY(0);
    pointer-events: auto;
  }
  .flag-menu button,
  .flag-menu a {
    display: block;
    width: 100%;
    padding: 8px 16px;
    border: none;
    background: none;
    text-align: left;
    font-size: 14px;
    color: #24292f;
    cursor: pointer;
    text-decoration: none;
    transition: background 0.1s;
  }
  .flag-menu button:hover,
  .flag-menu a:hover {
    background: #f6f8fa;
  }
"#;

const ACTION_MENU_HTML: &str = r#"
<div class="actions-flag no-print">
  <button class="flag-toggle" onclick="toggleMenu(event)">&#9881; Actions</button>
  <div class="flag-menu" id="flagMenu">
    <a href="/">New</a>
    <button onclick="window.print(); closeMenu()">Print / Save PDF</button>
  </div>
</div>
<script>
  function toggleMenu(e) {
    e.stopPropagation();
    document.getElementById('flagMenu').classList.toggle('open');
  }
  function closeMenu() {
    document.getElementById('flagMenu').classList.remove('open');
  }
  document.addEventListener('click', function(e) {
    if (!e.target.closest('.actions-flag')) {
      closeMenu();
    }
  });
</script>
"#;

/// A complete preview page ready to serialize to HTML.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    body_html: String,
    embed: bool,
}

impl Page {
    /// Wraps an already rendered HTML fragment.
    pub fn new(title: impl Into<String>, body_html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_html: body_html.into(),
            embed: false,
        }
    }

    /// Embed mode strips the action-menu chrome, leaving only the document.
    pub fn embed(mut self, embed: bool) -> Self {
        self.embed = embed;
        self
    }

    /// Serializes the full HTML document.
    pub fn render(&self) -> String {
        let title = escape_html(&self.title);
        let chrome = if self.embed { "" } else { ACTION_MENU_HTML };
        let body_html = &self.body_html;
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="icon" type="image/svg+xml" href="/favicon.svg">
<style>
{GITHUB_CSS}
.markdown-body {{
  box-sizing: border-box;
  min-width: 200px;
  max-width: 980px;
  margin: 0 auto;
  padding: 45px;
}}
@media (max-width: 767px) {{
  .markdown-body {{
    padding: 15px;
  }}
}}
@media print {{
  .markdown-body {{
    padding: 0;
  }}
  .no-print {{
    display: none;
  }}
}}
{ACTION_MENU_STYLES}
</style>
</head>
<body class="markdown-body">
{chrome}
{body_html}
</body>
</html>
"#
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
