//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

/// Options for rendering markdown to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown tables
    pub enable_tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub enable_strikethrough: bool,
    /// Enable task list items ([x] and [ ])
    pub enable_tasklists: bool,
    /// Enable footnote references
    pub enable_footnotes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_tasklists: true,
            enable_footnotes: true,
        }
    }
}

impl RenderOptions {
    fn to_pulldown_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.enable_footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

/// Render markdown content to an HTML fragment.
///
/// Deterministic and infallible: pulldown-cmark treats every input as
/// markdown, there is no malformed-input failure path.
pub fn to_html(markdown_content: &str, options: &RenderOptions) -> String {
    let parser = Parser::new_ext(markdown_content, options.to_pulldown_options());

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
