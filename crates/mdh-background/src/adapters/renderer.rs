//! pulldown-cmark rendering adapter

use mdh_types::Preferences;
use pulldown_cmark::{html, Event, Options, Parser};

use crate::ports::MarkdownRenderer;

/// Preference that turns single newlines into `<br />`.
pub const GFM_LINE_BREAKS_KEY: &str = "gfm-line-breaks-enabled";

/// CommonMark renderer with the usual GitHub extensions.
#[derive(Debug, Clone, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, md_text: &str, prefs: &Preferences) -> String {
        let hard_breaks = prefs
            .get(GFM_LINE_BREAKS_KEY)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let parser = Parser::new_ext(md_text, Self::options()).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut out = String::with_capacity(md_text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
