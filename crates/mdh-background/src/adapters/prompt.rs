//! Fixed prompt fragment

use async_trait::async_trait;

use crate::ports::PromptProvider;

/// Fragment shown when a message looks like unrendered Markdown.
pub const DEFAULT_FORGOT_TO_RENDER_PROMPT: &str = concat!(
    "<div class=\"markdown-here-forgot-to-render\">",
    "<p>It looks like you wrote this message in Markdown but forgot to render it.</p>",
    "<button data-action=\"send\">Send</button>",
    "<button data-action=\"back\">Back to editing</button>",
    "</div>"
);

/// Returns the same fragment every time.
#[derive(Debug, Clone)]
pub struct StaticPromptProvider {
    html: String,
}

impl StaticPromptProvider {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl Default for StaticPromptProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FORGOT_TO_RENDER_PROMPT)
    }
}

#[async_trait]
impl PromptProvider for StaticPromptProvider {
    async fn forgot_to_render_prompt(&self) -> String {
        self.html.clone()
    }
}
