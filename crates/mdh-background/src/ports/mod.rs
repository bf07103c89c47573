//! Ports layer

pub mod inbound;
pub mod outbound;

pub use inbound::RequestHandler;
pub use outbound::{BrowserHost, MarkdownRenderer, OptionsStore, PromptProvider, ToolbarButton};
