//! Ports layer

pub mod outbound;

pub use outbound::{DomHost, ForgotToRenderCheck, MarkdownToggle, ToggleStart};
