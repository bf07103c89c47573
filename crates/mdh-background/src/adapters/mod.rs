//! Adapters layer
//!
//! Reference implementations of the outbound ports, used by the runtime
//! and by tests.

pub mod host;
pub mod prompt;
pub mod renderer;
pub mod store;
pub mod toolbar;

pub use host::ActiveTabState;
pub use prompt::{StaticPromptProvider, DEFAULT_FORGOT_TO_RENDER_PROMPT};
pub use renderer::{PulldownRenderer, GFM_LINE_BREAKS_KEY};
pub use store::{default_preferences, InMemoryOptionsStore, DEFAULT_MAIN_CSS, DEFAULT_SYNTAX_CSS};
pub use toolbar::SharedToggleButton;
