//! # Markdown Here Background
//!
//! The privileged context. One instance serves every tab and frame.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`)
//!   - `ActionDispatcher`: answers each action of the closed request set
//!   - `TabActivationMonitor`: relays activation, deactivation and toolbar
//!     commands to frames
//!
//! - **Ports Layer** (`ports/`)
//!   - `RequestHandler`: driving port implemented by the dispatcher
//!   - `MarkdownRenderer`, `OptionsStore`, `PromptProvider`,
//!     `ToolbarButton`, `BrowserHost`: driven ports
//!
//! - **Adapters Layer** (`adapters/`): pulldown-cmark renderer, in-memory
//!   preference store, static prompt, atomic toggle button, tab bookkeeping
//!
//! - **Service Layer** (`service`): `BackgroundService` decodes inbound
//!   messages and routes each response back to its sender
//!
//! ## Shared Button Rule
//!
//! The toolbar button is the only process-wide mutable resource. It changes
//! only on `show-toggle-button` from the top frame of the active tab, or
//! when validation finds the tab empty.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{
    ActiveTabState, InMemoryOptionsStore, PulldownRenderer, SharedToggleButton,
    StaticPromptProvider,
};
pub use domain::{ActionDispatcher, TabActivationMonitor};
pub use error::{DispatchError, StoreError};
pub use ports::{
    BrowserHost, MarkdownRenderer, OptionsStore, PromptProvider, RequestHandler, ToolbarButton,
};
pub use service::BackgroundService;
