//! # Markdown Here Runtime Library
//!
//! Wiring for the privileged context and its frames over the in-process
//! channel transport. The `mdh-runtime` binary is a thin driver around
//! [`ExtensionRuntime`].
//!
//! ```text
//!  open_frame ─▶ ContentScript ──FrameEndpoint──▶ ChannelHub ─▶ BackgroundService
//!                     ▲                                              │
//!                     └──────────── PrivilegedEndpoint ◀─────────────┘
//!                                          ▲
//!                              TabActivationMonitor
//! ```

pub mod config;
pub mod runtime;

pub use config::{ConfigError, RuntimeConfig};
pub use runtime::{ExtensionRuntime, FrameHandle};
