//! # Markdown Here Test Suite
//!
//! Unified test crate for flows that cross the frame/background boundary.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── mod.rs         # Shared fixtures: runtime, pages, clock helpers
//!     ├── e2e_bridge.rs  # Request/response over the channel transport
//!     └── flows.rs       # Toggle button, tab activation, hotkey, toolbar
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mdh-tests
//! cargo test -p mdh-tests integration::flows::
//! ```

pub mod integration;
