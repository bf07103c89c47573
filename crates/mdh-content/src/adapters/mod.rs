//! Adapters layer

pub mod memory_dom;

pub use memory_dom::MemoryDom;

use crate::ports::ForgotToRenderCheck;

/// Forgot-to-render check that never prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForgotToRenderCheck;

impl ForgotToRenderCheck for NoForgotToRenderCheck {}
