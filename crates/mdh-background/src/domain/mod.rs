//! Domain layer

pub mod dispatcher;
pub mod monitor;

pub use dispatcher::ActionDispatcher;
pub use monitor::TabActivationMonitor;
