//! # Markdown Here Runtime
//!
//! Starts the background service, opens a demo tab backed by an in-memory
//! page, checks the bridge with a liveness probe and runs until Ctrl+C.

use anyhow::{ensure, Context, Result};
use mdh_bridge::BridgeError;
use mdh_content::{DomHost, MemoryDom};
use mdh_runtime::{ExtensionRuntime, RuntimeConfig};
use mdh_telemetry::{init_logging, LogConfig};
use mdh_types::{Request, SenderInfo, TabId, TEST_REQUEST_GOOD};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const DEMO_TAB: TabId = TabId(1);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LogConfig::from_env())?;

    let config = RuntimeConfig::from_env();
    config.validate().context("invalid runtime configuration")?;

    let runtime = ExtensionRuntime::new(config);
    runtime.start()?;

    // Demo tab: one page with a rich editor, loaded and in the foreground
    let dom = Arc::new(MemoryDom::new());
    if let Some(editor) = dom.add_element(dom.top_document(), true, "# Hello from Markdown Here") {
        dom.focus(editor);
    }
    runtime.host().set_loaded(DEMO_TAB, true);
    let frame = runtime.open_frame(SenderInfo::top(DEMO_TAB), dom.clone(), dom);
    runtime.monitor().on_activate(DEMO_TAB);

    let reply = frame.script().bridge().request(Request::TestRequest).await;
    let reply = match reply {
        Ok(Some(Value::String(reply))) => reply,
        Ok(other) => return Err(BridgeError::UnexpectedPayload(format!("{other:?}")).into()),
        Err(e) => return Err(e).context("liveness probe failed"),
    };
    ensure!(reply == TEST_REQUEST_GOOD, "liveness probe answered {reply:?}");
    info!(sender = %frame.origin(), "Bridge is live");

    info!("Runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
