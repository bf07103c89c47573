//! # Extension Runtime
//!
//! Owns the channel hub, the background service and the tab monitor, and
//! starts one content script task per opened frame.
//!
//! ## Startup Order
//!
//! 1. Shared state (hub, toolbar button, tab bookkeeping)
//! 2. Action dispatcher and background service
//! 3. Tab activation monitor
//! 4. Frames, opened on demand through [`ExtensionRuntime::open_frame`]

use anyhow::{bail, Result};
use mdh_background::{
    ActionDispatcher, ActiveTabState, BackgroundService, InMemoryOptionsStore, OptionsStore,
    PulldownRenderer, SharedToggleButton, StaticPromptProvider, TabActivationMonitor,
};
use mdh_bridge::{ChannelHub, FrameLink, InboundMessage};
use mdh_content::{ContentScript, DomHost, MarkdownToggle};
use mdh_types::SenderInfo;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::RuntimeConfig;

/// A running content script.
pub struct FrameHandle {
    script: Arc<ContentScript>,
    task: JoinHandle<()>,
}

impl FrameHandle {
    pub fn script(&self) -> &Arc<ContentScript> {
        &self.script
    }

    pub fn origin(&self) -> SenderInfo {
        self.script.origin()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct ExtensionRuntime {
    config: RuntimeConfig,
    hub: ChannelHub,
    inbound: Mutex<Option<mpsc::UnboundedReceiver<InboundMessage>>>,
    service: Arc<BackgroundService>,
    service_task: Mutex<Option<JoinHandle<()>>>,
    monitor: Arc<TabActivationMonitor>,
    host: Arc<ActiveTabState>,
    button: Arc<SharedToggleButton>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver, cloned into every task.
    shutdown_rx: watch::Receiver<bool>,
}

impl ExtensionRuntime {
    /// Runtime with the default in-memory preference store.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_options_store(config, Arc::new(InMemoryOptionsStore::new()))
    }

    pub fn with_options_store(config: RuntimeConfig, options: Arc<dyn OptionsStore>) -> Self {
        info!("Creating Markdown Here runtime");

        let (hub, inbound) = ChannelHub::new();
        let button = Arc::new(SharedToggleButton::new());
        let host = Arc::new(ActiveTabState::new());

        let dispatcher = Arc::new(ActionDispatcher::new(
            Arc::new(PulldownRenderer::new()),
            options,
            Arc::new(StaticPromptProvider::default()),
            button.clone(),
            host.clone(),
        ));
        let service = Arc::new(BackgroundService::new(dispatcher, hub.endpoint()));
        let monitor = Arc::new(TabActivationMonitor::new(
            host.clone(),
            button.clone(),
            hub.endpoint(),
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            hub,
            inbound: Mutex::new(Some(inbound)),
            service,
            service_task: Mutex::new(None),
            monitor,
            host,
            button,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start the background service. Must be called from within a tokio
    /// runtime, once.
    pub fn start(&self) -> Result<()> {
        let Some(inbound) = self.inbound.lock().take() else {
            bail!("runtime already started");
        };

        let service = self.service.clone();
        let shutdown = self.shutdown_rx.clone();
        let task = tokio::spawn(async move {
            service.run(inbound, shutdown).await;
        });
        *self.service_task.lock() = Some(task);

        info!(
            poll_ms = self.config.poll_interval.as_millis() as u64,
            nested_frames = self.config.allow_nested_frames,
            "Runtime started"
        );
        Ok(())
    }

    /// Connect a frame and start its content script.
    pub fn open_frame(
        &self,
        sender: SenderInfo,
        dom: Arc<dyn DomHost>,
        toggle: Arc<dyn MarkdownToggle>,
    ) -> FrameHandle {
        let FrameLink { endpoint, inbound } = self.hub.connect(sender);
        let script = Arc::new(ContentScript::new(
            sender,
            Arc::new(endpoint),
            dom,
            toggle,
            self.config.content_config(),
        ));

        let task = tokio::spawn({
            let script = script.clone();
            let shutdown = self.shutdown_rx.clone();
            async move { script.run(inbound, shutdown).await }
        });

        debug!(sender = %sender, "Frame opened");
        FrameHandle { script, task }
    }

    /// Disconnect a frame and wait for its content script to stop.
    pub async fn close_frame(&self, handle: FrameHandle) {
        let origin = handle.origin();
        self.hub.disconnect(&origin);
        if let Err(e) = handle.task.await {
            error!(sender = %origin, error = %e, "Content script task failed");
        }
    }

    pub fn monitor(&self) -> &Arc<TabActivationMonitor> {
        &self.monitor
    }

    pub fn host(&self) -> &Arc<ActiveTabState> {
        &self.host
    }

    pub fn button(&self) -> &Arc<SharedToggleButton> {
        &self.button
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn frame_count(&self) -> usize {
        self.hub.frame_count()
    }

    /// Signal every task to stop and wait for the background service.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let task = self.service_task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!(error = %e, "Background service task failed");
            }
        }

        info!("Shutdown complete");
    }
}
