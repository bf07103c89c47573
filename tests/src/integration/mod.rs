//! # Integration Fixtures
//!
//! Every test runs on a paused tokio clock, so poll ticks happen exactly
//! when a test sleeps past them and all message traffic settles first.

#[cfg(test)]
pub(crate) mod fixtures {
    use mdh_background::InMemoryOptionsStore;
    use mdh_content::{DomHost, FocusCandidate, MemoryDom, DEFAULT_POLL_INTERVAL};
    use mdh_runtime::{ExtensionRuntime, FrameHandle, RuntimeConfig};
    use mdh_types::{Preferences, SenderInfo, MAIN_CSS_KEY, SYNTAX_CSS_KEY};
    use std::sync::Arc;
    use std::time::Duration;

    /// A frame of a tab with one element, already focused.
    pub(crate) struct Page {
        pub dom: Arc<MemoryDom>,
        pub frame: FrameHandle,
        pub editor: FocusCandidate,
    }

    /// Preferences with `main-css` "A" and `syntax-css` "B".
    pub(crate) fn styled_store() -> Arc<InMemoryOptionsStore> {
        Arc::new(InMemoryOptionsStore::new().with_overlay(
            Preferences::new()
                .with(MAIN_CSS_KEY, "A")
                .with(SYNTAX_CSS_KEY, "B"),
        ))
    }

    pub(crate) fn started_runtime(config: RuntimeConfig) -> ExtensionRuntime {
        let runtime = ExtensionRuntime::with_options_store(config, styled_store());
        runtime.start().unwrap();
        runtime
    }

    pub(crate) fn open_page(
        runtime: &ExtensionRuntime,
        sender: SenderInfo,
        renderable: bool,
        content: &str,
    ) -> Page {
        let dom = Arc::new(MemoryDom::new());
        let editor = dom
            .add_element(dom.top_document(), renderable, content)
            .unwrap();
        dom.focus(editor);
        runtime.host().set_loaded(sender.tab, true);
        let frame = runtime.open_frame(sender, dom.clone(), dom.clone());
        Page { dom, frame, editor }
    }

    /// Let queued messages and spawned handlers run to completion.
    pub(crate) async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    /// Advance past the next focus poll.
    pub(crate) async fn next_poll() {
        tokio::time::sleep(DEFAULT_POLL_INTERVAL + Duration::from_millis(10)).await;
    }
}

mod e2e_bridge;
mod flows;
