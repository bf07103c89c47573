//! # Integration Test Flows
//!
//! Toggle button state across tabs and frames, and the render flow as
//! triggered from the toolbar and from the hotkey.
//!
//! ## Flows Tested:
//!
//! 1. **Focus → button**: only the active tab's top frame moves the button
//! 2. **Tab switching**: a newly active tab re-reports its state at once
//! 3. **Toolbar command**: render, then revert, in the active tab
//! 4. **Hotkey**: bound lazily per document by the poll

#[cfg(test)]
mod tests {
    use super::super::fixtures::{next_poll, open_page, settle, started_runtime};
    use mdh_background::ToolbarButton;
    use mdh_content::{DomHost, KeyDisposition, KeyEvent, ListenerKind, NOT_RENDERABLE_MESSAGE};
    use mdh_runtime::RuntimeConfig;
    use mdh_types::{FrameId, SenderInfo, TabId};

    // =========================================================================
    // FOCUS → BUTTON
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_active_tab_enables_button() {
        let runtime = started_runtime(RuntimeConfig::default());
        let _page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        assert!(!runtime.button().is_enabled());

        runtime.monitor().on_activate(TabId(1));
        settle().await;
        assert!(runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_change_disables_button_on_next_poll() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        runtime.monitor().on_activate(TabId(1));
        settle().await;
        assert!(runtime.button().is_enabled());

        let plain = page
            .dom
            .add_element(page.dom.top_document(), false, "")
            .unwrap();
        page.dom.focus(plain);
        next_poll().await;
        assert!(!runtime.button().is_enabled());

        page.dom.focus(page.editor);
        next_poll().await;
        assert!(runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_tab_cannot_enable_button() {
        let runtime = started_runtime(RuntimeConfig::default());
        let _active = open_page(&runtime, SenderInfo::top(TabId(1)), false, "");
        let _background = open_page(&runtime, SenderInfo::top(TabId(2)), true, "# Hi");
        runtime.monitor().on_activate(TabId(1));

        next_poll().await;
        next_poll().await;
        assert!(!runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nested_frame_cannot_enable_button() {
        let config = RuntimeConfig {
            allow_nested_frames: true,
            ..Default::default()
        };
        let runtime = started_runtime(config);
        let _top = open_page(&runtime, SenderInfo::top(TabId(1)), false, "");
        let nested = open_page(&runtime, SenderInfo::new(TabId(1), FrameId(1)), true, "# Hi");
        assert!(!nested.frame.script().is_permanently_disabled());
        runtime.monitor().on_activate(TabId(1));

        next_poll().await;
        assert!(!runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nested_frame_disabled_by_default() {
        let runtime = started_runtime(RuntimeConfig::default());
        let nested = open_page(&runtime, SenderInfo::new(TabId(1), FrameId(3)), true, "# Hi");
        runtime.monitor().on_activate(TabId(1));

        next_poll().await;
        assert!(nested.frame.script().is_permanently_disabled());
        assert!(nested.dom.listeners().is_empty());
        assert!(!runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    // =========================================================================
    // TAB SWITCHING
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_switching_tabs_follows_each_tabs_focus() {
        let runtime = started_runtime(RuntimeConfig::default());
        let _editor_tab = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        let _plain_tab = open_page(&runtime, SenderInfo::top(TabId(2)), false, "");

        runtime.monitor().on_activate(TabId(1));
        settle().await;
        assert!(runtime.button().is_enabled());

        runtime.monitor().on_deactivate(TabId(1));
        runtime.monitor().on_activate(TabId(2));
        settle().await;
        assert!(!runtime.button().is_enabled());

        // Same element as before in tab 1; activation must still report it
        runtime.monitor().on_deactivate(TabId(2));
        runtime.monitor().on_activate(TabId(1));
        settle().await;
        assert!(runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_validate_disables_button_for_empty_tab() {
        let runtime = started_runtime(RuntimeConfig::default());
        let _page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        runtime.monitor().on_activate(TabId(1));
        settle().await;
        assert!(runtime.button().is_enabled());

        assert!(runtime.monitor().on_validate(TabId(1)));
        assert!(runtime.button().is_enabled());

        assert!(!runtime.monitor().on_validate(TabId(5)));
        assert!(!runtime.button().is_enabled());

        runtime.shutdown().await;
    }

    // =========================================================================
    // TOOLBAR COMMAND
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_toolbar_command_renders_then_reverts() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        runtime.monitor().on_activate(TabId(1));
        settle().await;

        assert_eq!(runtime.monitor().on_toolbar_command(None), 1);
        settle().await;
        assert_eq!(page.dom.content(page.editor.element).as_deref(), Some("<h1>Hi</h1>\n"));
        assert_eq!(page.dom.last_css(page.editor.element).as_deref(), Some("AB"));

        runtime.monitor().on_toolbar_command(Some(TabId(1)));
        settle().await;
        assert_eq!(page.dom.content(page.editor.element).as_deref(), Some("# Hi"));
        assert!(!page.dom.is_rendered(page.editor.element));

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toolbar_command_on_plain_field_alerts() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), false, "text");
        runtime.monitor().on_activate(TabId(1));

        runtime.monitor().on_toolbar_command(None);
        settle().await;
        assert_eq!(page.dom.alerts(), vec![NOT_RENDERABLE_MESSAGE.to_string()]);
        assert_eq!(page.dom.content(page.editor.element).as_deref(), Some("text"));

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toolbar_command_without_active_tab_goes_nowhere() {
        let runtime = started_runtime(RuntimeConfig::default());
        let _page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        assert_eq!(runtime.monitor().on_toolbar_command(None), 0);
        runtime.shutdown().await;
    }

    // =========================================================================
    // HOTKEY
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_hotkey_renders_focused_field() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "# Hi");
        let top = page.dom.top_document();
        let script = page.frame.script();

        next_poll().await;
        assert!(script.hotkey_active());
        assert_eq!(page.dom.listener_count(top, ListenerKind::KeyDown), 1);

        // Default combination is Ctrl+Alt+M
        assert_eq!(
            script.on_key_event(KeyEvent::key(top, 'n').with_ctrl().with_alt()),
            KeyDisposition::Pass
        );
        assert_eq!(
            script.on_key_event(KeyEvent::key(top, 'm').with_ctrl().with_alt()),
            KeyDisposition::PreventDefault
        );
        settle().await;
        assert_eq!(page.dom.content(page.editor.element).as_deref(), Some("<h1>Hi</h1>\n"));

        next_poll().await;
        assert_eq!(page.dom.listener_count(top, ListenerKind::KeyDown), 1);

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hotkey_binds_nested_document_when_focused() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), false, "");
        let top = page.dom.top_document();
        let nested = page.dom.add_frame(top).unwrap();
        let inner = page.dom.add_element(nested, true, "*draft*").unwrap();

        next_poll().await;
        assert_eq!(page.dom.listener_count(nested, ListenerKind::KeyDown), 0);

        page.dom.focus(inner);
        next_poll().await;
        assert_eq!(page.dom.listener_count(nested, ListenerKind::KeyDown), 1);
        assert_eq!(page.dom.listener_count(nested, ListenerKind::Focus), 1);

        let script = page.frame.script();
        assert_eq!(
            script.on_key_event(KeyEvent::key(nested, 'm').with_ctrl().with_alt()),
            KeyDisposition::PreventDefault
        );
        settle().await;
        assert_eq!(
            page.dom.content(inner.element).as_deref(),
            Some("<p><em>draft</em></p>\n")
        );

        runtime.shutdown().await;
    }
}
