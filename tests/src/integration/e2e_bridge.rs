//! # End-to-End Bridge Tests
//!
//! A content script's bridge talking to the background service over the
//! channel transport:
//!
//! ```text
//! [ContextBridge] ──request──▶ [ChannelHub] ──▶ [BackgroundService]
//!        ▲                                             │
//!        └──────── request-response (same id) ◀────────┘
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: liveness probe, render with stylesheet preferences
//! 2. **Concurrency**: many requests in flight, answered out of order
//! 3. **Options**: writes visible to later reads and renders
//! 4. **Timeouts**: no background, bounded wait

#[cfg(test)]
mod tests {
    use super::super::fixtures::{open_page, settle, started_runtime};
    use mdh_background::adapters::GFM_LINE_BREAKS_KEY;
    use mdh_bridge::BridgeError;
    use mdh_runtime::{ExtensionRuntime, RuntimeConfig};
    use mdh_types::{
        Preferences, RenderResponse, Request, SenderInfo, TabId, MAIN_CSS_KEY, TEST_REQUEST_GOOD,
    };
    use serde_json::json;
    use std::time::Duration;

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_liveness_probe_round_trip() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");

        let reply = page.frame.script().bridge().request(Request::TestRequest).await;
        assert_eq!(reply.unwrap(), Some(json!(TEST_REQUEST_GOOD)));
        assert_eq!(page.frame.script().bridge().pending_count(), 0);

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_joins_main_and_syntax_css() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");

        let rendered: RenderResponse = page
            .frame
            .script()
            .bridge()
            .request_as(Request::Render {
                md_text: "# Hi".into(),
            })
            .await
            .unwrap();

        assert_eq!(rendered.html, "<h1>Hi</h1>\n");
        assert_eq!(rendered.css, "AB");

        runtime.shutdown().await;
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_requests_get_their_own_answers() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");
        let bridge = page.frame.script().bridge().clone();

        let mut handles = Vec::new();
        for i in 0..16 {
            let bridge = bridge.clone();
            handles.push(tokio::spawn(async move {
                let request = if i % 2 == 0 {
                    Request::TestRequest
                } else {
                    Request::Render {
                        md_text: format!("# Heading {i}"),
                    }
                };
                (i, bridge.request(request).await)
            }));
        }

        for handle in handles {
            let (i, reply) = handle.await.unwrap();
            let payload = reply.unwrap().unwrap();
            if i % 2 == 0 {
                assert_eq!(payload, json!(TEST_REQUEST_GOOD));
            } else {
                let rendered: RenderResponse = serde_json::from_value(payload).unwrap();
                assert_eq!(rendered.html, format!("<h1>Heading {i}</h1>\n"));
            }
        }
        assert_eq!(bridge.pending_count(), 0);

        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_only_see_their_own_responses() {
        let runtime = started_runtime(RuntimeConfig::default());
        let first = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");
        let second = open_page(&runtime, SenderInfo::top(TabId(2)), true, "");

        let (a, b) = tokio::join!(
            first.frame.script().bridge().request(Request::TestRequest),
            second.frame.script().bridge().request(Request::GetForgotToRenderPrompt),
        );
        assert_eq!(a.unwrap(), Some(json!(TEST_REQUEST_GOOD)));
        assert!(b.unwrap().unwrap().get("html").is_some());

        runtime.shutdown().await;
    }

    // =========================================================================
    // OPTIONS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_set_options_affects_later_requests() {
        let runtime = started_runtime(RuntimeConfig::default());
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");
        let bridge = page.frame.script().bridge();

        bridge
            .request(Request::SetOptions {
                options: Preferences::new()
                    .with(GFM_LINE_BREAKS_KEY, true)
                    .with(MAIN_CSS_KEY, "C"),
            })
            .await
            .unwrap();

        let options = bridge.request(Request::GetOptions).await.unwrap().unwrap();
        assert_eq!(options[MAIN_CSS_KEY], json!("C"));

        let rendered: RenderResponse = bridge
            .request_as(Request::Render {
                md_text: "one\ntwo".into(),
            })
            .await
            .unwrap();
        assert_eq!(rendered.html, "<p>one<br />\ntwo</p>\n");
        assert_eq!(rendered.css, "CB");

        bridge
            .request(Request::RemoveOptions {
                array_of_keys: vec![MAIN_CSS_KEY.to_string()],
            })
            .await
            .unwrap();
        let options = bridge.request(Request::GetOptions).await.unwrap().unwrap();
        assert_ne!(options[MAIN_CSS_KEY], json!("C"));

        runtime.shutdown().await;
    }

    // =========================================================================
    // TIMEOUTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_request_times_out_without_background() {
        let config = RuntimeConfig {
            request_timeout: Some(Duration::from_millis(100)),
            ..Default::default()
        };
        // Never started: requests are queued but nobody answers
        let runtime = ExtensionRuntime::new(config);
        let page = open_page(&runtime, SenderInfo::top(TabId(1)), true, "");

        let reply = page.frame.script().bridge().request(Request::TestRequest).await;
        assert!(matches!(
            reply,
            Err(BridgeError::TimedOut { timeout_ms: 100, .. })
        ));

        // The hotkey lookup sent at start expires through the sweeper, which
        // runs every second; the first focus poll is still ahead
        tokio::time::sleep(Duration::from_millis(1400)).await;
        settle().await;
        assert_eq!(page.frame.script().bridge().pending_count(), 0);

        runtime.shutdown().await;
    }
}
