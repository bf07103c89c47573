//! Content Script
//!
//! One instance per frame. Owns the frame's bridge, focus tracker, hotkey
//! binder and preference cache; nothing here is process-wide.
//!
//! ```text
//!  focus event ─┐
//!  poll tick ───┼─▶ FocusTracker ──transition──▶ show-toggle-button
//!  tab-activated┘        │
//!                        └─ new document ──▶ focus listener
//!  poll tick ──▶ HotkeyBinder ── new document ──▶ keydown listener
//!  keydown / mdh-toggle ──▶ render flow ──▶ render ──▶ MarkdownToggle
//! ```

use mdh_bridge::{ContextBridge, Routed, Transport};
use mdh_types::{
    MessageKind, Preferences, RenderResponse, Request, SenderInfo, TransportMessage,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::adapters::NoForgotToRenderCheck;
use crate::config::ContentConfig;
use crate::domain::{
    Evaluation, FocusCandidate, FocusTracker, HotkeyBinder, KeyDisposition, KeyEvent,
    ListenerKind,
};
use crate::ports::{DomHost, ForgotToRenderCheck, MarkdownToggle, ToggleStart};

/// Shown when the toggle is invoked on an element that cannot be rendered.
pub const NOT_RENDERABLE_MESSAGE: &str =
    "The selected field is not valid for Markdown rendering. Please use a rich editor.";

#[derive(Debug, Clone, Default)]
enum PrefsCache {
    #[default]
    Empty,
    Requested,
    Loaded(Preferences),
}

#[derive(Debug, Default)]
struct FrameState {
    tracker: FocusTracker,
    hotkey: HotkeyBinder,
    interval_prefs: PrefsCache,
}

pub struct ContentScript {
    origin: SenderInfo,
    bridge: Arc<ContextBridge>,
    dom: Arc<dyn DomHost>,
    toggle: Arc<dyn MarkdownToggle>,
    forgot_to_render: Arc<dyn ForgotToRenderCheck>,
    state: Arc<Mutex<FrameState>>,
    config: ContentConfig,
    permanently_disabled: bool,
}

impl ContentScript {
    pub fn new(
        origin: SenderInfo,
        transport: Arc<dyn Transport>,
        dom: Arc<dyn DomHost>,
        toggle: Arc<dyn MarkdownToggle>,
        config: ContentConfig,
    ) -> Self {
        // Decided once; a nested instance never comes back to life
        let permanently_disabled = !origin.is_top_frame() && !config.allow_nested_frames;
        Self {
            origin,
            bridge: Arc::new(ContextBridge::new(transport, config.bridge.clone())),
            dom,
            toggle,
            forgot_to_render: Arc::new(NoForgotToRenderCheck),
            state: Arc::new(Mutex::new(FrameState::default())),
            config,
            permanently_disabled,
        }
    }

    #[must_use]
    pub fn with_forgot_to_render_check(mut self, check: Arc<dyn ForgotToRenderCheck>) -> Self {
        self.forgot_to_render = check;
        self
    }

    pub fn origin(&self) -> SenderInfo {
        self.origin
    }

    pub fn is_permanently_disabled(&self) -> bool {
        self.permanently_disabled
    }

    pub fn bridge(&self) -> &Arc<ContextBridge> {
        &self.bridge
    }

    pub fn hotkey_active(&self) -> bool {
        self.state.lock().hotkey.is_active()
    }

    /// Install the top document's focus listener and fetch the hotkey
    /// preference. Does nothing in a disabled instance.
    pub fn start(&self) {
        if self.permanently_disabled {
            info!(sender = %self.origin, "Nested frame instance disabled");
            return;
        }

        let top = self.dom.top_document();
        if self.state.lock().tracker.note_focus_listener(top) {
            self.dom.add_event_listener(top, ListenerKind::Focus);
        }

        let state = self.state.clone();
        let origin = self.origin;
        self.bridge.send_with(Request::GetOptions, move |result| {
            match result.map(decode_preferences) {
                Ok(Some(prefs)) => {
                    let binder = HotkeyBinder::from_preferences(&prefs);
                    debug!(sender = %origin, active = binder.is_active(), "Hotkey configured");
                    state.lock().hotkey = binder;
                }
                Ok(None) => warn!(sender = %origin, "No preferences for hotkey setup"),
                Err(e) => warn!(sender = %origin, error = %e, "Hotkey setup failed"),
            }
        });
    }

    /// Handle one message from the privileged side.
    pub fn on_message(&self, message: TransportMessage) {
        match self.bridge.route(message) {
            Routed::Consumed => {}
            Routed::Forward(MessageKind::MdhToggle, _) => self.render_toggle(),
            Routed::Forward(MessageKind::TabActivated, _) => {
                self.on_tab_activated();
            }
            Routed::Forward(MessageKind::TabDeactivated, _) => {
                debug!(sender = %self.origin, "Tab deactivated");
            }
            Routed::Forward(kind, _) => {
                debug!(sender = %self.origin, kind = %kind, "Ignoring message");
            }
            Routed::Unknown(message) => {
                debug!(sender = %self.origin, name = %message.name, "Ignoring unknown message");
            }
        }
    }

    /// This tab now owns the toggle button: forget cached state and report
    /// the current element right away.
    pub fn on_tab_activated(&self) -> Evaluation {
        if self.permanently_disabled {
            return Evaluation::default();
        }
        self.state.lock().tracker.reset();
        self.evaluate(self.dom.focused_element())
    }

    /// Capturing focus listener.
    pub fn on_focus_event(&self, target: FocusCandidate) -> Evaluation {
        if self.permanently_disabled {
            return Evaluation::default();
        }
        self.evaluate(Some(target))
    }

    /// `keydown` listener.
    pub fn on_key_event(&self, event: KeyEvent) -> KeyDisposition {
        if self.permanently_disabled {
            return KeyDisposition::Pass;
        }
        let matched = self.state.lock().hotkey.matches(&event);
        if matched {
            self.render_toggle();
            KeyDisposition::PreventDefault
        } else {
            KeyDisposition::Pass
        }
    }

    /// One poll tick: bind the hotkey, re-check focus, then run the
    /// forgot-to-render check once preferences are cached.
    pub fn interval_check(&self) {
        if self.permanently_disabled {
            return;
        }
        let Some(focused) = self.dom.focused_element() else {
            return;
        };

        let newly_bound = self.state.lock().hotkey.bind(focused.document);
        if newly_bound {
            self.dom.add_event_listener(focused.document, ListenerKind::KeyDown);
        }

        self.evaluate(Some(focused));

        let next = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut state.interval_prefs, PrefsCache::Requested) {
                PrefsCache::Loaded(prefs) => {
                    state.interval_prefs = PrefsCache::Loaded(prefs.clone());
                    Some(prefs)
                }
                PrefsCache::Requested => return,
                PrefsCache::Empty => None,
            }
        };

        match next {
            Some(prefs) => self.forgot_to_render.check(&focused, &prefs),
            None => self.request_interval_prefs(),
        }
    }

    fn request_interval_prefs(&self) {
        let state = self.state.clone();
        self.bridge.send_with(Request::GetOptions, move |result| {
            state.lock().interval_prefs = match result.map(decode_preferences) {
                Ok(Some(prefs)) => PrefsCache::Loaded(prefs),
                // Try again on a later tick
                _ => PrefsCache::Empty,
            };
        });
    }

    /// Render flow for the toolbar button, context menu and hotkey.
    pub fn render_toggle(&self) {
        if self.permanently_disabled {
            return;
        }
        let Some(focused) = self.dom.focused_element() else {
            debug!(sender = %self.origin, "Toggle with nothing focused");
            return;
        };
        if !self.dom.is_renderable(&focused) {
            self.dom.alert(NOT_RENDERABLE_MESSAGE);
            return;
        }

        match self.toggle.begin(&focused) {
            Err(message) => self.dom.alert(&message),
            Ok(ToggleStart::Reverted) => {
                debug!(element = %focused, "Reverted rendered element");
            }
            Ok(ToggleStart::Render { md_text }) => {
                let toggle = self.toggle.clone();
                self.bridge
                    .send_with(Request::Render { md_text }, move |result| match result {
                        Ok(Some(payload)) => match serde_json::from_value::<RenderResponse>(payload) {
                            Ok(rendered) => toggle.complete(&focused, &rendered.html, &rendered.css),
                            Err(e) => warn!(element = %focused, error = %e, "Malformed render response"),
                        },
                        Ok(None) => warn!(element = %focused, "Empty render response"),
                        Err(e) => warn!(element = %focused, error = %e, "Render request failed"),
                    });
            }
        }
    }

    /// Drive the instance: start, then serve messages and poll ticks until
    /// the inbound channel closes or shutdown is signalled.
    pub async fn run(
        &self,
        mut inbound: mpsc::UnboundedReceiver<TransportMessage>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        self.start();
        let sweeper = self.bridge.spawn_expiry_sweeper();

        let period = self.config.poll_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let polling = !self.permanently_disabled;

        loop {
            tokio::select! {
                next = inbound.recv() => {
                    let Some(message) = next else {
                        debug!(sender = %self.origin, "Frame link closed");
                        break;
                    };
                    self.on_message(message);
                }
                _ = ticker.tick(), if polling => self.interval_check(),
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!(sender = %self.origin, "Content script shutting down");
                        break;
                    }
                }
            }
        }

        if let Some(sweeper) = sweeper {
            sweeper.abort();
        }
    }

    fn evaluate(&self, candidate: Option<FocusCandidate>) -> Evaluation {
        let evaluation = {
            let mut state = self.state.lock();
            let dom = &self.dom;
            state.tracker.evaluate(candidate, |c| dom.is_renderable(c))
        };
        if let Some(document) = evaluation.attach_focus_listener {
            self.dom.add_event_listener(document, ListenerKind::Focus);
        }
        if let Some(show) = evaluation.toggle {
            debug!(sender = %self.origin, show = show, "Renderability changed");
            self.bridge.notify(Request::ShowToggleButton { show });
        }
        evaluation
    }
}

fn decode_preferences(payload: Option<Value>) -> Option<Preferences> {
    payload.and_then(|value| serde_json::from_value(value).ok())
}
