//! Action Dispatcher
//!
//! Maps each action of the closed [`Request`] set onto a collaborator call
//! and produces exactly one [`ResponseEnvelope`] for it.
//!
//! | action | collaborator | response |
//! |--------|--------------|----------|
//! | `render` | options store + renderer | `{html, css}` |
//! | `get-options` | options store | preferences |
//! | `set-options` | options store | none |
//! | `remove-options` | options store | none |
//! | `show-toggle-button` | toolbar button (active tab only) | none |
//! | `get-forgot-to-render-prompt` | prompt provider | `{html}` |
//! | `test-request` | none | `"test-request-good"` |

use async_trait::async_trait;
use mdh_types::{
    PromptResponse, RenderResponse, Request, RequestEnvelope, ResponseEnvelope, SenderInfo,
    TEST_REQUEST_GOOD,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::ports::{
    BrowserHost, MarkdownRenderer, OptionsStore, PromptProvider, RequestHandler, ToolbarButton,
};

/// Privileged-side request handler.
pub struct ActionDispatcher {
    renderer: Arc<dyn MarkdownRenderer>,
    options: Arc<dyn OptionsStore>,
    prompts: Arc<dyn PromptProvider>,
    button: Arc<dyn ToolbarButton>,
    host: Arc<dyn BrowserHost>,
}

impl ActionDispatcher {
    pub fn new(
        renderer: Arc<dyn MarkdownRenderer>,
        options: Arc<dyn OptionsStore>,
        prompts: Arc<dyn PromptProvider>,
        button: Arc<dyn ToolbarButton>,
        host: Arc<dyn BrowserHost>,
    ) -> Self {
        Self {
            renderer,
            options,
            prompts,
            button,
            host,
        }
    }

    /// Handle one request from `sender`.
    pub async fn dispatch(&self, sender: SenderInfo, envelope: RequestEnvelope) -> ResponseEnvelope {
        let RequestEnvelope {
            request,
            request_id,
        } = envelope;
        let action = request.action_name();
        debug!(request_id = %request_id, action = action, sender = %sender, "Dispatching request");

        let response = match request {
            Request::Render { md_text } => self.render(&md_text).await,
            Request::GetOptions => match self.options.get().await {
                Ok(prefs) => encode(action, &prefs),
                Err(e) => {
                    warn!(request_id = %request_id, error = %e, "Failed to read preferences");
                    None
                }
            },
            Request::SetOptions { options } => {
                if let Err(e) = self.options.set(options).await {
                    warn!(request_id = %request_id, error = %e, "Failed to store preferences");
                }
                None
            }
            Request::RemoveOptions { array_of_keys } => {
                if let Err(e) = self.options.remove(&array_of_keys).await {
                    warn!(request_id = %request_id, error = %e, "Failed to remove preferences");
                }
                None
            }
            Request::ShowToggleButton { show } => {
                self.show_toggle_button(sender, show);
                None
            }
            Request::GetForgotToRenderPrompt => {
                let html = self.prompts.forgot_to_render_prompt().await;
                encode(action, &PromptResponse { html })
            }
            Request::TestRequest => Some(Value::String(TEST_REQUEST_GOOD.to_string())),
        };

        ResponseEnvelope::new(request_id, response)
    }

    async fn render(&self, md_text: &str) -> Option<Value> {
        let prefs = match self.options.get().await {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(error = %e, "Failed to read preferences for render");
                return None;
            }
        };
        let html = self.renderer.render(md_text, &prefs);
        let css = format!("{}{}", prefs.main_css(), prefs.syntax_css());
        encode("render", &RenderResponse { html, css })
    }

    /// Only the top frame of the active tab may change the shared button.
    fn show_toggle_button(&self, sender: SenderInfo, show: bool) {
        let active = self.host.active_tab();
        if active == Some(sender.tab) && sender.is_top_frame() {
            self.button.set_enabled(show);
        } else {
            debug!(
                sender = %sender,
                active_tab = ?active,
                show = show,
                "Ignoring toggle button request from inactive frame"
            );
        }
    }
}

#[async_trait]
impl RequestHandler for ActionDispatcher {
    async fn dispatch(&self, sender: SenderInfo, envelope: RequestEnvelope) -> ResponseEnvelope {
        ActionDispatcher::dispatch(self, sender, envelope).await
    }
}

fn encode<T: Serialize>(action: &'static str, payload: &T) -> Option<Value> {
    match serde_json::to_value(payload) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(action = action, error = %e, "Failed to encode response payload");
            None
        }
    }
}
