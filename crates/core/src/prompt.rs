use std::sync::Arc;

use rag_console_proto::{
    EndpointRequest, PromptReply, PromptRequest, Route, error_message,
};
use serde_json::json;

use crate::endpoint_client::EndpointClient;
use crate::error::SubmitError;
use crate::flight::Flight;
use crate::notice;
use crate::surface::{Pane, Surface};

/// Sends one prompt at a time, without any history.
pub struct PromptController {
    client: EndpointClient,
    surface: Arc<dyn Surface>,
    flight: Flight,
}

impl PromptController {
    pub(crate) fn new(
        client: EndpointClient,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            client,
            surface,
            flight: Default::default(),
        }
    }

    /// Submits a prompt and renders the reply into the result pane.
    pub async fn submit(
        &self,
        input: &str,
    ) -> Result<PromptReply, SubmitError> {
        let prompt = input.trim();
        if prompt.is_empty() {
            self.surface.set_text(Pane::Result, notice::EMPTY_INPUT);
            return Err(SubmitError::EmptyInput);
        }
        let Some(_flight) = self.flight.try_begin() else {
            return Err(SubmitError::Busy);
        };

        self.surface.set_busy(Pane::Result, notice::SENDING);
        let request = PromptRequest {
            prompt: prompt.to_owned(),
        };
        let body = json!(request);
        let resp = match self
            .client
            .send(EndpointRequest::post(Route::Prompt, body))
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                self.surface.set_text(Pane::Result, notice::NETWORK_ERROR);
                return Err(SubmitError::Transport {
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        };

        if !resp.is_success() {
            let message = error_message(&resp.body)
                .unwrap_or(notice::REQUEST_FAILED)
                .to_owned();
            self.surface.set_text(Pane::Result, &message);
            return Err(SubmitError::Application {
                status: resp.status,
                message,
            });
        }

        let reply = PromptReply::from_body(&resp.body);
        self.surface
            .set_text(Pane::Result, &render_prompt_reply(&reply));
        Ok(reply)
    }

    /// Returns `true` while a submission is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.flight.is_pending()
    }
}

/// Renders a single-shot reply as three labelled lines.
pub fn render_prompt_reply(reply: &PromptReply) -> String {
    format!(
        "Prompt: {}\nModel: {}\nResponse: {}",
        reply.prompt, reply.model, reply.response
    )
}
