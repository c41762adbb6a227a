
use std::sync::{Arc, Mutex, MutexGuard};

use rag_console_proto::{
    ChatReply, ChatRequest, Citation, EndpointRequest, Route, Turn,
    error_message,
};
use serde_json::json;

use crate::citation::render_citations;
use crate::endpoint_client::EndpointClient;
use crate::error::SubmitError;
use crate::flight::Flight;
use crate::notice;
use crate::surface::{Pane, Surface};
use crate::transcript::Transcript;

/// A completed chat exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatOutcome {
    /// The assistant reply that was appended to the transcript. `None` if
    /// the backend accepted the prompt without answering it, in which case
    /// only the user turn was kept.
    pub reply: Option<String>,
    /// Citations returned with the reply.
    pub citations: Vec<Citation>,
}

/// Drives a chat session against the backend.
///
/// The controller owns the transcript. Each [`submit`] sends the whole
/// transcript to `/prompt` and appends the reply. A round trip that fails
/// is rolled back, so the transcript never holds a user turn whose request
/// failed.
///
/// Only one submission can be in flight at a time. Overlapping calls are
/// rejected with [`SubmitError::Busy`] without touching anything.
///
/// [`submit`]: ChatController::submit
pub struct ChatController {
    client: EndpointClient,
    surface: Arc<dyn Surface>,
    transcript: Mutex<Transcript>,
    flight: Flight,
}

impl ChatController {
    pub(crate) fn new(
        client: EndpointClient,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            client,
            surface,
            transcript: Default::default(),
            flight: Default::default(),
        }
    }

    /// Submits a user input and waits for the reply.
    ///
    /// # Cancel safety
    ///
    /// Dropping the returned future rolls the pending user turn back and
    /// frees the controller for the next submission.
    pub async fn submit(
        &self,
        input: &str,
    ) -> Result<ChatOutcome, SubmitError> {
        let input = input.trim();
        if input.is_empty() {
            self.surface.set_text(Pane::Result, notice::EMPTY_INPUT);
            return Err(SubmitError::EmptyInput);
        }
        let Some(_flight) = self.flight.try_begin() else {
            debug!("rejected a submission while another is in flight");
            return Err(SubmitError::Busy);
        };

        let (pending, messages) = {
            let mut transcript = self.lock_transcript();
            let pending = PendingTurn {
                transcript: &self.transcript,
                rollback_len: transcript.len(),
            };
            transcript.push(Turn::user(input));
            (pending, transcript.turns().to_vec())
        };
        self.surface.set_busy(Pane::Result, notice::SENDING);

        let request = ChatRequest { messages };
        let body = json!(request);
        let resp = match self
            .client
            .send(EndpointRequest::post(Route::Prompt, body))
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                drop(pending);
                self.surface.set_text(Pane::Result, notice::NETWORK_ERROR);
                return Err(SubmitError::Transport {
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        };

        if !resp.is_success() {
            drop(pending);
            let message = error_message(&resp.body)
                .unwrap_or(notice::REQUEST_FAILED)
                .to_owned();
            warn!("prompt rejected with {}: {message}", resp.status);
            self.surface.set_text(Pane::Result, &message);
            return Err(SubmitError::Application {
                status: resp.status,
                message,
            });
        }

        let ChatReply {
            content: reply,
            citations,
        } = ChatReply::from_body(&resp.body);
        if reply.is_none() {
            warn!("prompt answered {} without a reply", resp.status);
        }

        let rendered = {
            let mut transcript = self.lock_transcript();
            if let Some(reply) = &reply {
                transcript.push(Turn::assistant(reply.clone()));
            }
            pending.commit();
            transcript.render()
        };
        self.surface
            .set_text(Pane::Citations, &render_citations(&citations));
        self.surface.set_text(Pane::Result, &rendered);

        Ok(ChatOutcome { reply, citations })
    }

    /// Renders the transcript into the result pane.
    ///
    /// Rendering has no effect on the transcript, so calling this
    /// repeatedly always shows the same text.
    pub fn render(&self) {
        let rendered = self.lock_transcript().render();
        self.surface.set_text(Pane::Result, &rendered);
    }

    /// Returns a snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock_transcript().clone()
    }

    /// Returns `true` while a submission is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.flight.is_pending()
    }

    fn lock_transcript(&self) -> MutexGuard<'_, Transcript> {
        // The lock is never held across an await point or user code, so a
        // poisoned lock still guards a consistent transcript.
        self.transcript.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A user turn that has been appended but not answered yet. Dropping it
/// removes the turn again.
struct PendingTurn<'a> {
    transcript: &'a Mutex<Transcript>,
    rollback_len: usize,
}

impl PendingTurn<'_> {
    /// Keeps the turn. The caller must already hold the transcript lock,
    /// so this only disarms the rollback.
    #[inline]
    fn commit(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        let mut transcript =
            self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        trace!("rolling back to {} turns", self.rollback_len);
        transcript.truncate(self.rollback_len);
    }
}
