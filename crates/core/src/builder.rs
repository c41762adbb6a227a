use std::sync::Arc;

use rag_console_proto::Endpoint;

use crate::chat::ChatController;
use crate::endpoint_client::EndpointClient;
use crate::prompt::PromptController;
use crate::query::QueryController;
use crate::surface::{MemorySurface, Surface};

/// Builder for the console controllers.
///
/// All controllers built from one builder share the endpoint and the
/// surface, but each has its own single-flight guard.
#[derive(Clone)]
pub struct ControllerBuilder {
    client: EndpointClient,
    surface: Arc<dyn Surface>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified endpoint.
    ///
    /// Until [`with_surface`](Self::with_surface) is called, controllers
    /// render into a private [`MemorySurface`].
    #[inline]
    pub fn with_endpoint<E: Endpoint + 'static>(endpoint: E) -> Self {
        Self {
            client: EndpointClient::new(endpoint),
            surface: Arc::new(MemorySurface::default()),
        }
    }

    /// Sets the surface the controllers render into.
    #[inline]
    pub fn with_surface<S: Surface + 'static>(mut self, surface: S) -> Self {
        self.surface = Arc::new(surface);
        self
    }

    /// Builds a chat controller with an empty transcript.
    #[inline]
    pub fn build_chat(&self) -> ChatController {
        ChatController::new(self.client.clone(), Arc::clone(&self.surface))
    }

    /// Builds a single-shot prompt controller.
    #[inline]
    pub fn build_prompt(&self) -> PromptController {
        PromptController::new(self.client.clone(), Arc::clone(&self.surface))
    }

    /// Builds a query controller.
    #[inline]
    pub fn build_query(&self) -> QueryController {
        QueryController::new(self.client.clone(), Arc::clone(&self.surface))
    }
}
