use std::sync::Arc;
use std::time::Duration;

use rag_console_core::proto::ServiceStatus;
use rag_console_core::{
    ChatController, ControllerBuilder, PromptController, QueryController,
    SubmitError, Surface, probe_health,
};
use rag_console_http::{HttpEndpoint, HttpEndpointConfigBuilder};

/// A console builder.
///
/// See [`Console`].
pub struct ConsoleBuilder {
    config: HttpEndpointConfigBuilder,
    surface: Option<Arc<dyn Surface>>,
}

impl ConsoleBuilder {
    /// Creates a console builder for the backend at `base_url`.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            config: HttpEndpointConfigBuilder::with_base_url(base_url),
            surface: None,
        }
    }

    /// Sets a per-request timeout.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the surface every controller renders into.
    #[inline]
    pub fn with_surface<S: Surface + 'static>(mut self, surface: S) -> Self {
        self.surface = Some(Arc::new(surface));
        self
    }

    /// Builds a new console.
    pub fn build(self) -> Console {
        let endpoint = HttpEndpoint::new(self.config.build());
        debug!("console for {}", endpoint.config().base_url());

        let mut controllers =
            ControllerBuilder::with_endpoint(endpoint.clone());
        if let Some(surface) = self.surface {
            controllers = controllers.with_surface(surface);
        }
        Console {
            endpoint,
            controllers,
        }
    }
}

/// A console, like a page that has a chat box, a prompt box and a search
/// form, all talking to the same backend.
///
/// The console is basically a factory for the controllers in
/// [`rag_console_core`], wired to an [`HttpEndpoint`].
pub struct Console {
    endpoint: HttpEndpoint,
    controllers: ControllerBuilder,
}

impl Console {
    /// Returns the base URL of the backend.
    #[inline]
    pub fn base_url(&self) -> &str {
        self.endpoint.config().base_url()
    }

    /// Starts a chat session with an empty transcript.
    #[inline]
    pub fn chat(&self) -> ChatController {
        self.controllers.build_chat()
    }

    /// Creates a single-shot prompt controller.
    #[inline]
    pub fn prompt(&self) -> PromptController {
        self.controllers.build_prompt()
    }

    /// Creates a query controller.
    #[inline]
    pub fn query(&self) -> QueryController {
        self.controllers.build_query()
    }

    /// Asks the backend how it is doing.
    #[inline]
    pub async fn health(&self) -> Result<ServiceStatus, SubmitError> {
        probe_health(&self.endpoint).await
    }
}
