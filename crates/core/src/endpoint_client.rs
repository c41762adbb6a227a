use std::pin::Pin;
use std::sync::Arc;

use rag_console_proto::{
    Endpoint, EndpointError, EndpointRequest, EndpointResponse,
};
use tracing::Instrument;

type SendResult = Result<EndpointResponse, Box<dyn EndpointError>>;
type BoxedSendFuture = Pin<Box<dyn Future<Output = SendResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(EndpointRequest) -> BoxedSendFuture + Send + Sync>;

/// A type-erased wrapper around an endpoint, so that controllers don't
/// need a generic parameter.
#[derive(Clone)]
pub struct EndpointClient {
    handler_fn: HandlerFn,
}

impl EndpointClient {
    #[inline]
    pub fn new<E: Endpoint + 'static>(endpoint: E) -> Self {
        let handler_fn: HandlerFn = Arc::new(move |req| -> BoxedSendFuture {
            let route = req.route;
            trace!("sending a request: {:?}", req);
            let fut = endpoint.send(req);
            Box::pin(
                async move {
                    match fut.await {
                        Ok(resp) => {
                            debug!("{route} answered {}", resp.status);
                            Ok(resp)
                        }
                        Err(err) => {
                            error!("{route} failed: {err}");
                            Err(Box::new(err) as Box<dyn EndpointError>)
                        }
                    }
                }
                .instrument(trace_span!("endpoint req", %route)),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the response.
    #[inline]
    pub async fn send(&self, req: EndpointRequest) -> SendResult {
        (self.handler_fn)(req).await
    }
}

#[cfg(test)]
mod tests {
    use rag_console_proto::{ErrorKind, Route};
    use rag_console_test_endpoint::{PresetReply, TestEndpoint};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut endpoint = TestEndpoint::default();
        for _ in 0..3 {
            endpoint.add_reply(PresetReply::ok(json!({ "response": "pong" })));
        }
        let client = EndpointClient::new(endpoint.clone());

        for _ in 0..3 {
            let resp = client
                .send(EndpointRequest::post(
                    Route::Prompt,
                    json!({ "prompt": "ping" }),
                ))
                .await
                .unwrap();
            assert_eq!(resp.body["response"], "pong");
        }
        assert_eq!(endpoint.request_count(), 3);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let client = EndpointClient::new(TestEndpoint::default());
        let err = client
            .send(EndpointRequest::get(Route::Health))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
