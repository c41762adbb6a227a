use std::sync::Arc;

use rag_console_proto::{
    EndpointRequest, QueryReply, QueryRequest, Route, error_message,
    graphql_query,
};
use serde_json::{Value, json};

use crate::endpoint_client::EndpointClient;
use crate::error::SubmitError;
use crate::flight::Flight;
use crate::notice;
use crate::surface::{Pane, Surface};

/// Runs vector searches and shows the status, the GraphQL and the records
/// in separate panes.
///
/// Nothing is kept between queries, so a failure leaves no state behind.
pub struct QueryController {
    client: EndpointClient,
    surface: Arc<dyn Surface>,
    flight: Flight,
}

impl QueryController {
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

    /// Runs a query.
    pub async fn submit(
        &self,
        request: &QueryRequest,
    ) -> Result<QueryReply, SubmitError> {
        let Some(_flight) = self.flight.try_begin() else {
            return Err(SubmitError::Busy);
        };

        self.surface.set_busy(Pane::Status, notice::QUERYING);
        self.surface.set_text(Pane::Graphql, "");
        self.surface.set_text(Pane::Records, "");

        let body = json!(request);
        let resp = match self
            .client
            .send(EndpointRequest::post(Route::Query, body))
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                let message = err.to_string();
                self.surface.set_text(Pane::Status, notice::QUERY_FAILED);
                self.surface.set_text(Pane::Records, &message);
                return Err(SubmitError::Transport {
                    kind: err.kind(),
                    message,
                });
            }
        };

        if !resp.is_success() {
            self.surface.set_text(Pane::Status, notice::QUERY_FAILED);
            self.surface.set_text(
                Pane::Graphql,
                graphql_query(&resp.body).unwrap_or_default(),
            );
            self.surface.set_text(Pane::Records, &pretty(&resp.body));
            let message = error_message(&resp.body)
                .unwrap_or(notice::QUERY_FAILED)
                .to_owned();
            return Err(SubmitError::Application {
                status: resp.status,
                message,
            });
        }

        let reply = QueryReply::from_body(&resp.body);
        self.surface.set_text(
            Pane::Status,
            &format!("Found {} record(s)", reply.count),
        );
        self.surface.set_text(
            Pane::Graphql,
            reply.graphql_query.as_deref().unwrap_or_default(),
        );
        let records = reply.records.as_ref().map(pretty).unwrap_or_default();
        self.surface.set_text(Pane::Records, &records);
        Ok(reply)
    }

    /// Returns `true` while a query is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.flight.is_pending()
    }
}

/// Pretty-prints JSON with two-space indentation.
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rag_console_proto::{SortField, SortOrder};
    use rag_console_test_endpoint::{PresetReply, TestEndpoint};

    use super::*;
    use crate::{ControllerBuilder, MemorySurface};

    fn setup(endpoint: &TestEndpoint) -> (QueryController, MemorySurface) {
        let surface = MemorySurface::default();
        let controller = ControllerBuilder::with_endpoint(endpoint.clone())
            .with_surface(surface.clone())
            .build_query();
        (controller, surface)
    }

    #[tokio::test]
    async fn test_found_records() {
        let mut endpoint = TestEndpoint::default();
        endpoint.add_reply(PresetReply::ok(json!({
            "count": 1,
            "graphql_query": "{ Get { Chunk(limit: 5) { text } } }",
            "records": [{ "chunk_id": "c-1" }],
        })));
        let (controller, surface) = setup(&endpoint);

        let request = QueryRequest::with_phrase("invoice")
            .with_limit(5)
            .sorted_by(SortField::ChunkId, SortOrder::Desc);
        let reply = controller.submit(&request).await.unwrap();
        assert_eq!(reply.count, 1);

        assert_eq!(
            surface.text(Pane::Status).as_deref(),
            Some("Found 1 record(s)")
        );
        assert_eq!(
            surface.text(Pane::Graphql).as_deref(),
            Some("{ Get { Chunk(limit: 5) { text } } }")
        );
        assert_eq!(
            surface.text(Pane::Records).as_deref(),
            Some("[\n  {\n    \"chunk_id\": \"c-1\"\n  }\n]")
        );

        let sent = endpoint.requests()[0].clone();
        assert_eq!(sent.route, Route::Query);
        assert_eq!(
            sent.body,
            Some(json!({
                "phrase": "invoice",
                "doc_id": "",
                "limit": 5,
                "sort_by": "chunk_id",
                "sort_order": "desc",
            }))
        );
    }

    #[tokio::test]
    async fn test_clears_panes_before_sending() {
        let mut endpoint = TestEndpoint::default();
        endpoint.add_reply(PresetReply::ok(json!({ "count": 0, "records": [] })));
        let (controller, surface) = setup(&endpoint);

        controller
            .submit(&QueryRequest::with_phrase("x"))
            .await
            .unwrap();
        let updates = surface.updates();
        assert_eq!(
            &updates[..3],
            &[
                (Pane::Status, "Querying...".to_owned()),
                (Pane::Graphql, String::new()),
                (Pane::Records, String::new()),
            ]
        );
        assert_eq!(surface.text(Pane::Graphql).as_deref(), Some(""));
        assert_eq!(surface.text(Pane::Records).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_failure_status() {
        let mut endpoint = TestEndpoint::default();
        endpoint.add_reply(PresetReply::with_status(
            502,
            json!({
                "error": "weaviate query failed: timeout",
                "graphql_query": "{ Get }",
            }),
        ));
        let (controller, surface) = setup(&endpoint);

        let err = controller
            .submit(&QueryRequest::with_phrase("x"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmitError::Application {
                status: 502,
                message: "weaviate query failed: timeout".to_owned(),
            }
        );
        assert_eq!(surface.text(Pane::Status).as_deref(), Some("Query failed"));
        assert_eq!(surface.text(Pane::Graphql).as_deref(), Some("{ Get }"));
        let records = surface.text(Pane::Records).unwrap();
        let dumped: Value = serde_json::from_str(&records).unwrap();
        assert_eq!(dumped["error"], "weaviate query failed: timeout");
        assert!(records.contains("\n  \"error\""));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut endpoint = TestEndpoint::default();
        endpoint.add_transport_failure("connection reset by peer");
        let (controller, surface) = setup(&endpoint);

        controller
            .submit(&QueryRequest::with_phrase("x"))
            .await
            .unwrap_err();
        assert_eq!(surface.text(Pane::Status).as_deref(), Some("Query failed"));
        assert_eq!(
            surface.text(Pane::Records).as_deref(),
            Some("connection reset by peer")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_flight() {
        let mut endpoint = TestEndpoint::default();
        endpoint.set_delay(Duration::from_millis(50));
        endpoint.add_reply(PresetReply::ok(json!({ "count": 0, "records": [] })));
        let (controller, _surface) = setup(&endpoint);

        let request = QueryRequest::with_phrase("x");
        let (first, second) =
            tokio::join!(controller.submit(&request), controller.submit(&request));
        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), SubmitError::Busy);
        assert_eq!(endpoint.request_count(), 1);
    }

    #[tokio::test]
    async fn test_reply_without_records() {
        let mut endpoint = TestEndpoint::default();
        endpoint.add_reply(PresetReply::ok(json!({ "count": 0 })));
        let (controller, surface) = setup(&endpoint);

        let reply = controller
            .submit(&QueryRequest::with_phrase("nothing"))
            .await
            .unwrap();
        assert_eq!(reply.records, None);
        assert_eq!(
            surface.text(Pane::Status).as_deref(),
            Some("Found 0 record(s)")
        );
        assert_eq!(surface.text(Pane::Records).as_deref(), Some(""));
    }
}
