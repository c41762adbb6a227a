use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;

use rag_console_proto::{
    ChatReply, ChatRequest, Endpoint, EndpointError, EndpointRequest,
    EndpointResponse, ErrorKind, Role, Route, Turn,
};
use serde_json::{Value, json};

#[derive(Debug)]
struct FakeEndpointError(ErrorKind);

impl Display for FakeEndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeEndpointError {}

impl EndpointError for FakeEndpointError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the last user turn back, refuses empty conversations and fails
/// every route except `/prompt` at the transport level.
struct EchoEndpoint;

impl Endpoint for EchoEndpoint {
    type Error = FakeEndpointError;

    fn send(
        &self,
        req: EndpointRequest,
    ) -> impl Future<Output = Result<EndpointResponse, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            if req.route != Route::Prompt {
                break 'blk Err(FakeEndpointError(ErrorKind::Connect));
            }

            let body = req.body.unwrap_or(Value::Null);
            let Ok(chat) = serde_json::from_value::<ChatRequest>(body) else {
                break 'blk Ok(EndpointResponse::new(
                    400,
                    json!({ "error": "messages must be a list" }),
                ));
            };
            let Some(last) = chat.messages.last() else {
                break 'blk Ok(EndpointResponse::new(
                    400,
                    json!({ "error": "messages must not be empty" }),
                ));
            };

            Ok(EndpointResponse::new(
                200,
                json!({
                    "assistant_message": {
                        "role": "assistant",
                        "content": format!("You said {}", last.content),
                    },
                    "citations": [],
                }),
            ))
        };
        ready(result)
    }
}

#[tokio::test]
async fn test_round_trip() {
    let endpoint = EchoEndpoint;
    let req = ChatRequest {
        messages: vec![Turn::user("Good morning")],
    };
    let resp = endpoint
        .send(EndpointRequest::post(
            Route::Prompt,
            serde_json::to_value(&req).unwrap(),
        ))
        .await
        .unwrap();
    assert!(resp.is_success());

    let reply = ChatReply::from_body(&resp.body);
    assert_eq!(reply.content.as_deref(), Some("You said Good morning"));
    assert!(reply.citations.is_empty());

    let turn = Turn::assistant(reply.content.unwrap());
    assert_eq!(turn.role, Role::Assistant);
}

#[tokio::test]
async fn test_application_error_is_a_response() {
    let endpoint = EchoEndpoint;
    let resp = endpoint
        .send(EndpointRequest::post(Route::Prompt, json!({ "messages": [] })))
        .await
        .unwrap();
    assert!(!resp.is_success());
    assert_eq!(
        rag_console_proto::error_message(&resp.body),
        Some("messages must not be empty")
    );
}

#[tokio::test]
async fn test_transport_error() {
    let endpoint = EchoEndpoint;
    let err = endpoint
        .send(EndpointRequest::get(Route::Health))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connect);
}
