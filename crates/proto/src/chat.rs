use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Turn;

/// The body posted to `/prompt` by the chat console.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The whole conversation so far, oldest first.
    pub messages: Vec<Turn>,
}

/// A source attribution returned alongside an assistant reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// Object key of the cited document.
    #[serde(default)]
    pub source_key: Option<String>,
    /// The quoted passage.
    #[serde(default)]
    pub quote: Option<String>,
}

/// The interesting parts of a successful `/prompt` reply.
///
/// The backend payload is loosely typed, so this is extracted field by
/// field instead of being deserialized as a whole. Fields with an
/// unexpected shape are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatReply {
    /// The assistant text, if the payload carried one.
    pub content: Option<String>,
    /// Citations attached to the reply, in the order they were returned.
    pub citations: Vec<Citation>,
}

impl ChatReply {
    /// Extracts a reply from a successful response body.
    ///
    /// `assistant_message.content` is preferred when it is a string, and
    /// the flat `response` field is used otherwise.
    pub fn from_body(body: &Value) -> Self {
        let structured = body
            .get("assistant_message")
            .and_then(|msg| msg.get("content"))
            .and_then(Value::as_str);
        let flat = body.get("response").and_then(Value::as_str);
        let content = structured.or(flat).map(ToOwned::to_owned);

        let citations = body
            .get("citations")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(citation_from_value).collect())
            .unwrap_or_default();

        Self { content, citations }
    }
}

fn citation_from_value(value: &Value) -> Citation {
    let text = |key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    };
    Citation {
        source_key: text("source_key"),
        quote: text("quote"),
    }
}

/// Returns the `error` string of a failure body, if any.
///
/// Empty strings count as missing.
pub fn error_message(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
