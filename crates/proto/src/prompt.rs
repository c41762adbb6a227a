use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The body posted to `/prompt` by the single-shot console.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// The prompt text.
    pub prompt: String,
}

/// A successful single-shot reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptReply {
    /// The prompt echoed back by the backend.
    pub prompt: String,
    /// The model that produced the response.
    pub model: String,
    /// The generated text.
    pub response: String,
}

impl PromptReply {
    /// Extracts a reply from a successful response body. Missing or
    /// non-string fields become empty strings.
    pub fn from_body(body: &Value) -> Self {
        let text = |key| {
            body.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            prompt: text("prompt"),
            model: text("model"),
            response: text("response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_body() {
        let reply = PromptReply::from_body(&json!({
            "prompt": "hi",
            "model": "llama3",
            "response": "hello",
        }));
        assert_eq!(reply.prompt, "hi");
        assert_eq!(reply.model, "llama3");
        assert_eq!(reply.response, "hello");

        let reply = PromptReply::from_body(&json!({ "model": 7 }));
        assert_eq!(reply, PromptReply::default());
    }
}
