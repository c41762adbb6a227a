use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One scripted answer of a [`crate::TestEndpoint`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetStep {
    /// Answer with a status and a JSON body.
    #[serde(rename = "reply")]
    Reply(PresetReply),
    /// Fail without producing a response.
    #[serde(rename = "transport_failure")]
    TransportFailure(String),
}

/// A preset HTTP answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetReply {
    /// The HTTP status code.
    pub status: u16,
    /// The JSON body.
    pub body: Value,
}

impl PresetReply {
    /// A `200 OK` answer.
    #[inline]
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// An answer with an arbitrary status.
    #[inline]
    pub fn with_status(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

impl From<PresetReply> for PresetStep {
    #[inline]
    fn from(reply: PresetReply) -> Self {
        PresetStep::Reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let steps = vec![
            PresetStep::Reply(PresetReply::ok(json!({ "response": "hi" }))),
            PresetStep::TransportFailure("connection reset".to_owned()),
        ];

        let serialized = serde_json::to_string(&steps).unwrap();
        let deserialized: Vec<PresetStep> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(steps, deserialized);
    }
}
