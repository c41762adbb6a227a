use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a backend reports about itself on its health routes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Name of the service.
    pub service: Option<String>,
    /// Self-reported status, usually `ok`.
    pub status: Option<String>,
    /// Upstream dependencies and where the service expects them.
    pub dependencies: BTreeMap<String, String>,
}

impl ServiceStatus {
    /// Extracts the status from a health body.
    pub fn from_body(body: &Value) -> Self {
        let text = |key| {
            body.get(key)
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        };
        let dependencies = body
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, target)| {
                        Some((name.clone(), target.as_str()?.to_owned()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            service: text("service"),
            status: text("status"),
            dependencies,
        }
    }

    /// Returns `true` if the service reported `ok`.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}
