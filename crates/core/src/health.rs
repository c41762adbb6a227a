use rag_console_proto::{
    Endpoint, EndpointError, EndpointRequest, Route, ServiceStatus,
    error_message,
};

use crate::error::SubmitError;
use crate::notice;

/// Asks the backend how it is doing.
///
/// `GET /health` is tried first. Services that don't have it describe
/// themselves on `GET /`, which is tried next.
pub async fn probe_health<E: Endpoint>(
    endpoint: &E,
) -> Result<ServiceStatus, SubmitError> {
    match probe(endpoint, Route::Health).await {
        Ok(status) => Ok(status),
        Err(err) => {
            debug!("health route unusable ({err}), trying the root route");
            probe(endpoint, Route::Root).await
        }
    }
}

async fn probe<E: Endpoint>(
    endpoint: &E,
    route: Route,
) -> Result<ServiceStatus, SubmitError> {
    let resp = endpoint
        .send(EndpointRequest::get(route))
        .await
        .map_err(|err| SubmitError::Transport {
            kind: err.kind(),
            message: err.to_string(),
        })?;
    if !resp.is_success() {
        return Err(SubmitError::Application {
            status: resp.status,
            message: error_message(&resp.body)
                .unwrap_or(notice::REQUEST_FAILED)
                .to_owned(),
        });
    }
    Ok(ServiceStatus::from_body(&resp.body))
}
