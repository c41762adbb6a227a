//! A local fake backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rag_console_proto::{
    Endpoint, EndpointError, EndpointRequest, EndpointResponse, ErrorKind,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl EndpointError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    steps: VecDeque<PresetStep>,
    requests: Vec<EndpointRequest>,
}

/// A local fake backend for testing purpose.
///
/// Before sending requests, you need to set up the script, which is how
/// the backend should answer. Steps are consumed in order, one per
/// request, regardless of the route. If the script runs out, a transport
/// error is returned.
///
/// Every request is recorded at the moment `send` is called, so tests can
/// check what the backend saw, or that it saw nothing at all.
///
/// Clones share the same script and request log.
#[derive(Clone, Default)]
pub struct TestEndpoint {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestEndpoint {
    /// Appends a step to the script.
    #[inline]
    pub fn add_step<S: Into<PresetStep>>(&mut self, step: S) {
        self.script().steps.push_back(step.into());
    }

    /// Appends a preset answer to the script.
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.add_step(reply);
    }

    /// Appends a transport failure to the script.
    #[inline]
    pub fn add_transport_failure<S: Into<String>>(&mut self, message: S) {
        self.add_step(PresetStep::TransportFailure(message.into()));
    }

    /// Delays every answer by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<EndpointRequest> {
        self.script().requests.clone()
    }

    /// Returns the number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }

    /// Returns the number of steps not consumed yet.
    pub fn remaining_steps(&self) -> usize {
        self.script().steps.len()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        // A panicking test must not hide the script from the others.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Debug for TestEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEndpoint")
            .field("remaining_steps", &self.remaining_steps())
            .field("delay", &self.delay)
            .finish()
    }
}

impl Endpoint for TestEndpoint {
    type Error = crate::Error;

    fn send(
        &self,
        req: EndpointRequest,
    ) -> impl Future<Output = Result<EndpointResponse, Self::Error>> + Send + 'static
    {
        let step = {
            let mut script = self.script();
            script.requests.push(req);
            script.steps.pop_front()
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match step {
                Some(PresetStep::Reply(reply)) => {
                    Ok(EndpointResponse::new(reply.status, reply.body))
                }
                Some(PresetStep::TransportFailure(message)) => Err(Error {
                    message,
                    kind: ErrorKind::Connect,
                }),
                None => Err(Error {
                    message: "no enough steps".to_owned(),
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
