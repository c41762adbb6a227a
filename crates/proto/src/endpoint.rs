use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde_json::Value;

use crate::error::ErrorKind;

/// HTTP method used by a [`Route`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`, without a body.
    Get,
    /// `POST`, with a JSON body.
    Post,
}

/// A backend route known to the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `POST /prompt`, used by both the chat and single-shot consoles.
    Prompt,
    /// `POST /query`, the vector search console.
    Query,
    /// `GET /health`.
    Health,
    /// `GET /`, the service description.
    Root,
}

impl Route {
    /// Returns the path of this route, relative to the backend base URL.
    #[inline]
    pub fn path(&self) -> &'static str {
        match self {
            Route::Prompt => "/prompt",
            Route::Query => "/query",
            Route::Health => "/health",
            Route::Root => "/",
        }
    }

    /// Returns the method this route expects.
    #[inline]
    pub fn method(&self) -> Method {
        match self {
            Route::Prompt | Route::Query => Method::Post,
            Route::Health | Route::Root => Method::Get,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let method = match self.method() {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{method} {}", self.path())
    }
}

/// A request to be sent to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointRequest {
    /// Where the request goes.
    pub route: Route,
    /// The JSON body. Ignored for `GET` routes.
    pub body: Option<Value>,
}

impl EndpointRequest {
    /// Creates a `POST` request carrying `body`.
    #[inline]
    pub fn post(route: Route, body: Value) -> Self {
        Self {
            route,
            body: Some(body),
        }
    }

    /// Creates a request without a body.
    #[inline]
    pub fn get(route: Route) -> Self {
        Self { route, body: None }
    }
}

/// A response obtained from the backend.
///
/// Failure statuses are still responses. Only failures to obtain a
/// response at all are reported as [`Endpoint::Error`].
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded JSON body.
    pub body: Value,
}

impl EndpointResponse {
    /// Creates a response.
    #[inline]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` for a 2xx status.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The error type for an endpoint.
pub trait EndpointError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents the backend, which accepts a JSON body and
/// answers with a JSON body plus an HTTP status.
///
/// Once the endpoint is created, it should behave like a stateless object.
/// It can still have internal state (a connection pool, for example), but
/// callers should not rely on it.
pub trait Endpoint: Send + Sync {
    /// The error type that may be returned by the endpoint.
    type Error: EndpointError;

    /// Sends a request and waits for the whole response.
    fn send(
        &self,
        req: EndpointRequest,
    ) -> impl Future<Output = Result<EndpointResponse, Self::Error>> + Send + 'static;
}
