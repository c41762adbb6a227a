//! An endpoint that talks to the backend over HTTP.

#[macro_use]
extern crate tracing;

mod config;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use rag_console_proto::{
    Endpoint, EndpointError, EndpointRequest, EndpointResponse, ErrorKind,
    Method,
};
use reqwest::{Client, header};
use serde_json::Value;

pub use config::{
    DEFAULT_BASE_URL, HttpEndpointConfig, HttpEndpointConfigBuilder,
};

/// Error type for [`HttpEndpoint`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connect
        } else if err.is_decode() {
            ErrorKind::InvalidPayload
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl EndpointError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The backend, reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpEndpoint {
    client: Client,
    config: Arc<HttpEndpointConfig>,
}

impl HttpEndpoint {
    /// Creates a new `HttpEndpoint` with the given configuration.
    #[inline]
    pub fn new(config: HttpEndpointConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this endpoint.
    #[inline]
    pub fn config(&self) -> &HttpEndpointConfig {
        &self.config
    }
}

impl Endpoint for HttpEndpoint {
    type Error = Error;

    fn send(
        &self,
        req: EndpointRequest,
    ) -> impl Future<Output = Result<EndpointResponse, Self::Error>> + Send + 'static
    {
        let url = self.config.url_for(req.route.path());
        let mut builder = match req.route.method() {
            Method::Get => self.client.get(url),
            Method::Post => self
                .client
                .post(url)
                .json(req.body.as_ref().unwrap_or(&Value::Null)),
        };
        builder = builder.header(header::ACCEPT, "application/json");
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let resp_fut = builder.send();
        let route = req.route;

        async move {
            let resp = resp_fut.await.map_err(|err| {
                debug!("{route} failed: {err}");
                Error::from(err)
            })?;
            let status = resp.status().as_u16();

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            let is_json = content_type
                .as_deref()
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| {
                    m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
                })
                // Some backends omit the header; let the body decide.
                .unwrap_or(true);
            if !is_json {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::InvalidPayload,
                ));
            }

            let bytes = resp.bytes().await?;
            let body: Value = serde_json::from_slice(&bytes).map_err(|err| {
                Error::new(
                    format!("Invalid JSON body: {err}"),
                    ErrorKind::InvalidPayload,
                )
            })?;

            trace!("{route} answered {status}");
            Ok(EndpointResponse::new(status, body))
        }
    }
}
