use std::fmt::{self, Display, Formatter};

/// The kind of failure that prevented an endpoint from producing a
/// response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached.
    Connect,
    /// The request did not complete in time.
    Timeout,
    /// A response arrived, but its body is not valid JSON.
    InvalidPayload,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Connect => write!(f, "connection failed"),
            ErrorKind::Timeout => write!(f, "request timed out"),
            ErrorKind::InvalidPayload => write!(f, "invalid payload"),
            ErrorKind::Other => write!(f, "transport error"),
        }
    }
}
