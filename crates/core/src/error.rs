use rag_console_proto::ErrorKind;
use thiserror::Error;

/// Why a submission did not complete.
///
/// Every variant has already been reported on the surface by the time it
/// is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The input was empty or whitespace only. Nothing was sent.
    #[error("input is empty")]
    EmptyInput,
    /// Another submission is still in flight. Nothing was sent.
    #[error("a request is already in flight")]
    Busy,
    /// The backend answered with a failure status.
    #[error("backend answered {status}: {message}")]
    Application {
        /// The HTTP status code.
        status: u16,
        /// The error text supplied by the backend, or a generic one.
        message: String,
    },
    /// No response was obtained.
    #[error("{kind}: {message}")]
    Transport {
        /// The kind of transport failure.
        kind: ErrorKind,
        /// Details from the endpoint.
        message: String,
    },
}

impl SubmitError {
    /// Returns `true` if the request never left the console.
    #[inline]
    pub fn is_rejected_locally(&self) -> bool {
        matches!(self, SubmitError::EmptyInput | SubmitError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_locally() {
        assert!(SubmitError::EmptyInput.is_rejected_locally());
        assert!(SubmitError::Busy.is_rejected_locally());

        let rejected = SubmitError::Application {
            status: 400,
            message: "phrase is required".to_owned(),
        };
        assert!(!rejected.is_rejected_locally());
        let failed = SubmitError::Transport {
            kind: ErrorKind::Timeout,
            message: "timed out".to_owned(),
        };
        assert!(!failed.is_rejected_locally());
    }
}
