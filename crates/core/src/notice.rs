//! Fixed texts shown on the surface.

/// Shown in place of an empty transcript.
pub const EMPTY_TRANSCRIPT: &str = "Response will appear here.";
/// Shown when a prompt is submitted without any text.
pub const EMPTY_INPUT: &str = "Write a prompt first.";
/// Shown while a prompt is in flight.
pub const SENDING: &str = "Sending...";
/// Shown when the backend rejects a prompt without saying why.
pub const REQUEST_FAILED: &str = "Request failed.";
/// Shown when no response could be obtained.
pub const NETWORK_ERROR: &str = "Network error. Please try again.";
/// Shown when a reply carries no citations.
pub const NO_CITATIONS: &str = "No citations returned.";
/// Stands in for a citation without a source key.
pub const UNKNOWN_SOURCE: &str = "unknown-source";
/// Shown while a query is in flight.
pub const QUERYING: &str = "Querying...";
/// Shown when a query fails for any reason.
pub const QUERY_FAILED: &str = "Query failed";
