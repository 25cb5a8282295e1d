/// Errors raised while obtaining a schema snapshot.
///
/// Lookup misses are not errors; they surface as `None` from
/// [`LookupIndex`](crate::LookupIndex). The type is `Clone` so failures can be
/// fanned out on the event bus.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A required setting (typically the API key) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be completed (network, DNS, TLS, timeout).
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The upstream API answered with a non-success status.
    #[error("Upstream API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The upstream response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Item pagination handed out a cursor that was already visited.
    #[error("Pagination cursor {0} was returned twice")]
    RepeatedCursor(u32),
}
