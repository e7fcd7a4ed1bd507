/// Caller-facing error taxonomy.
///
/// Every error that crosses a request boundary is classified into one of
/// these variants; internal detail (provider codes, transport errors) is
/// never re-exposed to callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Precondition failed: {0}")]
    FailedPrecondition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
