/// Error type for document-store operations.
///
/// Getters model an absent document as `Ok(None)` — absence is a normal
/// case for this engine — so `NotFound` only surfaces when a write targets
/// a document that no longer exists.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
