use thiserror::Error;

/// A stored blob could not be converted to or from its structured form.
///
/// Each variant names the offending field so that corruption of one blob
/// is observable independently of the others. A decode failure fails the
/// whole row; it never nulls out the remaining fields.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed {field} blob for post {post_id}: {source}")]
    MalformedBlob {
        field: &'static str,
        post_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {field} for post {post_id}: {source}")]
    Encode {
        field: &'static str,
        post_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    pub fn field(&self) -> &'static str {
        match self {
            CodecError::MalformedBlob { field, .. } => field,
            CodecError::Encode { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, CacheError>;
