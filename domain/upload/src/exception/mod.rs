pub type UploadResult<T> = Result<T, UploadException>;

#[derive(Debug, thiserror::Error)]
pub enum UploadException {
    #[error("Part size must be greater than zero.")]
    InvalidPartSize,

    #[error("Cannot create remote item: {source}")]
    Create {
        #[source]
        source: anyhow::Error,
    },

    #[error("Part {part_number} of item: {item_id} failed to upload: {source}")]
    PartUpload {
        item_id: String,
        part_number: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("Commit of item: {item_id} failed: {source}")]
    Commit {
        item_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Only produced on the compensation path, where it is logged and dropped.
    #[error("Cancel of item: {item_id} failed: {source}")]
    Cancel {
        item_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Item: {item_id} failed to process: {message}")]
    Readiness { item_id: String, message: String },

    #[error("Item: {item_id} is still not ready after {attempts} status checks.")]
    ReadinessTimeout { item_id: String, attempts: u32 },

    #[error("Cannot query status of item: {item_id}: {source}")]
    StatusQuery {
        item_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Cannot set access of item: {item_id}: {source}")]
    SetAccess {
        item_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Upload internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for UploadException {
    fn from(e: anyhow::Error) -> Self {
        UploadException::InternalError { source: e }
    }
}
