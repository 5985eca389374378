use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("format error: {0}")]
    Format(String),
}

impl From<fontafirma_kv::KVError> for SheetError {
    fn from(e: fontafirma_kv::KVError) -> Self {
        SheetError::Storage(e.to_string())
    }
}
