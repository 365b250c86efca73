use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stop '{0}' is already registered")]
    DuplicateStop(String),
    #[error("Bus '{0}' is already registered")]
    DuplicateBus(String),
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Unknown bus: {0}")]
    UnknownBus(String),
    #[error("No road distance recorded between '{from}' and '{to}'")]
    MissingDistance { from: String, to: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Index encoding error: {0}")]
    Encoding(#[from] serde_cbor::Error),
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),
    #[error("Index schema mismatch: expected version {expected}, found {found}")]
    SchemaMismatch { expected: u32, found: u32 },
}
