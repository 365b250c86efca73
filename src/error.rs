use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed input document: {0}")]
    Document(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] transport_core::Error),
    #[error("Failed to write responses: {0}")]
    Output(#[from] std::io::Error),
}
