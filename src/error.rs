use thiserror::Error;

/// Why a send attempt produced no response.
///
/// Only two kinds are ever shown to the user. The underlying transport cause
/// is kept as the error source for logging, never in the message.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("URL is required")]
    UrlRequired,

    #[error("Failed to fetch. Check URL or CORS.")]
    Transport(#[from] TransportError),
}

/// Failure inside the network attempt itself.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("request task ended without a response")]
    Interrupted,
}
