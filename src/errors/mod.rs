use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Request decode error: {0}")]
    Decode(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider init error: {0}")]
    ProviderInit(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Client disconnected")]
    ClientDisconnected,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
