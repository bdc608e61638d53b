use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("Invalid parameter: {0}")]
    Parameter(String),

    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("Invalid HTTP rule on {method}: {reason}")]
    HttpRule { method: String, reason: String },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
