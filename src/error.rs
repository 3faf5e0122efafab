use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Public Errors (does not include internal fails)
#[derive(ThisError, Debug)]
pub enum Error {
    /// The request was executed already; its body buffer is gone.
    #[error("request already executed")]
    AlreadyExecuted,
    #[error("io error sending request: {0}")]
    Io(#[from] std::io::Error),
    #[error("error encoding request: {0}")]
    Encode(String),
    #[error("error decoding response: {0}")]
    Decode(String),
    #[error("error converting body: {0}")]
    BodyConversion(std::string::FromUtf8Error),
}
