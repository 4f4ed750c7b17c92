use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response contained no completion")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, AiError>;
