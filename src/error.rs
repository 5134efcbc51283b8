use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to parse XML: {0}")]
    Parse(String),

    #[error("Compression failed: {0}")]
    Compression(String),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("No prompt data found in URL")]
    MissingData,

    #[error("Failed to generate shortlink: {0}")]
    Encoding(#[source] Box<PromptError>),

    #[error("Failed to parse shortlink: {0}")]
    Decoding(#[source] Box<PromptError>),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No input: pass a FILE or pipe a document on stdin")]
    NoInput,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PromptError {
    /// Wrap an error raised while building a shortlink.
    pub fn encoding(cause: PromptError) -> Self {
        PromptError::Encoding(Box::new(cause))
    }

    /// Wrap an error raised while reading a shortlink.
    pub fn decoding(cause: PromptError) -> Self {
        PromptError::Decoding(Box::new(cause))
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
