use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanonError {
    #[error("XML parsing error at {location}: {message}")]
    XmlParse { message: String, location: String },

    #[error("XML serialization error: {0}")]
    XmlWrite(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CanonError>;
