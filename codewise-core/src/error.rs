use std::{error, fmt, io};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    NotFound { collection: String, id: String },
    InvalidStateError(String),
    MalformedDocument(String),
    StoreError(String),
    ConfigError(String),
    JsonError(String),
    IoError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "Document not found: {collection}/{id}")
            }
            Self::InvalidStateError(msg) => write!(f, "Invalid state: {msg}"),
            Self::MalformedDocument(msg) => write!(f, "Malformed document: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::StoreError(msg) | Self::JsonError(msg) | Self::IoError(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(err.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        Error::StoreError(err.to_string())
    }
}
