use thiserror::Error;

/// Errors that can occur while decoding a response document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed XML: {0}")]
    Xml(String),
    #[error("Invalid integer in <{tag}>: {value:?}")]
    InvalidInteger { tag: String, value: String },
    #[error("Invalid value in <{tag}>: {value:?}")]
    InvalidValue { tag: String, value: String },
    #[error("Missing element <{0}>")]
    MissingElement(String),
    #[error("Unexpected element <{0}>")]
    UnexpectedElement(String),
    #[error("<{tag}> declares Quantity {declared} but holds {actual} items")]
    QuantityMismatch {
        tag: String,
        declared: usize,
        actual: usize,
    },
    #[error("Document ended inside <{0}>")]
    UnexpectedEof(String),
}

impl DecodeError {
    pub(crate) fn invalid_integer(tag: &str, value: &str) -> Self {
        DecodeError::InvalidInteger {
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_value(tag: &str, value: &str) -> Self {
        DecodeError::InvalidValue {
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<quick_xml::Error> for DecodeError {
    fn from(err: quick_xml::Error) -> Self {
        DecodeError::Xml(err.to_string())
    }
}

/// Errors that can occur while rendering a request body.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("XML write failed: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Rendered XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
