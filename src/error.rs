use thiserror::Error;
use yasna::{ASN1Error, ASN1ErrorKind};

/// Errors raised while encoding or decoding certificate attribute structures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed DER: wrong tag, short content, missing or duplicated field,
    /// trailing bytes.
    #[error("malformed DER: {0}")]
    Format(String),

    /// A value has no representation in any of the permitted encodings, or a
    /// mandatory field was never set.
    #[error("value cannot be encoded: {0}")]
    Unencodable(String),

    /// A numeric or structural parameter lies outside its valid domain.
    #[error("value out of range: {0}")]
    Range(String),

    /// A name-based attribute access used a name the holder does not know.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ASN1Error> for Error {
    fn from(err: ASN1Error) -> Self {
        let reason = match err.kind() {
            ASN1ErrorKind::Eof => "eof",
            ASN1ErrorKind::Extra => "extra",
            ASN1ErrorKind::StackOverflow => "stack overflow",
            ASN1ErrorKind::IntegerOverflow => "integer overflow",
            _ => "invalid",
        };
        Error::Format(reason.to_string())
    }
}
