use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsidhError {
    #[error("public curve is not a supersingular CSIDH curve")]
    InvalidCurve,

    #[error("malformed {what}: expected {expected} bytes, got {actual}")]
    MalformedInput {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("private exponent {value} at index {index} is out of range")]
    ExponentOutOfRange { index: usize, value: i16 },

    #[error("{what} is not a canonical field element encoding")]
    NonCanonicalEncoding { what: &'static str },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
