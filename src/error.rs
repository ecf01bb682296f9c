#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Unexpected type {0}")]
    InvalidType(u16),

    #[error("Invalid option data: {0}")]
    InvalidData(String),

    #[error("Invalid IPv6 address field")]
    InvalidIpv6Address,

    #[error("Encoded value exceeds its maximum size")]
    WontFit,

    #[error("DUID exceeds maximum length of 128 octets")]
    DuidTooLong,
}

pub type Result<T> = std::result::Result<T, Error>;
