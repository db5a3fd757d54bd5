//! Error types

use core::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// Not enough bytes to decode a field. `data` is the hex dump of what was left.
    TooShort {
        required: usize,
        available: usize,
        data: String,
    },
    /// The bytes are present but do not make sense for the field being decoded.
    ParseError(String),
    /// A dissector tried to register for a key that is already taken.
    RegisterError(String),
    /// The configuration could not be loaded or applied.
    ConfigError(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooShort {
                required,
                available,
                data,
            } => write!(
                f,
                "too short: required {} bytes, available {} bytes (data: {})",
                required, available, data
            ),
            Error::ParseError(msg) => write!(f, "parse error: {}", msg),
            Error::RegisterError(msg) => write!(f, "register error: {}", msg),
            Error::ConfigError(msg) => write!(f, "config error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_too_short() {
        let e = Error::TooShort {
            required: 3,
            available: 1,
            data: "01".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "too short: required 3 bytes, available 1 bytes (data: 01)"
        );
    }
}
