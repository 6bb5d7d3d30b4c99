use std::{error, fmt, io};

use crate::de::parser::Signature;

/// Reasons a GIF stream can fail to decode.
///
/// All of these abort the parse for the whole stream; there is no byte-level
/// resynchronization in the GIF grammar.
#[non_exhaustive]
#[derive(Debug)]
pub enum DecodeError {
    /// An error occurred while attempting to read from a file.
    ReadFailure {
        /// The underlying error that caused the failure.
        source: io::Error,
    },

    /// Attempted to read more bytes than were available.
    UnexpectedEndOfStream {
        /// The number of bytes needed to complete the operation.
        needed: usize,
    },

    /// The stream does not begin with the ASCII signature `GIF`.
    InvalidSignature {
        /// The first three bytes that were received instead.
        actual: Signature,
    },

    /// A top-level block began with a byte other than `!`, `,` or `;`.
    UnknownBlockSentinel {
        /// The sentinel byte that was received.
        actual: u8,
    },

    /// An LZW code referenced past the end of the dictionary.
    InvalidLzwCode {
        /// The code that was decoded.
        code: u16,
        /// The number of dictionary entries at the time.
        limit: u16,
    },
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::ReadFailure { ref source } => Some(source),
            Self::UnexpectedEndOfStream { .. }
            | Self::InvalidSignature { .. }
            | Self::UnknownBlockSentinel { .. }
            | Self::InvalidLzwCode { .. } => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ReadFailure { .. } => "failed to read GIF file".fmt(f),
            Self::UnexpectedEndOfStream { needed } => {
                write!(f, "unexpected end of stream (needed {needed} more bytes)")
            }
            Self::InvalidSignature { actual } => {
                let actual = String::from_utf8_lossy(&actual).to_string();
                write!(f, "expected signature \"GIF\", got {actual:?}")
            }
            Self::UnknownBlockSentinel { actual } => {
                write!(f, "unknown block sentinel: {actual:#04x}")
            }
            Self::InvalidLzwCode { code, limit } => {
                write!(f, "LZW code {code} exceeds dictionary length {limit}")
            }
        }
    }
}
