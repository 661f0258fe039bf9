use core::fmt;

use crate::time::{MAX_UNIX_SECS, MIN_UNIX_SECS};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `ksuid` can produce.
///
/// Every variant is fatal to the single operation that raised it. Values are
/// never clamped or truncated on error, since silent truncation would corrupt
/// the ordering guarantees of the encoded form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The wall-clock time falls outside the representable KSUID window.
    ///
    /// KSUID timestamps are 32-bit seconds relative to a custom epoch, so
    /// only Unix times in `[MIN_UNIX_SECS, MAX_UNIX_SECS]` are encodable.
    TimestampOutOfRange { unix_secs: u64 },

    /// A fixed-width field had the wrong byte or character count.
    ///
    /// Raised for byte slices that are not exactly 20 bytes and for encoded
    /// strings that are not exactly 27 characters.
    InvalidLength { expected: usize, len: usize },

    /// An encoded string contained a byte outside the base62 alphabet.
    InvalidAscii { byte: u8, index: usize },

    /// A decoded value exceeded 160 bits.
    ///
    /// Unreachable for strings produced by the encoder; only malformed or
    /// adversarial input can trip it, but it is checked on every decode.
    DecodeOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimestampOutOfRange { unix_secs } => write!(
                f,
                "timestamp out of range: {unix_secs} (valid: {MIN_UNIX_SECS}..={MAX_UNIX_SECS})"
            ),
            Self::InvalidLength { expected, len } => {
                write!(f, "invalid length: {len} (expected {expected})")
            }
            Self::InvalidAscii { byte, index } => {
                write!(f, "invalid ascii byte: {byte} at index {index}")
            }
            Self::DecodeOverflow => write!(f, "decode overflow: value exceeds 160 bits"),
        }
    }
}

impl core::error::Error for Error {}
