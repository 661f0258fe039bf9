use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::base62::{ENCODED_LEN, RAW_LEN, decode_base62, encode_base62};
use crate::rand::RandSource;
use crate::random_native::ThreadRandom;
use crate::time::{from_epoch_secs, to_epoch_secs, unix_secs_of};
use crate::{Error, Result};

/// A K-Sortable Unique Identifier.
///
/// A `Ksuid` is a 160-bit value: a 32-bit big-endian seconds counter
/// relative to the KSUID epoch ([`crate::KSUID_EPOCH`]), followed by 128
/// bits of random payload.
///
/// ```text
///  Byte Index:  0              4                           20
///               +--------------+----------------------------+
///  Field:       | timestamp (4)|        payload (16)        |
///               +--------------+----------------------------+
///               |<---- big-endian, 20 bytes, 160 bits ----->|
/// ```
///
/// Identifiers order by their 20-byte big-endian representation, which is
/// the same as numeric order of the 160-bit value and the same as
/// chronological order whenever timestamps differ. The 27-character base62
/// form preserves that order under plain byte-wise string comparison.
///
/// ```
/// use ksuid::Ksuid;
///
/// let id = Ksuid::from_parts(107_608_047, [0xAB; 16]);
/// assert_eq!(id.timestamp(), 107_608_047);
/// assert_eq!(id.encode().len(), Ksuid::ENCODED_LEN);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ksuid {
    bytes: [u8; RAW_LEN],
}

impl Ksuid {
    /// Width of the timestamp field in bytes.
    pub const TIMESTAMP_LEN: usize = 4;
    /// Width of the random payload in bytes.
    pub const PAYLOAD_LEN: usize = 16;
    /// Width of the binary representation in bytes.
    pub const LEN: usize = Self::TIMESTAMP_LEN + Self::PAYLOAD_LEN;
    /// Width of the base62 string representation in characters.
    pub const ENCODED_LEN: usize = ENCODED_LEN;

    /// The smallest identifier: zero timestamp, all-zero payload.
    pub const MIN: Self = Self {
        bytes: [0x00; RAW_LEN],
    };
    /// The largest identifier: maximum timestamp, all-ones payload.
    pub const MAX: Self = Self {
        bytes: [0xFF; RAW_LEN],
    };

    /// Constructs an identifier from an epoch-relative timestamp and an
    /// explicit payload.
    #[must_use]
    pub fn from_parts(timestamp: u32, payload: [u8; Self::PAYLOAD_LEN]) -> Self {
        let mut bytes = [0_u8; RAW_LEN];
        bytes[..Self::TIMESTAMP_LEN].copy_from_slice(&timestamp.to_be_bytes());
        bytes[Self::TIMESTAMP_LEN..].copy_from_slice(&payload);
        Self { bytes }
    }

    /// Constructs an identifier from its 20-byte binary representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless the slice is exactly 20
    /// bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; RAW_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: RAW_LEN,
            len: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Generates an identifier for the current wall-clock time using the
    /// built-in [`ThreadRandom`] payload source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if the system clock is
    /// outside the encodable window.
    pub fn now() -> Result<Self> {
        Self::from_datetime(SystemTime::now())
    }

    /// Generates an identifier for the given wall-clock time using the
    /// built-in [`ThreadRandom`] payload source.
    ///
    /// Sub-second precision is discarded; KSUID timestamps are whole
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `datetime` is outside the
    /// encodable window.
    pub fn from_datetime(datetime: SystemTime) -> Result<Self> {
        Self::from_datetime_and_rand(datetime, &ThreadRandom)
    }

    /// Generates an identifier for the given wall-clock time and a custom
    /// payload source implementing [`RandSource`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `datetime` is outside the
    /// encodable window.
    pub fn from_datetime_and_rand<R>(datetime: SystemTime, rng: &R) -> Result<Self>
    where
        R: RandSource<u128>,
    {
        Self::from_unix_secs_and_rand(unix_secs_of(datetime), rng)
    }

    /// Generates an identifier for the given absolute Unix timestamp using
    /// the built-in [`ThreadRandom`] payload source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `unix_secs` is outside the
    /// encodable window.
    pub fn from_unix_secs(unix_secs: u64) -> Result<Self> {
        Self::from_unix_secs_and_rand(unix_secs, &ThreadRandom)
    }

    /// Generates an identifier for the given absolute Unix timestamp and a
    /// custom payload source implementing [`RandSource`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if `unix_secs` is outside the
    /// encodable window.
    pub fn from_unix_secs_and_rand<R>(unix_secs: u64, rng: &R) -> Result<Self>
    where
        R: RandSource<u128>,
    {
        let timestamp = to_epoch_secs(unix_secs)?;
        Ok(Self::from_parts(timestamp, rng.rand().to_be_bytes()))
    }

    /// Returns the timestamp field: whole seconds since the KSUID epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// Returns the random payload with the timestamp portion removed.
    #[must_use]
    pub fn payload(&self) -> [u8; Self::PAYLOAD_LEN] {
        let mut payload = [0_u8; Self::PAYLOAD_LEN];
        payload.copy_from_slice(&self.bytes[Self::TIMESTAMP_LEN..]);
        payload
    }

    /// Returns the timestamp as absolute seconds since the Unix epoch.
    #[must_use]
    pub fn unix_secs(&self) -> u64 {
        from_epoch_secs(self.timestamp())
    }

    /// Returns the timestamp as a [`SystemTime`].
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.unix_secs())
    }

    /// Returns the 20-byte binary representation.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; RAW_LEN] {
        self.bytes
    }

    /// Borrows the 20-byte binary representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.bytes
    }

    /// Encodes this identifier into its 27-character base62 [`String`].
    ///
    /// The result is ASCII and sorts byte-wise in the same order as the
    /// identifiers themselves.
    #[must_use]
    pub fn encode(&self) -> String {
        let buf = encode_base62(&self.bytes);
        // SAFETY: base62 output is always valid ASCII
        unsafe { String::from_utf8_unchecked(buf.to_vec()) }
    }

    /// Encodes this identifier into the provided output buffer without heap
    /// allocation.
    pub fn encode_to_buf(&self, buf: &mut [u8; ENCODED_LEN]) {
        *buf = encode_base62(&self.bytes);
    }

    /// Decodes a 27-character base62 string back into an identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - is not exactly 27 characters ([`Error::InvalidLength`])
    /// - contains a byte outside the base62 alphabet
    ///   ([`Error::InvalidAscii`])
    /// - denotes a value above 2^160 - 1 ([`Error::DecodeOverflow`])
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = decode_base62(encoded)?;
        Ok(Self { bytes })
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.encode().fmt(f)
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ksuid")
            .field("timestamp", &self.timestamp())
            .field(
                "payload",
                &format_args!("{:032X}", u128::from_be_bytes(self.payload())),
            )
            .field("base62", &format_args!("{self}"))
            .finish()
    }
}

impl From<[u8; RAW_LEN]> for Ksuid {
    fn from(bytes: [u8; RAW_LEN]) -> Self {
        Self { bytes }
    }
}

impl From<Ksuid> for [u8; RAW_LEN] {
    fn from(id: Ksuid) -> Self {
        id.bytes
    }
}

impl AsRef<[u8]> for Ksuid {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::str::FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Ksuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl PartialEq<str> for Ksuid {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).map(|id| id == *self).unwrap_or(false)
    }
}

impl PartialEq<&str> for Ksuid {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<Ksuid> for &str {
    fn eq(&self, other: &Ksuid) -> bool {
        other == *self
    }
}

impl PartialEq<String> for Ksuid {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<Ksuid> for String {
    fn eq(&self, other: &Ksuid) -> bool {
        other == self
    }
}

impl From<Ksuid> for String {
    fn from(id: Ksuid) -> Self {
        id.encode()
    }
}
