use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::base62::{ENCODED_LEN, RAW_LEN, decode_base62, encode_base62};
use crate::rand::RandSource;
use crate::random_native::ThreadRandom;
use crate::time::{KSUID_EPOCH, unix_secs_of};
use crate::{Error, Result};

// 1/256 s expressed in nanoseconds (exact).
const NANOS_PER_UNIT: u64 = 3_906_250;

/// A KSUID with sub-second (1/256 s) timestamp resolution.
///
/// Same 20-byte, 27-character envelope as [`Ksuid`], with one byte moved
/// from the payload to the timestamp: 40 bits of 1/256-second ticks since
/// the KSUID epoch, then 15 bytes of random payload. The two layouts cover
/// the same absolute time range and share the base62 codec, so ordering
/// guarantees carry over unchanged.
///
/// [`Ksuid`]: crate::Ksuid
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct KsuidMs {
    bytes: [u8; RAW_LEN],
}

impl KsuidMs {
    /// Width of the timestamp field in bytes.
    pub const TIMESTAMP_LEN: usize = 5;
    /// Width of the random payload in bytes.
    pub const PAYLOAD_LEN: usize = 15;
    /// Width of the binary representation in bytes.
    pub const LEN: usize = Self::TIMESTAMP_LEN + Self::PAYLOAD_LEN;
    /// Width of the base62 string representation in characters.
    pub const ENCODED_LEN: usize = ENCODED_LEN;
    /// Timestamp ticks per second.
    pub const UNITS_PER_SEC: u64 = 256;
    /// Largest value of the 40-bit timestamp field.
    pub const MAX_TIMESTAMP: u64 = (1 << 40) - 1;

    /// The smallest identifier: zero timestamp, all-zero payload.
    pub const MIN: Self = Self {
        bytes: [0x00; RAW_LEN],
    };
    /// The largest identifier: maximum timestamp, all-ones payload.
    pub const MAX: Self = Self {
        bytes: [0xFF; RAW_LEN],
    };

    /// Constructs an identifier from an epoch-relative tick count and an
    /// explicit payload.
    ///
    /// `timestamp` must fit in 40 bits; higher bits are masked off.
    #[must_use]
    pub fn from_parts(timestamp: u64, payload: [u8; Self::PAYLOAD_LEN]) -> Self {
        debug_assert!(timestamp <= Self::MAX_TIMESTAMP, "timestamp overflow");
        let ts = (timestamp & Self::MAX_TIMESTAMP).to_be_bytes();
        let mut bytes = [0_u8; RAW_LEN];
        bytes[..Self::TIMESTAMP_LEN].copy_from_slice(&ts[3..]);
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

    /// Generates an identifier for the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOutOfRange`] if the system clock is
    /// outside the encodable window.
    pub fn now() -> Result<Self> {
        Self::from_datetime(SystemTime::now())
    }

    /// Generates an identifier for the given wall-clock time, rounded to
    /// the nearest 1/256 s, using the built-in [`ThreadRandom`] source.
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
        let out_of_range = || Error::TimestampOutOfRange {
            unix_secs: unix_secs_of(datetime),
        };
        let since_epoch = datetime
            .duration_since(UNIX_EPOCH + KSUID_EPOCH)
            .map_err(|_| out_of_range())?;

        // Round to the nearest tick without going through floats.
        let units = (since_epoch.as_nanos() * u128::from(Self::UNITS_PER_SEC) + 500_000_000)
            / 1_000_000_000;
        let units = u64::try_from(units)
            .ok()
            .filter(|&u| u <= Self::MAX_TIMESTAMP)
            .ok_or_else(out_of_range)?;

        // The full 16 random bytes minus the one donated to the timestamp.
        let mut payload = [0_u8; Self::PAYLOAD_LEN];
        payload.copy_from_slice(&rng.rand().to_be_bytes()[1..]);
        Ok(Self::from_parts(units, payload))
    }

    /// Returns the timestamp field: 1/256-second ticks since the KSUID
    /// epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        u64::from_be_bytes([
            0,
            0,
            0,
            self.bytes[0],
            self.bytes[1],
            self.bytes[2],
            self.bytes[3],
            self.bytes[4],
        ])
    }

    /// Returns the random payload with the timestamp portion removed.
    #[must_use]
    pub fn payload(&self) -> [u8; Self::PAYLOAD_LEN] {
        let mut payload = [0_u8; Self::PAYLOAD_LEN];
        payload.copy_from_slice(&self.bytes[Self::TIMESTAMP_LEN..]);
        payload
    }

    /// Returns the timestamp as a [`SystemTime`], exact to 1/256 s.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + KSUID_EPOCH + Duration::from_nanos(self.timestamp() * NANOS_PER_UNIT)
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
    #[must_use]
    pub fn encode(&self) -> String {
        let buf = encode_base62(&self.bytes);
        // SAFETY: base62 output is always valid ASCII
        unsafe { String::from_utf8_unchecked(buf.to_vec()) }
    }

    /// Decodes a 27-character base62 string back into an identifier.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`crate::Ksuid::decode`].
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = decode_base62(encoded)?;
        Ok(Self { bytes })
    }
}

impl fmt::Display for KsuidMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.encode().fmt(f)
    }
}

impl fmt::Debug for KsuidMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KsuidMs")
            .field("timestamp", &self.timestamp())
            .field("payload", &format_args!("{}", HexPayload(&self.bytes[Self::TIMESTAMP_LEN..])))
            .field("base62", &format_args!("{self}"))
            .finish()
    }
}

struct HexPayload<'a>(&'a [u8]);

impl fmt::Display for HexPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl From<[u8; RAW_LEN]> for KsuidMs {
    fn from(bytes: [u8; RAW_LEN]) -> Self {
        Self { bytes }
    }
}

impl From<KsuidMs> for [u8; RAW_LEN] {
    fn from(id: KsuidMs) -> Self {
        id.bytes
    }
}

impl AsRef<[u8]> for KsuidMs {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::str::FromStr for KsuidMs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for KsuidMs {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRand;
    impl RandSource<u128> for MockRand {
        fn rand(&self) -> u128 {
            0xAB00_0000_0000_0000_0000_0000_0000_0042
        }
    }

    #[test]
    fn from_parts_splits_fields() {
        let id = KsuidMs::from_parts(0xAB_CDEF_0123, [0x5A; 15]);
        assert_eq!(id.timestamp(), 0xAB_CDEF_0123);
        assert_eq!(id.payload(), [0x5A; 15]);
    }

    #[test]
    fn encode_decode_roundtrips() {
        for id in [
            KsuidMs::MIN,
            KsuidMs::MAX,
            KsuidMs::from_parts(KsuidMs::MAX_TIMESTAMP, [0; 15]),
            KsuidMs::from_parts(12_345_678, [0xC3; 15]),
        ] {
            let encoded = id.encode();
            assert_eq!(encoded.len(), KsuidMs::ENCODED_LEN);
            assert_eq!(KsuidMs::decode(&encoded).unwrap(), id);
        }
    }

    #[test]
    fn shares_the_envelope_with_ksuid() {
        // Same bytes, same string: only the field split differs.
        assert_eq!(KsuidMs::MAX.encode(), "aWgEPTl1tmebfsQzFP4bxwgy80V");
        assert_eq!(KsuidMs::MIN.encode(), "000000000000000000000000000");
    }

    #[test]
    fn from_datetime_rounds_to_nearest_tick() {
        let epoch = UNIX_EPOCH + KSUID_EPOCH;

        let id = KsuidMs::from_datetime_and_rand(epoch, &MockRand).unwrap();
        assert_eq!(id.timestamp(), 0);

        // 5 ms is 1.28 ticks; rounds to 1.
        let id =
            KsuidMs::from_datetime_and_rand(epoch + Duration::from_millis(5), &MockRand).unwrap();
        assert_eq!(id.timestamp(), 1);

        // One full second is exactly 256 ticks.
        let id =
            KsuidMs::from_datetime_and_rand(epoch + Duration::from_secs(1), &MockRand).unwrap();
        assert_eq!(id.timestamp(), 256);
    }

    #[test]
    fn from_datetime_payload_drops_leading_byte() {
        let epoch = UNIX_EPOCH + KSUID_EPOCH;
        let id = KsuidMs::from_datetime_and_rand(epoch, &MockRand).unwrap();
        let mut expected = [0_u8; 15];
        expected[14] = 0x42;
        assert_eq!(id.payload(), expected);
    }

    #[test]
    fn from_datetime_rejects_out_of_range() {
        assert!(matches!(
            KsuidMs::from_datetime(UNIX_EPOCH),
            Err(Error::TimestampOutOfRange { unix_secs: 0 })
        ));

        let past_end = UNIX_EPOCH + KSUID_EPOCH + Duration::from_secs(1 << 33);
        assert!(matches!(
            KsuidMs::from_datetime(past_end),
            Err(Error::TimestampOutOfRange { .. })
        ));
    }

    #[test]
    fn datetime_roundtrips_through_ticks() {
        let epoch = UNIX_EPOCH + KSUID_EPOCH;
        let dt = epoch + Duration::from_secs(42);
        let id = KsuidMs::from_datetime_and_rand(dt, &MockRand).unwrap();
        assert_eq!(id.datetime(), dt);
    }

    #[test]
    fn ordering_follows_timestamp() {
        let older = KsuidMs::from_parts(100, [0xFF; 15]);
        let newer = KsuidMs::from_parts(101, [0x00; 15]);
        assert!(older < newer);
        assert!(older.encode() < newer.encode());
    }
}
