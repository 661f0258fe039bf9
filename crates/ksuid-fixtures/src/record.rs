use ksuid::Ksuid;
use serde::{Deserialize, Serialize};

/// One line of the fixture file.
///
/// Field order is the wire contract: consuming test suites parse
/// line-delimited JSON objects with exactly these keys. `timestamp` is the
/// identifier's epoch-relative seconds field, `payload` is 32 uppercase hex
/// characters, and `ksuid` is the 27-character base62 encoding that any
/// conforming implementation must reproduce from the first two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub timestamp: u32,
    pub payload: String,
    pub ksuid: String,
}

impl FixtureRecord {
    pub fn new(id: &Ksuid) -> Self {
        Self {
            timestamp: id.timestamp(),
            payload: hex::encode_upper(id.payload()),
            ksuid: id.encode(),
        }
    }
}
