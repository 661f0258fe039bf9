//! Cross-implementation conformance checks against the checked-in fixture
//! file.
//!
//! Each line of `fixtures/test_ksuids.txt` is a `(timestamp, payload, ksuid)`
//! triple produced by a reference implementation, with timestamps evenly
//! spaced across the full valid range. The encoder must reproduce every
//! `ksuid` field exactly from its parts, and the decoder must recover the
//! parts exactly from the string. Regenerate with the `ksuid-fixtures`
//! binary.

use ksuid::Ksuid;
use serde::Deserialize;

const FIXTURES: &str = include_str!("fixtures/test_ksuids.txt");

#[derive(Debug, Deserialize)]
struct FixtureRecord {
    timestamp: u32,
    payload: String,
    ksuid: String,
}

fn records() -> Vec<FixtureRecord> {
    FIXTURES
        .lines()
        .map(|line| serde_json::from_str(line).expect("malformed fixture line"))
        .collect()
}

fn payload_bytes(record: &FixtureRecord) -> [u8; Ksuid::PAYLOAD_LEN] {
    let bytes = hex::decode(&record.payload).expect("malformed fixture payload");
    bytes.as_slice().try_into().expect("fixture payload length")
}

#[test]
fn fixture_file_spans_the_full_timestamp_range() {
    let records = records();
    assert_eq!(records.len(), 1000);
    assert_eq!(records.first().unwrap().timestamp, 0);
    assert_eq!(records.last().unwrap().timestamp, u32::MAX);
}

#[test]
fn encoder_reproduces_every_fixture() {
    for record in records() {
        let id = Ksuid::from_parts(record.timestamp, payload_bytes(&record));
        assert_eq!(
            id.encode(),
            record.ksuid,
            "encode mismatch at timestamp {}",
            record.timestamp
        );
    }
}

#[test]
fn decoder_recovers_every_fixture() {
    for record in records() {
        let id = Ksuid::decode(&record.ksuid).expect("fixture ksuid must decode");
        assert_eq!(id.timestamp(), record.timestamp);
        assert_eq!(id.payload(), payload_bytes(&record));
        // And the re-encoding is byte-identical.
        assert_eq!(id.encode(), record.ksuid);
    }
}

#[test]
fn fixture_encodings_are_fixed_width_and_sorted() {
    let records = records();
    for record in &records {
        assert_eq!(record.ksuid.len(), Ksuid::ENCODED_LEN);
    }
    for pair in records.windows(2) {
        assert!(
            pair[0].ksuid.as_bytes() < pair[1].ksuid.as_bytes(),
            "fixture encodings out of order at timestamp {}",
            pair[1].timestamp
        );
    }
}
