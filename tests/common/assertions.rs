//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use ambilight::services::{parse_fixed_text, FIXED_TEXT_LEN};
use zone_color::{FramePayload, Rgb};

/// Assert `bytes` is a well-formed fixed-text payload carrying `expected`
pub fn assert_fixed_text(bytes: &[u8], expected: [Rgb; 6]) {
    assert_eq!(
        bytes.len(),
        FIXED_TEXT_LEN,
        "Expected {FIXED_TEXT_LEN} bytes, got {:?}",
        String::from_utf8_lossy(bytes)
    );
    let text = std::str::from_utf8(bytes).expect("fixed-text payload is not UTF-8");
    let colors = parse_fixed_text(text).expect("fixed-text payload does not parse");
    assert_eq!(colors, expected);
}

/// Assert every zone of `payload` has `expected` as its color
pub fn assert_all_zones(payload: &FramePayload, expected: Rgb) {
    assert_eq!(payload.colors(), [expected; 6]);
}

/// Assert `bytes` is a structured payload carrying `expected`
pub fn assert_structured(bytes: &[u8], expected: [Rgb; 6]) {
    let json: serde_json::Value = serde_json::from_slice(bytes).expect("payload is not JSON");
    let records = json.as_array().expect("payload is not a JSON array");
    assert_eq!(records.len(), 6);

    for (i, (record, color)) in records.iter().zip(expected).enumerate() {
        assert_eq!(
            (
                record["R"].as_u64(),
                record["G"].as_u64(),
                record["B"].as_u64(),
                record["A"].as_u64()
            ),
            (
                Some(color.r as u64),
                Some(color.g as u64),
                Some(color.b as u64),
                Some(255)
            ),
            "zone {i}"
        );
    }
}
