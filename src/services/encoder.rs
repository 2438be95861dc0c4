use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

use zone_color::{FramePayload, Rgb, ZoneColor, ZONE_COUNT};

use crate::error::EncodeError;

/// Length of one `/{i}:R{RRR}G{GGG}B{BBB}` fragment
const FRAGMENT_LEN: usize = 15;

/// Length of a complete fixed-text payload
pub const FIXED_TEXT_LEN: usize = FRAGMENT_LEN * ZONE_COUNT;

/// Wire format for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// JSON array of six `{"R","G","B","A"}` records
    Structured,
    /// 90 ASCII bytes, six zero-padded fragments
    #[default]
    FixedText,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Structured => write!(f, "structured"),
            Encoding::FixedText => write!(f, "fixed-text"),
        }
    }
}

/// One color record in the structured encoding
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
struct WireColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Rgb> for WireColor {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: Rgb::ALPHA,
        }
    }
}

/// Serializes frame payloads for the light controller
#[derive(Debug, Clone, Copy, Default)]
pub struct WireEncoder {
    encoding: Encoding,
}

impl WireEncoder {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Encode one payload.
    ///
    /// Ignored zones carry their placeholder in the structured encoding and
    /// are always `R000G000B000` in the fixed text.
    pub fn encode(&self, payload: &FramePayload) -> Result<Vec<u8>, EncodeError> {
        match self.encoding {
            Encoding::Structured => encode_structured(payload),
            Encoding::FixedText => Ok(encode_fixed_text(payload).into_bytes()),
        }
    }
}

/// JSON array of six color records in zone order
pub fn encode_structured(payload: &FramePayload) -> Result<Vec<u8>, EncodeError> {
    let records: Vec<WireColor> = payload.colors().into_iter().map(WireColor::from).collect();
    Ok(serde_json::to_vec(&records)?)
}

/// `/0:R…G…B…/1:…/5:…`, every channel zero-padded to three digits.
/// Ignored zones are sent as black whatever their placeholder.
pub fn encode_fixed_text(payload: &FramePayload) -> String {
    let mut out = String::with_capacity(FIXED_TEXT_LEN);
    for (zone, color) in payload.iter() {
        let c = match color {
            ZoneColor::Published(c) => c,
            ZoneColor::Ignored(_) => Rgb::BLACK,
        };
        // Writing to a String cannot fail
        let _ = write!(out, "/{}:R{:03}G{:03}B{:03}", zone.index(), c.r, c.g, c.b);
    }
    out
}

/// Decode a fixed-text payload back into six colors
pub fn parse_fixed_text(text: &str) -> Result<[Rgb; ZONE_COUNT], EncodeError> {
    let bytes = text.as_bytes();
    if bytes.len() != FIXED_TEXT_LEN {
        return Err(EncodeError::Malformed(format!(
            "expected {FIXED_TEXT_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut colors = [Rgb::BLACK; ZONE_COUNT];
    for (i, fragment) in bytes.chunks_exact(FRAGMENT_LEN).enumerate() {
        colors[i] = parse_fragment(i, fragment)?;
    }
    Ok(colors)
}

fn parse_fragment(index: usize, fragment: &[u8]) -> Result<Rgb, EncodeError> {
    let malformed = |what: &str| EncodeError::Malformed(format!("fragment {index}: {what}"));

    if fragment[0] != b'/' || fragment[2] != b':' {
        return Err(malformed("expected '/i:' prefix"));
    }
    if fragment[1] != b'0' + index as u8 {
        return Err(malformed("zone index out of order"));
    }

    let channel = |tag: u8, at: usize| -> Result<u8, EncodeError> {
        if fragment[at] != tag {
            return Err(malformed(&format!("expected '{}'", tag as char)));
        }
        let digits = &fragment[at + 1..at + 4];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(malformed("channel is not three digits"));
        }
        let value = digits
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
        u8::try_from(value).map_err(|_| malformed(&format!("channel value {value} exceeds 255")))
    };

    Ok(Rgb::new(channel(b'R', 3)?, channel(b'G', 7)?, channel(b'B', 11)?))
}
