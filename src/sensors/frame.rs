//! Serial frame parser.
//!
//! Wire format, one sample per line:
//!
//! ```text
//! <soil_moisture> <water_tank_level> <overflow>\r\n
//! ```
//!
//! Reads are not aligned to lines: a chunk may hold a partial line or
//! several lines. Only the first (oldest) line of a chunk is used; the rest
//! is discarded rather than carried into the next read.

use heapless::Vec;

use crate::error::ParseError;

const LINE_TERMINATOR: &str = "\r\n";
const FIELD_COUNT: usize = 3;

/// One validated sample from the sensor board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    pub soil_moisture: u32,
    pub water_tank_level: u32,
    /// Float switch in the plant saucer; `true` = standing water.
    pub overflow: bool,
}

/// Parse one raw chunk into a [`Reading`].
///
/// Tokens past the third are ignored. Negative values are rejected as
/// [`ParseError::Malformed`]; any non-zero overflow token counts as set.
pub fn parse(raw: &[u8]) -> Result<Reading, ParseError> {
    let text = core::str::from_utf8(raw).map_err(|_| ParseError::Encoding)?;
    let line = text.split(LINE_TERMINATOR).next().unwrap_or_default();

    let mut fields: Vec<u32, FIELD_COUNT> = Vec::new();
    for token in line.split_whitespace().take(FIELD_COUNT) {
        let value = token.parse::<u32>().map_err(|_| ParseError::Malformed)?;
        if fields.push(value).is_err() {
            break;
        }
    }

    match fields.as_slice() {
        &[soil_moisture, water_tank_level, overflow] => Ok(Reading {
            soil_moisture,
            water_tank_level,
            overflow: overflow != 0,
        }),
        _ => Err(ParseError::Incomplete),
    }
}
