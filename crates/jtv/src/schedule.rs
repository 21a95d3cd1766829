//! `.ndx` schedule block decoding.
//!
//! Layout:
//!
//! ```text
//! count                    u16 little-endian
//! count x 12-byte record:
//!   reserved               u16, always 0 in practice
//!   start                  u64 little-endian FILETIME ticks
//!   title offset           u16, byte offset of the title in the `.pdt` block
//! ```

use std::io::{self, Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::FormatError;
use crate::filetime;

/// Size of the leading record count.
const COUNT_SIZE: usize = 2;

/// Size of a single schedule record.
pub const SCHEDULE_RECORD_SIZE: usize = 12;

/// One raw `.ndx` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub reserved: u16,
    /// FILETIME ticks of the boundary.
    pub ticks: u64,
    /// Offset into the paired title block. Not used for correlation,
    /// titles are matched by position.
    pub title_offset: u16,
}

impl ScheduleRecord {
    /// Parses one 12-byte record from a reader.
    pub fn parse<R: Read>(reader: &mut R) -> io::Result<Self> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        let ticks = reader.read_u64::<LittleEndian>()?;
        let title_offset = reader.read_u16::<LittleEndian>()?;
        Ok(Self {
            reserved,
            ticks,
            title_offset,
        })
    }

    /// The boundary as a UTC timestamp.
    pub fn time(&self) -> DateTime<Utc> {
        filetime::from_ticks(self.ticks)
    }
}

/// Parses every record declared by the block's count field.
///
/// Bytes past the last declared record are ignored.
pub fn parse_records(data: &[u8]) -> Result<Vec<ScheduleRecord>, FormatError> {
    if data.len() < COUNT_SIZE {
        return Err(FormatError::truncated("record count", COUNT_SIZE, data.len()));
    }

    let mut reader = Cursor::new(data);
    let count = reader
        .read_u16::<LittleEndian>()
        .map_err(|_| FormatError::truncated("record count", COUNT_SIZE, data.len()))?
        as usize;

    let needed = COUNT_SIZE + count * SCHEDULE_RECORD_SIZE;
    if data.len() < needed {
        return Err(FormatError::truncated("schedule records", needed, data.len()));
    }

    (0..count)
        .map(|_| {
            ScheduleRecord::parse(&mut reader)
                .map_err(|_| FormatError::truncated("schedule records", needed, data.len()))
        })
        .collect()
}

/// Decodes a schedule block into its ordered boundaries.
///
/// Boundaries are expected to be non-decreasing; a step backwards is logged
/// but kept as-is.
pub fn decode_schedule(data: &[u8]) -> Result<Vec<DateTime<Utc>>, FormatError> {
    let boundaries: Vec<_> = parse_records(data)?
        .iter()
        .map(ScheduleRecord::time)
        .collect();

    if let Some(index) = boundaries.windows(2).position(|pair| pair[1] < pair[0]) {
        warn!(
            index = index + 1,
            "schedule boundary earlier than its predecessor"
        );
    }

    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetime::TICKS_PER_SECOND;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn encode_block(ticks: &[u64]) -> Vec<u8> {
        let mut buffer = (ticks.len() as u16).to_le_bytes().to_vec();
        for (index, tick) in ticks.iter().enumerate() {
            buffer.extend_from_slice(&[0, 0]);
            buffer.extend_from_slice(&tick.to_le_bytes());
            buffer.extend_from_slice(&(index as u16 * 7).to_le_bytes());
        }
        buffer
    }

    const MORNING_TICKS: u64 = 129_439_476_000_000_000;

    #[test]
    fn test_decode_schedule() {
        let half_hour = 1800 * TICKS_PER_SECOND;
        let data = encode_block(&[MORNING_TICKS, MORNING_TICKS + half_hour]);

        let boundaries = decode_schedule(&data).unwrap();
        assert_eq!(
            boundaries,
            vec![
                Utc.with_ymd_and_hms(2011, 3, 7, 5, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2011, 3, 7, 5, 30, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_record_fields() {
        let data = encode_block(&[1, 2, 3]);
        let records = parse_records(&data).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].reserved, 0);
        assert_eq!(records[2].ticks, 3);
        assert_eq!(records[2].title_offset, 14);
    }

    #[test]
    fn test_reserved_and_offset_bytes_are_ignored() {
        let mut data = encode_block(&[MORNING_TICKS]);
        data[2] = 0xFF;
        data[3] = 0xFF;
        data[12] = 0xAB;
        data[13] = 0xCD;

        let boundaries = decode_schedule(&data).unwrap();
        assert_eq!(boundaries, vec![filetime::from_ticks(MORNING_TICKS)]);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(decode_schedule(&[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = encode_block(&[10, 20]);
        data.extend_from_slice(&[0xEE; 5]);
        assert_eq!(parse_records(&data).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_count() {
        assert_eq!(
            decode_schedule(&[1]),
            Err(FormatError::Truncated {
                context: "record count",
                needed: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_truncated_records() {
        let mut data = encode_block(&[10, 20]);
        data.truncate(data.len() - 1);

        assert_eq!(
            decode_schedule(&data),
            Err(FormatError::Truncated {
                context: "schedule records",
                needed: 26,
                available: 25,
            })
        );
    }

    #[test]
    fn test_out_of_order_boundaries_are_kept() {
        let data = encode_block(&[20, 10]);
        let boundaries = decode_schedule(&data).unwrap();
        assert!(boundaries[1] < boundaries[0]);
    }

    proptest! {
        #[test]
        fn prop_count_matches_declared(ticks in proptest::collection::vec(any::<u64>(), 0..64)) {
            let data = encode_block(&ticks);
            let boundaries = decode_schedule(&data).unwrap();

            prop_assert_eq!(boundaries.len(), ticks.len());
            for (boundary, tick) in boundaries.iter().zip(&ticks) {
                prop_assert_eq!(filetime::to_ticks(boundary), Some(*tick));
            }
        }
    }
}
