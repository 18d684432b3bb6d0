//! Standard (rev 1) SEG-Y trace header word layout.
//!
//! Byte positions are 1-based, as they are quoted in the SEG-Y standard
//! and in every processing package's header dump.
use crate::seismic::error::{Result, SectionError};
/// Size of each trace header block in bytes.
pub const TRACE_HEADER_LEN: usize = 240;
/// Well-known header bytes.
pub mod bytes {
    pub const ENERGY_SOURCE_POINT: usize = 17;
    pub const CDP: usize = 21;
    pub const SOURCE_X: usize = 73;
    pub const SOURCE_Y: usize = 77;
    pub const DELAY_RECORDING_TIME: usize = 109;
    pub const SAMPLE_COUNT: usize = 115;
    pub const SAMPLE_INTERVAL: usize = 117;
}
/// (start byte, width) of every word in the trace header.
const TRACE_HEADER_WORDS: &[(usize, usize)] = &[
    (1, 4),
    (5, 4),
    (9, 4),
    (13, 4),
    (17, 4),
    (21, 4),
    (25, 4),
    (29, 2),
    (31, 2),
    (33, 2),
    (35, 2),
    (37, 4),
    (41, 4),
    (45, 4),
    (49, 4),
    (53, 4),
    (57, 4),
    (61, 4),
    (65, 4),
    (69, 2),
    (71, 2),
    (73, 4),
    (77, 4),
    (81, 4),
    (85, 4),
    (89, 2),
    (91, 2),
    (93, 2),
    (95, 2),
    (97, 2),
    (99, 2),
    (101, 2),
    (103, 2),
    (105, 2),
    (107, 2),
    (109, 2),
    (111, 2),
    (113, 2),
    (115, 2),
    (117, 2),
    (119, 2),
    (121, 2),
    (123, 2),
    (125, 2),
    (127, 2),
    (129, 2),
    (131, 2),
    (133, 2),
    (135, 2),
    (137, 2),
    (139, 2),
    (141, 2),
    (143, 2),
    (145, 2),
    (147, 2),
    (149, 2),
    (151, 2),
    (153, 2),
    (155, 2),
    (157, 2),
    (159, 2),
    (161, 2),
    (163, 2),
    (165, 2),
    (167, 2),
    (169, 2),
    (171, 2),
    (173, 2),
    (175, 2),
    (177, 2),
    (179, 2),
    (181, 4),
    (185, 4),
    (189, 4),
    (193, 4),
    (197, 4),
    (201, 2),
    (203, 2),
    (205, 4),
    (209, 2),
    (211, 2),
    (213, 2),
    (215, 2),
    (217, 2),
    (219, 4),
    (223, 2),
    (225, 4),
    (229, 2),
    (231, 2),
    (233, 4),
    (237, 4),
];
/// Width in bytes of the header word starting at `byte`.
pub fn word_width(byte: usize) -> Result<usize> {
    if byte == 0 || byte > TRACE_HEADER_LEN {
        return Err(SectionError::HeaderField {
            byte,
            reason: "outside the 240-byte trace header",
        });
    }
    TRACE_HEADER_WORDS
        .binary_search_by_key(&byte, |&(start, _)| start)
        .map(|idx| TRACE_HEADER_WORDS[idx].1)
        .map_err(|_| SectionError::HeaderField {
            byte,
            reason: "not the first byte of a header word",
        })
}
/// Decode the big-endian signed word at 1-based `byte` from a raw header block.
pub fn read_word(block: &[u8], byte: usize) -> Result<i32> {
    let width = word_width(byte)?;
    let start = byte - 1;
    let raw = block
        .get(start..start + width)
        .ok_or(SectionError::HeaderField {
            byte,
            reason: "header block is truncated",
        })?;
    Ok(match width {
        2 => i16::from_be_bytes([raw[0], raw[1]]) as i32,
        _ => i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn widths_follow_the_standard_table() {
        assert_eq!(word_width(bytes::CDP).unwrap(), 4);
        assert_eq!(word_width(bytes::SAMPLE_INTERVAL).unwrap(), 2);
        assert_eq!(word_width(237).unwrap(), 4);
    }
    #[test]
    fn rejects_bytes_outside_or_inside_words() {
        assert!(matches!(
            word_width(0),
            Err(SectionError::HeaderField { byte: 0, .. })
        ));
        assert!(matches!(
            word_width(241),
            Err(SectionError::HeaderField { byte: 241, .. })
        ));
        assert!(matches!(
            word_width(74),
            Err(SectionError::HeaderField { byte: 74, .. })
        ));
    }
    #[test]
    fn reads_signed_big_endian_words() {
        let mut block = vec![0u8; TRACE_HEADER_LEN];
        block[20..24].copy_from_slice(&(-1234i32).to_be_bytes());
        block[108..110].copy_from_slice(&(-7i16).to_be_bytes());
        assert_eq!(read_word(&block, bytes::CDP).unwrap(), -1234);
        assert_eq!(read_word(&block, bytes::DELAY_RECORDING_TIME).unwrap(), -7);
    }
}
