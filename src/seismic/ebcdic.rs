//! Textual header decoding.
//!
//! SEG-Y textual headers are usually EBCDIC (code page 037), though many
//! writers emit plain ASCII. Either way the result is forty 80-column
//! card images.
/// Width of one card image in the textual header.
pub const CARD_WIDTH: usize = 80;
/// Map a single EBCDIC byte to its printable ASCII counterpart.
/// Control codes and characters with no ASCII equivalent become spaces.
fn ebcdic_to_ascii(byte: u8) -> char {
    match byte {
        0x40 => ' ',
        0x4A => '[',
        0x4B => '.',
        0x4C => '<',
        0x4D => '(',
        0x4E => '+',
        0x4F => '|',
        0x50 => '&',
        0x5A => '!',
        0x5B => '$',
        0x5C => '*',
        0x5D => ')',
        0x5E => ';',
        0x5F => '^',
        0x60 => '-',
        0x61 => '/',
        0x6A => '|',
        0x6B => ',',
        0x6C => '%',
        0x6D => '_',
        0x6E => '>',
        0x6F => '?',
        0x79 => '`',
        0x7A => ':',
        0x7B => '#',
        0x7C => '@',
        0x7D => '\'',
        0x7E => '=',
        0x7F => '"',
        0x81..=0x89 => (b'a' + (byte - 0x81)) as char,
        0x91..=0x99 => (b'j' + (byte - 0x91)) as char,
        0xA1 => '~',
        0xA2..=0xA9 => (b's' + (byte - 0xA2)) as char,
        0xBA => '[',
        0xBB => ']',
        0xC0 => '{',
        0xC1..=0xC9 => (b'A' + (byte - 0xC1)) as char,
        0xD0 => '}',
        0xD1..=0xD9 => (b'J' + (byte - 0xD1)) as char,
        0xE0 => '\\',
        0xE2..=0xE9 => (b'S' + (byte - 0xE2)) as char,
        0xF0..=0xF9 => (b'0' + (byte - 0xF0)) as char,
        _ => ' ',
    }
}
/// Cards start with 'C', which settles most files from the first byte.
/// Otherwise EBCDIC text sits above 0x7F apart from its 0x40 space.
fn looks_like_ascii(raw: &[u8]) -> bool {
    match raw.first() {
        None | Some(b'C') => return true,
        Some(0xC3) => return false,
        _ => {}
    }
    let ebcdic = raw.iter().filter(|&&b| b == 0x40 || b >= 0x80).count();
    let ascii = raw
        .iter()
        .filter(|&&b| b == b' ' || (b.is_ascii_graphic() && b != b'@'))
        .count();
    ascii >= ebcdic
}
/// Decode a raw textual header to a string, EBCDIC or ASCII.
pub fn decode_textual_header(raw: &[u8]) -> String {
    if looks_like_ascii(raw) {
        raw.iter()
            .map(|&b| {
                if b == b' ' || b.is_ascii_graphic() {
                    b as char
                } else {
                    ' '
                }
            })
            .collect()
    } else {
        raw.iter().map(|&b| ebcdic_to_ascii(b)).collect()
    }
}
/// Split decoded text into `CARD_WIDTH` column lines joined with newlines.
pub fn wrap_cards(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(CARD_WIDTH)
        .map(|card| card.iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decodes_ebcdic_card() {
        // "C 1 CLIENT" in EBCDIC
        let raw = [0xC3, 0x40, 0xF1, 0x40, 0xC3, 0xD3, 0xC9, 0xC5, 0xD5, 0xE3];
        assert_eq!(decode_textual_header(&raw), "C 1 CLIENT");
    }
    #[test]
    fn keeps_ascii_and_blanks_nul() {
        let raw = b"C 2 LINE 7\0\0";
        assert_eq!(decode_textual_header(raw), "C 2 LINE 7  ");
    }
    #[test]
    fn wraps_into_eighty_column_cards() {
        let mut text = String::from("C 1 FIRST");
        text.push_str(&" ".repeat(CARD_WIDTH - 9));
        text.push_str("C 2 SECOND");
        let wrapped = wrap_cards(&text);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines, vec!["C 1 FIRST", "C 2 SECOND"]);
    }
}
