//! Synthetic SEG-Y images for tests.
use crate::seismic::header::TRACE_HEADER_LEN;
use crate::seismic::reader::{SampleFormat, BINARY_HEADER_LEN, TEXTUAL_HEADER_LEN};
pub struct SegyBuilder {
    sample_count: usize,
    interval_us: i16,
    format: SampleFormat,
    text: Vec<u8>,
    traces: Vec<(Vec<(usize, i32)>, Vec<f32>)>,
}
impl SegyBuilder {
    pub fn new(sample_count: usize, interval_us: i16) -> Self {
        let mut text = vec![b' '; TEXTUAL_HEADER_LEN];
        text[..3].copy_from_slice(b"C 1");
        Self {
            sample_count,
            interval_us,
            format: SampleFormat::IeeeFloat32,
            text,
            traces: Vec::new(),
        }
    }
    pub fn format(mut self, format: SampleFormat) -> Self {
        self.format = format;
        self
    }
    /// Replace the textual header with `line` encoded as EBCDIC, blank padded.
    pub fn ebcdic_text(mut self, line: &str) -> Self {
        self.text = vec![0x40; TEXTUAL_HEADER_LEN];
        for (slot, ch) in self.text.iter_mut().zip(line.bytes()) {
            *slot = ascii_to_ebcdic(ch);
        }
        self
    }
    pub fn trace(self, samples: Vec<f32>) -> Self {
        self.trace_with_header(&[], samples)
    }
    /// `words` are (1-based byte, value) pairs written into the trace header.
    pub fn trace_with_header(mut self, words: &[(usize, i32)], samples: Vec<f32>) -> Self {
        self.traces.push((words.to_vec(), samples));
        self
    }
    pub fn build(self) -> Vec<u8> {
        let mut out = self.text.clone();
        let mut binary = vec![0u8; BINARY_HEADER_LEN];
        binary[16..18].copy_from_slice(&self.interval_us.to_be_bytes());
        binary[20..22].copy_from_slice(&(self.sample_count as i16).to_be_bytes());
        binary[24..26].copy_from_slice(&self.format.code().to_be_bytes());
        out.extend_from_slice(&binary);
        for (words, samples) in &self.traces {
            let mut block = vec![0u8; TRACE_HEADER_LEN];
            for &(byte, value) in words {
                let start = byte - 1;
                match crate::seismic::header::word_width(byte) {
                    Ok(2) => block[start..start + 2].copy_from_slice(&(value as i16).to_be_bytes()),
                    _ => block[start..start + 4].copy_from_slice(&value.to_be_bytes()),
                }
            }
            out.extend_from_slice(&block);
            for &v in samples.iter().take(self.sample_count) {
                out.extend_from_slice(&encode(self.format, v));
            }
        }
        out
    }
}
fn encode(format: SampleFormat, v: f32) -> Vec<u8> {
    match format {
        SampleFormat::IbmFloat32 => f32_to_ibm(v).to_be_bytes().to_vec(),
        SampleFormat::Int32 => (v as i32).to_be_bytes().to_vec(),
        SampleFormat::Int16 => (v as i16).to_be_bytes().to_vec(),
        SampleFormat::IeeeFloat32 => v.to_be_bytes().to_vec(),
        SampleFormat::IeeeFloat64 => (v as f64).to_be_bytes().to_vec(),
        SampleFormat::Int8 => vec![v as i8 as u8],
    }
}
fn f32_to_ibm(v: f32) -> u32 {
    if v == 0.0 {
        return 0;
    }
    let sign = if v < 0.0 { 1u32 << 31 } else { 0 };
    let mut a = (v as f64).abs();
    let mut exponent = 64i32;
    while a >= 1.0 {
        a /= 16.0;
        exponent += 1;
    }
    while a < 1.0 / 16.0 {
        a *= 16.0;
        exponent -= 1;
    }
    let fraction = ((a * (1u32 << 24) as f64).round() as u32).min(0x00ff_ffff);
    sign | ((exponent as u32 & 0x7f) << 24) | fraction
}
fn ascii_to_ebcdic(ch: u8) -> u8 {
    match ch {
        b'A'..=b'I' => 0xC1 + (ch - b'A'),
        b'J'..=b'R' => 0xD1 + (ch - b'J'),
        b'S'..=b'Z' => 0xE2 + (ch - b'S'),
        b'a'..=b'i' => 0x81 + (ch - b'a'),
        b'j'..=b'r' => 0x91 + (ch - b'j'),
        b's'..=b'z' => 0xA2 + (ch - b's'),
        b'0'..=b'9' => 0xF0 + (ch - b'0'),
        b'.' => 0x4B,
        b'-' => 0x60,
        b'/' => 0x61,
        b':' => 0x7A,
        _ => 0x40,
    }
}
