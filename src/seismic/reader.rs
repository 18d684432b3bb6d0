use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use log::debug;
use tempfile::NamedTempFile;
use crate::seismic::ebcdic::{decode_textual_header, wrap_cards};
use crate::seismic::error::{Result, SectionError};
use crate::seismic::header::{self, bytes, TRACE_HEADER_LEN};
pub const TEXTUAL_HEADER_LEN: usize = 3200;
pub const BINARY_HEADER_LEN: usize = 400;
/// Used by segyio and most readers when neither header records an interval.
const FALLBACK_INTERVAL_US: i32 = 4000;
// Binary header words, as 0-based offsets into the 400-byte block.
const BIN_SAMPLE_INTERVAL: usize = 16;
const BIN_SAMPLE_COUNT: usize = 20;
const BIN_FORMAT_CODE: usize = 24;
const BIN_EXTENDED_HEADERS: usize = 304;
/// Data sample encodings accepted in the binary header format word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    IbmFloat32,
    Int32,
    Int16,
    IeeeFloat32,
    IeeeFloat64,
    Int8,
}
impl SampleFormat {
    pub fn from_code(code: i16) -> Result<Self> {
        match code {
            1 => Ok(SampleFormat::IbmFloat32),
            2 => Ok(SampleFormat::Int32),
            3 => Ok(SampleFormat::Int16),
            5 => Ok(SampleFormat::IeeeFloat32),
            6 => Ok(SampleFormat::IeeeFloat64),
            8 => Ok(SampleFormat::Int8),
            other => Err(SectionError::Format(format!(
                "unsupported data sample format code {other}"
            ))),
        }
    }
    pub fn code(self) -> i16 {
        match self {
            SampleFormat::IbmFloat32 => 1,
            SampleFormat::Int32 => 2,
            SampleFormat::Int16 => 3,
            SampleFormat::IeeeFloat32 => 5,
            SampleFormat::IeeeFloat64 => 6,
            SampleFormat::Int8 => 8,
        }
    }
    pub fn byte_width(self) -> usize {
        match self {
            SampleFormat::IeeeFloat64 => 8,
            SampleFormat::IbmFloat32 | SampleFormat::Int32 | SampleFormat::IeeeFloat32 => 4,
            SampleFormat::Int16 => 2,
            SampleFormat::Int8 => 1,
        }
    }
    /// `raw` must hold exactly `byte_width()` big-endian bytes.
    fn decode(self, raw: &[u8]) -> f32 {
        match self {
            SampleFormat::IbmFloat32 => {
                ibm_to_f32(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
            }
            SampleFormat::Int32 => i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as f32,
            SampleFormat::Int16 => i16::from_be_bytes([raw[0], raw[1]]) as f32,
            SampleFormat::IeeeFloat32 => f32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
            SampleFormat::IeeeFloat64 => f64::from_be_bytes([
                raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
            ]) as f32,
            SampleFormat::Int8 => raw[0] as i8 as f32,
        }
    }
}
/// IBM System/360 single precision: sign bit, 7-bit base-16 exponent
/// biased by 64, 24-bit fraction.
pub fn ibm_to_f32(word: u32) -> f32 {
    let fraction = word & 0x00ff_ffff;
    if fraction == 0 {
        return 0.0;
    }
    let sign = if word >> 31 == 1 { -1.0 } else { 1.0 };
    let exponent = ((word >> 24) & 0x7f) as i32 - 64;
    let mantissa = fraction as f64 / (1u32 << 24) as f64;
    (sign * mantissa * 16f64.powi(exponent)) as f32
}
fn be_i16(block: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([block[offset], block[offset + 1]])
}
/// Read-only handle over a SEG-Y file.
///
/// Geometry is parsed once on open; headers and samples are read from
/// disk on demand. The file (and a staged temporary copy, if any) is
/// released when the handle is dropped.
pub struct TraceFile {
    file: File,
    staged: Option<NamedTempFile>,
    textual_header: Vec<u8>,
    format: SampleFormat,
    sample_count: usize,
    sample_interval_us: i32,
    delay_ms: f32,
    trace_count: usize,
    first_trace_offset: u64,
}
impl TraceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let preamble = (TEXTUAL_HEADER_LEN + BINARY_HEADER_LEN) as u64;
        if file_len < preamble {
            return Err(SectionError::Format(format!(
                "file is {file_len} bytes, shorter than the {preamble}-byte SEG-Y headers"
            )));
        }
        let mut head = vec![0u8; preamble as usize];
        (&file).read_exact(&mut head)?;
        let textual_header = head[..TEXTUAL_HEADER_LEN].to_vec();
        let binary = &head[TEXTUAL_HEADER_LEN..];
        let format = SampleFormat::from_code(be_i16(binary, BIN_FORMAT_CODE))?;
        let extended = be_i16(binary, BIN_EXTENDED_HEADERS);
        if extended < 0 {
            return Err(SectionError::Format(
                "variable number of extended textual headers is not supported".into(),
            ));
        }
        let first_trace_offset = preamble + extended as u64 * TEXTUAL_HEADER_LEN as u64;
        if file_len < first_trace_offset {
            return Err(SectionError::Format(format!(
                "binary header announces {extended} extended textual headers past end of file"
            )));
        }
        let data_len = file_len - first_trace_offset;
        let first_header = if data_len >= TRACE_HEADER_LEN as u64 {
            let mut block = vec![0u8; TRACE_HEADER_LEN];
            (&file).seek(SeekFrom::Start(first_trace_offset))?;
            (&file).read_exact(&mut block)?;
            Some(block)
        } else {
            None
        };
        let first_word = |byte: usize| -> Result<i32> {
            match &first_header {
                Some(block) => header::read_word(block, byte),
                None => Ok(0),
            }
        };
        let mut sample_count = be_i16(binary, BIN_SAMPLE_COUNT) as i32;
        if sample_count <= 0 {
            sample_count = first_word(bytes::SAMPLE_COUNT)?;
        }
        if sample_count < 0 {
            return Err(SectionError::Format(format!(
                "negative samples per trace ({sample_count})"
            )));
        }
        let sample_count = sample_count as usize;
        let mut sample_interval_us = be_i16(binary, BIN_SAMPLE_INTERVAL) as i32;
        if sample_interval_us <= 0 {
            sample_interval_us = first_word(bytes::SAMPLE_INTERVAL)?;
        }
        if sample_interval_us <= 0 {
            debug!("no sample interval recorded, assuming {FALLBACK_INTERVAL_US} us");
            sample_interval_us = FALLBACK_INTERVAL_US;
        }
        let delay_ms = first_word(bytes::DELAY_RECORDING_TIME)? as f32;
        let trace_size = (TRACE_HEADER_LEN + sample_count * format.byte_width()) as u64;
        if data_len % trace_size != 0 {
            return Err(SectionError::Format(format!(
                "{data_len} bytes of trace data is not a whole number of {trace_size}-byte traces"
            )));
        }
        let trace_count = (data_len / trace_size) as usize;
        debug!(
            "opened {}: {trace_count} traces x {sample_count} samples, format {:?}, dt {sample_interval_us} us",
            path.display(),
            format
        );
        Ok(Self {
            file,
            staged: None,
            textual_header,
            format,
            sample_count,
            sample_interval_us,
            delay_ms,
            trace_count,
            first_trace_offset,
        })
    }
    /// Stage uploaded bytes in a private temporary file and open it.
    /// The temporary file lives exactly as long as the returned handle.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut staged = NamedTempFile::new()?;
        staged.write_all(data)?;
        staged.flush()?;
        let mut handle = Self::open(staged.path())?;
        handle.staged = Some(staged);
        Ok(handle)
    }
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
    pub fn sample_format(&self) -> SampleFormat {
        self.format
    }
    pub fn sample_interval_ms(&self) -> f32 {
        self.sample_interval_us as f32 / 1000.0
    }
    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }
    /// The 3200-byte textual header as 80-column lines.
    pub fn textual_header(&self) -> String {
        wrap_cards(&decode_textual_header(&self.textual_header))
    }
    /// Recording time of each sample in milliseconds.
    pub fn sample_axis(&self) -> Vec<f32> {
        let dt = self.sample_interval_ms();
        (0..self.sample_count)
            .map(|i| self.delay_ms + i as f32 * dt)
            .collect()
    }
    /// Integer header word at 1-based `byte` of trace `trace_index`.
    pub fn header_field(&self, trace_index: usize, byte: usize) -> Result<i32> {
        header::word_width(byte)?;
        let block = self.trace_header(trace_index)?;
        header::read_word(&block, byte)
    }
    pub fn trace_header(&self, trace_index: usize) -> Result<Vec<u8>> {
        let mut block = vec![0u8; TRACE_HEADER_LEN];
        self.read_at(self.trace_offset(trace_index)?, &mut block)?;
        Ok(block)
    }
    pub fn trace_samples(&self, trace_index: usize) -> Result<Vec<f32>> {
        let width = self.format.byte_width();
        let mut raw = vec![0u8; self.sample_count * width];
        let offset = self.trace_offset(trace_index)? + TRACE_HEADER_LEN as u64;
        self.read_at(offset, &mut raw)?;
        Ok(raw
            .chunks_exact(width)
            .map(|chunk| self.format.decode(chunk))
            .collect())
    }
    /// Streams traces in file order without holding the whole file in memory.
    pub fn traces(&self) -> impl Iterator<Item = Result<Vec<f32>>> + '_ {
        (0..self.trace_count).map(move |i| self.trace_samples(i))
    }
    fn trace_offset(&self, trace_index: usize) -> Result<u64> {
        if trace_index >= self.trace_count {
            return Err(SectionError::TraceIndex {
                index: trace_index,
                count: self.trace_count,
            });
        }
        let trace_size = (TRACE_HEADER_LEN + self.sample_count * self.format.byte_width()) as u64;
        Ok(self.first_trace_offset + trace_index as u64 * trace_size)
    }
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }
}
