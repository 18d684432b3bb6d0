use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::seismic::header::bytes;
use crate::seismic::{AmplitudeScale, Result, SectionError};
/// Which trace header word labels the horizontal axis of the section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisField {
    X,
    Y,
    #[default]
    Cdp,
    Shot,
}
impl AxisField {
    pub fn label(self) -> &'static str {
        match self {
            AxisField::X => "X",
            AxisField::Y => "Y",
            AxisField::Cdp => "CDP",
            AxisField::Shot => "Shot Point",
        }
    }
}
/// 1-based trace header bytes for the coordinate words. Surveys that
/// store coordinates in non-standard slots override these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderBytes {
    pub x: usize,
    pub y: usize,
    pub cdp: usize,
    pub shot: usize,
}
impl Default for HeaderBytes {
    fn default() -> Self {
        Self {
            x: bytes::SOURCE_X,
            y: bytes::SOURCE_Y,
            cdp: bytes::CDP,
            shot: bytes::ENERGY_SOURCE_POINT,
        }
    }
}
impl HeaderBytes {
    pub fn byte_for(&self, field: AxisField) -> usize {
        match field {
            AxisField::X => self.x,
            AxisField::Y => self.y,
            AxisField::Cdp => self.cdp,
            AxisField::Shot => self.shot,
        }
    }
}
/// Figure size in inches, converted to pixels at `dpi`. Deserialized
/// sizes are clamped to the same ranges as `PlotSize::new`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlotSizeFields")]
pub struct PlotSize {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
}
#[derive(Deserialize)]
#[serde(default)]
struct PlotSizeFields {
    width_in: f32,
    height_in: f32,
    dpi: f32,
}
impl Default for PlotSizeFields {
    fn default() -> Self {
        let size = PlotSize::default();
        Self {
            width_in: size.width_in,
            height_in: size.height_in,
            dpi: size.dpi,
        }
    }
}
impl From<PlotSizeFields> for PlotSize {
    fn from(fields: PlotSizeFields) -> Self {
        PlotSize {
            width_in: fields.width_in,
            height_in: fields.height_in,
            dpi: fields.dpi,
        }
        .clamped()
    }
}
impl PlotSize {
    pub const WIDTH_RANGE: (f32, f32) = (8.0, 30.0);
    pub const HEIGHT_RANGE: (f32, f32) = (4.0, 20.0);
    pub const DPI_RANGE: (f32, f32) = (50.0, 300.0);
    pub fn new(width_in: f32, height_in: f32) -> Self {
        Self {
            width_in,
            height_in,
            ..Self::default()
        }
        .clamped()
    }
    /// Spectrum figure: fixed 14 x 9 inches regardless of the section size.
    pub fn spectrum() -> Self {
        Self {
            width_in: 14.0,
            height_in: 9.0,
            ..Self::default()
        }
    }
    /// Pull every dimension into its range; NaN falls back to the default.
    pub fn clamped(self) -> Self {
        let fallback = Self::default();
        let fit = |v: f32, (lo, hi): (f32, f32), default: f32| {
            if v.is_nan() {
                default
            } else {
                v.clamp(lo, hi)
            }
        };
        Self {
            width_in: fit(self.width_in, Self::WIDTH_RANGE, fallback.width_in),
            height_in: fit(self.height_in, Self::HEIGHT_RANGE, fallback.height_in),
            dpi: fit(self.dpi, Self::DPI_RANGE, fallback.dpi),
        }
    }
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }
    fn validate(&self, name: &str) -> Result<()> {
        if !(self.dpi > 0.0) || !self.dpi.is_finite() {
            return Err(SectionError::Config(format!(
                "{name} dpi must be positive, got {}",
                self.dpi
            )));
        }
        let (w, h) = self.pixels();
        if w == 0 || h == 0 {
            return Err(SectionError::Config(format!(
                "{name} size {w}x{h} px is empty"
            )));
        }
        Ok(())
    }
}
impl Default for PlotSize {
    fn default() -> Self {
        Self {
            width_in: 15.0,
            height_in: 8.0,
            dpi: 100.0,
        }
    }
}
/// Everything the viewer needs besides the file itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub header_bytes: HeaderBytes,
    pub axis: AxisField,
    pub plot: PlotSize,
    pub spectrum_plot: PlotSize,
    pub amplitude: AmplitudeScale,
}
impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            header_bytes: HeaderBytes::default(),
            axis: AxisField::default(),
            plot: PlotSize::default(),
            spectrum_plot: PlotSize::spectrum(),
            amplitude: AmplitudeScale::default(),
        }
    }
}
impl ViewerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ViewerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn coord_byte(&self) -> usize {
        self.header_bytes.byte_for(self.axis)
    }
    pub fn validate(&self) -> Result<()> {
        self.plot.validate("plot")?;
        self.spectrum_plot.validate("spectrum plot")
    }
    /// Copy with both figure sizes pulled into range.
    pub fn clamped(&self) -> Self {
        Self {
            plot: self.plot.clamped(),
            spectrum_plot: self.spectrum_plot.clamped(),
            ..self.clone()
        }
    }
}
