// src/seismic/mod.rs
pub mod ebcdic;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod header;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod scale;
pub mod section;
pub mod spectrum;
// 公开导出常用类型，方便外部调用
pub use error::{Result, SectionError};
pub use pipeline::{SectionViewer, SpectrumArtifact, ViewerReport};
pub use reader::{SampleFormat, TraceFile};
pub use render::{render_section_png, render_spectrum_png, seismic_colormap, PlotStyle};
pub use scale::{compute_bounds, AmplitudeScale, ScaleBounds, ScaleMode};
pub use section::{assemble, Section};
pub use spectrum::{compute_spectrum, rfft_frequencies, AverageSpectrum};
