use std::path::Path;
use log::{info, warn};
use crate::config::ViewerConfig;
use crate::seismic::error::Result;
use crate::seismic::reader::TraceFile;
use crate::seismic::render::{render_section_png, render_spectrum_png, PlotStyle};
use crate::seismic::scale::ScaleBounds;
use crate::seismic::section::{assemble, Section};
use crate::seismic::spectrum::{compute_spectrum, AverageSpectrum};
/// Spectrum numbers together with their rendered plot.
pub struct SpectrumArtifact {
    pub spectrum: AverageSpectrum,
    pub png: Vec<u8>,
}
/// Everything produced for one file.
pub struct ViewerReport {
    pub trace_count: usize,
    pub sample_count: usize,
    pub textual_header: String,
    pub section: Section,
    pub bounds: ScaleBounds,
    pub section_png: Vec<u8>,
    /// Independent of the section: a short trace still gets its image.
    pub spectrum: Result<SpectrumArtifact>,
}
/// Runs a file from raw bytes to rendered artifacts under one configuration.
pub struct SectionViewer {
    config: ViewerConfig,
}
impl SectionViewer {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clamped(),
        })
    }
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<ViewerReport> {
        let path = path.as_ref();
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = TraceFile::open(path)?;
        self.run(&file, &title)
    }
    /// Uploaded bytes are staged to a temporary file that is removed once
    /// every read has completed.
    pub fn run_bytes(&self, name: &str, data: &[u8]) -> Result<ViewerReport> {
        let file = TraceFile::from_bytes(data)?;
        self.run(&file, name)
    }
    pub fn run(&self, file: &TraceFile, title: &str) -> Result<ViewerReport> {
        info!(
            "{title}: {} traces, {} samples per trace",
            file.trace_count(),
            file.sample_count()
        );
        let textual_header = file.textual_header();
        let section = assemble(file, self.config.coord_byte())?;
        let bounds = self.config.amplitude.bounds_for(&section.amplitudes);
        let (width, height) = self.config.plot.pixels();
        let section_png = render_section_png(
            &section,
            bounds,
            self.config.axis.label(),
            title,
            PlotStyle::with_size(width, height),
        )?;
        let spectrum = self.spectrum_artifact(&section);
        if let Err(err) = &spectrum {
            warn!("{title}: spectrum unavailable: {err}");
        }
        Ok(ViewerReport {
            trace_count: file.trace_count(),
            sample_count: file.sample_count(),
            textual_header,
            section,
            bounds,
            section_png,
            spectrum,
        })
    }
    fn spectrum_artifact(&self, section: &Section) -> Result<SpectrumArtifact> {
        let dt = section.sample_interval_seconds()?;
        let spectrum = compute_spectrum(&section.amplitudes, dt)?;
        let (width, height) = self.config.spectrum_plot.pixels();
        let png = render_spectrum_png(&spectrum, PlotStyle::with_size(width, height))?;
        Ok(SpectrumArtifact { spectrum, png })
    }
}
