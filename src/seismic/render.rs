use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::seismic::error::{Result, SectionError};
use crate::seismic::scale::ScaleBounds;
use crate::seismic::section::Section;
use crate::seismic::spectrum::AverageSpectrum;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub line: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 800,
            background: WHITE,
            foreground: BLACK,
            line: BLACK,
        }
    }
}
impl PlotStyle {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}
/// Diverging blue-white-red map, `t` in [0, 1]; NaN maps to white.
pub fn seismic_colormap(t: f64) -> RGBColor {
    const STOPS: [(f64, [f64; 3]); 5] = [
        (0.0, [0.0, 0.0, 0.3]),
        (0.25, [0.0, 0.0, 1.0]),
        (0.5, [1.0, 1.0, 1.0]),
        (0.75, [1.0, 0.0, 0.0]),
        (1.0, [0.5, 0.0, 0.0]),
    ];
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let upper = STOPS.iter().position(|&(at, _)| at >= t).unwrap_or(4).max(1);
    let (t0, c0) = STOPS[upper - 1];
    let (t1, c1) = STOPS[upper];
    let w = (t - t0) / (t1 - t0);
    let channel = |i: usize| ((c0[i] + (c1[i] - c0[i]) * w) * 255.0).round() as u8;
    RGBColor(channel(0), channel(1), channel(2))
}
/// Widen an empty span so a chart axis can be built over it.
fn padded(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}
/// Raster of the section: coordinate axis along the top, time increasing
/// downwards, colours clipped to `bounds`, with a colour legend on the right.
pub fn render_section_png(
    section: &Section,
    bounds: ScaleBounds,
    axis_label: &str,
    title: &str,
    style: PlotStyle,
) -> Result<Vec<u8>> {
    let (sample_count, trace_count) = section.amplitudes.dim();
    if sample_count == 0 || trace_count == 0 {
        return Err(SectionError::Plot("section has no samples".into()));
    }
    let (lo, hi) = bounds.display_range();
    let (lo, hi) = (lo as f64, hi as f64);
    let (c_min, c_max) = section.coord_extent();
    let (x0, x1) = padded(c_min as f64, c_max as f64, 0.5);
    let (t_first, t_last) = section.time_extent();
    let (t_min, t_max) = padded(t_first as f64, t_last as f64, 1.0);
    // Chart y is negated time so that the earliest sample sits on top.
    let (y0, y1) = (-t_max, -t_min);
    let mut buffer = pixel_buffer(&style)?;
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let legend_px = (style.width / 10).max(90);
        let (plot_area, legend_area) =
            root.split_horizontally(style.width.saturating_sub(legend_px) as i32);
        let label_font = ("sans-serif", 14).into_font().color(&style.foreground);
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(10)
            .caption(title, ("sans-serif", 20).into_font().color(&style.foreground))
            .set_label_area_size(LabelAreaPosition::Top, 40)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(axis_label)
            .y_desc("Time (ms)")
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{:.0}", -v))
            .label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .draw()?;
        let plotting = chart.plotting_area();
        let (px_range, py_range) = plotting.get_pixel_range();
        let pw = (px_range.end - px_range.start).max(1) as usize;
        let ph = (py_range.end - py_range.start).max(1) as usize;
        let span = hi - lo;
        for py in 0..ph {
            let s = py * sample_count / ph;
            let y = y1 - (py as f64 + 0.5) / ph as f64 * (y1 - y0);
            for px in 0..pw {
                let t = px * trace_count / pw;
                let x = x0 + (px as f64 + 0.5) / pw as f64 * (x1 - x0);
                let value = section.amplitudes[[s, t]] as f64;
                plotting.draw_pixel((x, y), &seismic_colormap((value - lo) / span))?;
            }
        }
        let mut legend = ChartBuilder::on(&legend_area)
            .margin_top(50)
            .margin_bottom(20)
            .margin_left(10)
            .margin_right(10)
            .set_label_area_size(LabelAreaPosition::Right, 60)
            .build_cartesian_2d(0f64..1f64, lo..hi)?;
        legend
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_desc("Amplitude")
            .label_style(label_font.clone())
            .axis_desc_style(label_font)
            .draw()?;
        let steps = 256usize;
        legend.draw_series((0..steps).map(|step| {
            let v0 = lo + span * step as f64 / steps as f64;
            let v1 = lo + span * (step + 1) as f64 / steps as f64;
            let t = (step as f64 + 0.5) / steps as f64;
            Rectangle::new([(0.0, v0), (1.0, v1)], seismic_colormap(t).filled())
        }))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn render_spectrum_png(spectrum: &AverageSpectrum, style: PlotStyle) -> Result<Vec<u8>> {
    if spectrum.mean_magnitude.is_empty() {
        return Err(SectionError::Plot("spectrum has no magnitudes".into()));
    }
    let mut buffer = pixel_buffer(&style)?;
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let top = magnitude_axis_top(&spectrum.mean_magnitude);
        let nyquist = spectrum.nyquist_hz();
        let right = if nyquist > 0.0 { nyquist } else { 1.0 };
        let label_font = ("sans-serif", 14).into_font().color(&style.foreground);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Average Amplitude Spectrum",
                ("sans-serif", 20).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(0f32..right, 0f32..top)?;
        chart
            .configure_mesh()
            .light_line_style(&style.foreground.mix(0.1))
            .x_desc("Frequency (Hz)")
            .y_desc("Amplitude")
            .label_style(label_font.clone())
            .axis_desc_style(label_font)
            .draw()?;
        let series = spectrum
            .frequencies_hz
            .iter()
            .cloned()
            .zip(spectrum.mean_magnitude.iter().cloned());
        chart.draw_series(LineSeries::new(series, &style.line))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Headroom above the strongest bin; an all-zero spectrum gets a unit axis.
fn magnitude_axis_top(magnitudes: &[f32]) -> f32 {
    let peak = magnitudes
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f32, |acc, v| acc.max(v));
    if peak > 0.0 {
        peak * 1.05
    } else {
        1.0
    }
}
/// Upper bound on rendered image size, about 200 MB of RGB.
const MAX_PIXELS: usize = 1 << 26;
fn pixel_buffer(style: &PlotStyle) -> Result<Vec<u8>> {
    let pixels = (style.width as usize)
        .checked_mul(style.height as usize)
        .filter(|&p| p > 0 && p <= MAX_PIXELS)
        .ok_or_else(|| {
            SectionError::Plot(format!(
                "image size {}x{} px is empty or too large",
                style.width, style.height
            ))
        })?;
    Ok(vec![0u8; pixels * 3])
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SectionError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    #[test]
    fn colormap_endpoints_and_centre() {
        assert_eq!(seismic_colormap(0.0), RGBColor(0, 0, 77));
        assert_eq!(seismic_colormap(0.5), RGBColor(255, 255, 255));
        assert_eq!(seismic_colormap(1.0), RGBColor(128, 0, 0));
        assert_eq!(seismic_colormap(f64::NAN), RGBColor(255, 255, 255));
        assert_eq!(seismic_colormap(7.0), seismic_colormap(1.0));
    }
    #[test]
    fn renders_flat_section_with_fallback_range() {
        let section = Section {
            amplitudes: Array2::zeros((10, 4)),
            coords: vec![100, 200, 300, 400],
            samples_ms: (0..10).map(|i| i as f32 * 2.0).collect(),
        };
        let bounds = ScaleBounds { min: 0.0, max: 0.0 };
        let png = render_section_png(&section, bounds, "CDP", "line.sgy", PlotStyle::with_size(400, 300))
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn renders_spectrum_line() {
        let spectrum = AverageSpectrum {
            frequencies_hz: vec![0.0, 62.5, 125.0, 187.5, 250.0],
            mean_magnitude: vec![4.0, 1.0, 0.5, 0.25, 0.0],
        };
        let png = render_spectrum_png(&spectrum, PlotStyle::with_size(400, 300)).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn tiny_spectrum_keeps_its_scale() {
        let magnitudes = [2e-7f32, 8e-7, 1e-7];
        let top = magnitude_axis_top(&magnitudes);
        assert!(top > 8e-7 && top < 1e-6);
        assert_eq!(magnitude_axis_top(&[0.0, 0.0]), 1.0);
        let spectrum = AverageSpectrum {
            frequencies_hz: vec![0.0, 50.0, 100.0],
            mean_magnitude: magnitudes.to_vec(),
        };
        let png = render_spectrum_png(&spectrum, PlotStyle::with_size(300, 200)).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().width(), 300);
    }
    #[test]
    fn oversized_images_are_rejected() {
        let section = Section {
            amplitudes: Array2::zeros((2, 2)),
            coords: vec![1, 2],
            samples_ms: vec![0.0, 4.0],
        };
        let bounds = ScaleBounds { min: -1.0, max: 1.0 };
        for (w, h) in [(100_000, 100_000), (u32::MAX, u32::MAX), (0, 10)] {
            assert!(matches!(
                render_section_png(&section, bounds, "CDP", "t", PlotStyle::with_size(w, h)),
                Err(SectionError::Plot(_))
            ));
        }
    }
    #[test]
    fn empty_inputs_are_plot_errors() {
        let section = Section {
            amplitudes: Array2::zeros((0, 0)),
            coords: vec![],
            samples_ms: vec![],
        };
        let bounds = ScaleBounds { min: -1.0, max: 1.0 };
        assert!(matches!(
            render_section_png(&section, bounds, "CDP", "t", PlotStyle::default()),
            Err(SectionError::Plot(_))
        ));
        let spectrum = AverageSpectrum {
            frequencies_hz: vec![],
            mean_magnitude: vec![],
        };
        assert!(matches!(
            render_spectrum_png(&spectrum, PlotStyle::default()),
            Err(SectionError::Plot(_))
        ));
    }
}
