use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::warn;
use once_cell::sync::Lazy;
use plotters::prelude::LineSeries;
use plotters::prelude::*;

use crate::signal::error::AnalysisError;
use crate::signal::fft::Spectrum;
use crate::types::{Band, Sample};

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
        }
    }
}

/// Whether a sans-serif face can be laid out. Hosts without system fonts get
/// charts with no caption, tick labels or legend.
static TEXT_AVAILABLE: Lazy<bool> = Lazy::new(|| {
    let available = caption_font().box_size("0").is_ok();
    if !available {
        warn!("no usable sans-serif font; charts are drawn without text");
    }
    available
});

fn caption_font() -> FontDesc<'static> {
    ("sans-serif", 20).into_font()
}

fn band_color(band: Band) -> RGBColor {
    let (r, g, b) = band.rgb();
    RGBColor(r, g, b)
}

/// Five band traces over sample time, one line per band in its display color.
pub fn render_band_series_png(
    samples: &[Sample],
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    render_band_series(samples, style, *TEXT_AVAILABLE)
}

fn render_band_series(
    samples: &[Sample],
    style: &PlotStyle,
    text: bool,
) -> Result<Vec<u8>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::Plot("band series has no samples".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_min = samples.first().map_or(0, |s| s.time) as f64;
        let x_max = samples.last().map_or(0, |s| s.time) as f64;
        let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
        let (y_min, y_max) = samples
            .iter()
            .flat_map(|s| Band::ALL.into_iter().map(move |b| s.bands.get(b)))
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let y_max = if (y_max - y_min).abs() < f64::EPSILON { y_min + 1.0 } else { y_max };
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if text {
            builder
                .caption("Band Activity", caption_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&WHITE.mix(0.1));
        if !text {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
        for band in Band::ALL {
            let color = band_color(band);
            let series = samples.iter().map(move |s| (s.time as f64, s.bands.get(band)));
            chart
                .draw_series(LineSeries::new(series, &color))?
                .label(band.name())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        if text {
            chart
                .configure_series_labels()
                .border_style(&WHITE.mix(0.2))
                .background_style(&style.background)
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

/// Magnitude spectrum up to `max_hz`, with each band's span shaded in its color.
pub fn render_spectrum_png(
    spectrum: &Spectrum,
    max_hz: f64,
    style: &PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    render_spectrum(spectrum, max_hz, style, *TEXT_AVAILABLE)
}

fn render_spectrum(
    spectrum: &Spectrum,
    max_hz: f64,
    style: &PlotStyle,
    text: bool,
) -> Result<Vec<u8>, AnalysisError> {
    let points: Vec<(f64, f64)> = spectrum.bins_up_to(max_hz).collect();
    if points.is_empty() {
        return Err(AnalysisError::Plot("spectrum has no magnitudes".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = points.last().map_or(0.0, |p| p.0).max(1e-3);
        let y_max = points.iter().fold(0.0f64, |acc, p| acc.max(p.1)).max(1e-3);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if text {
            builder
                .caption("DFT Magnitude", caption_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder.build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&WHITE.mix(0.1));
        if !text {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
        chart.draw_series(Band::ALL.iter().map(|band| {
            let (low, high) = band.range_hz();
            Rectangle::new(
                [(low.min(x_max), 0.0), (high.min(x_max), y_max)],
                band_color(*band).mix(0.15).filled(),
            )
        }))?;
        chart.draw_series(LineSeries::new(points.iter().copied(), &WHITE))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AnalysisError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AnalysisError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::fft::compute_spectrum;
    use crate::types::BandValues;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    #[test]
    fn band_series_renders_png() {
        let samples: Vec<Sample> = (0..30)
            .map(|i| {
                let mut bands = BandValues::default();
                bands.alpha = i as f64;
                Sample::new(i, bands)
            })
            .collect();
        let style = PlotStyle { width: 320, height: 200, ..PlotStyle::default() };
        let png = render_band_series_png(&samples, &style).unwrap();
        assert_eq!(png[..4], PNG_MAGIC);
    }
    #[test]
    fn spectrum_renders_png() {
        let signal: Vec<f64> = (0..128).map(|i| (i as f64 * 0.7).sin()).collect();
        let spectrum = compute_spectrum(&signal, 128.0).unwrap();
        let style = PlotStyle { width: 320, height: 200, ..PlotStyle::default() };
        let png = render_spectrum_png(&spectrum, 50.0, &style).unwrap();
        assert_eq!(png[..4], PNG_MAGIC);
    }
    #[test]
    fn charts_render_without_text() {
        let samples: Vec<Sample> = (0..10).map(|i| Sample::new(i, BandValues::default())).collect();
        let style = PlotStyle { width: 160, height: 120, ..PlotStyle::default() };
        let png = render_band_series(&samples, &style, false).unwrap();
        assert_eq!(png[..4], PNG_MAGIC);

        let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).cos()).collect();
        let spectrum = compute_spectrum(&signal, 64.0).unwrap();
        let png = render_spectrum(&spectrum, 30.0, &style, false).unwrap();
        assert_eq!(png[..4], PNG_MAGIC);
    }
    #[test]
    fn empty_inputs_are_plot_errors() {
        assert!(matches!(
            render_band_series_png(&[], &PlotStyle::default()),
            Err(AnalysisError::Plot(_))
        ));
    }
}
