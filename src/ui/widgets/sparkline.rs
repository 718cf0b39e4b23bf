//! X-ray flux sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different flux levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Flux spans decades, so the scale is logarithmic: 1e-9 W/m² (quiet A-class)
/// up to 1e-3 W/m² (extreme X10 flare)
const LOG_FLUX_MIN: f64 = -9.0;
const LOG_FLUX_MAX: f64 = -3.0;

/// A sparkline widget showing GOES X-ray flux over time
pub struct FluxSparkline<'a> {
    /// Flux samples in W/m², oldest first
    samples: &'a [f64],
    /// Style for the sparkline
    style: Style,
    /// Style for the most recent sample
    marker_style: Style,
}

impl<'a> FluxSparkline<'a> {
    pub fn new(samples: &'a [f64]) -> Self {
        Self {
            samples,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    #[allow(dead_code)]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn flux_to_block(&self, flux: f64) -> char {
        let log_flux = flux.max(1e-12).log10();
        let normalized =
            ((log_flux - LOG_FLUX_MIN) / (LOG_FLUX_MAX - LOG_FLUX_MIN)).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for FluxSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Show the most recent samples that fit the area
        let width = area.width as usize;
        let start = self.samples.len().saturating_sub(width);
        let visible = &self.samples[start..];

        for (i, flux) in visible.iter().enumerate() {
            let block = self.flux_to_block(*flux);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if i + 1 == visible.len() {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
