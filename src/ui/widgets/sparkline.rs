//! Inline sparkline for a short run of forecast values

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Eight levels, lowest to highest
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block per value, scaled between the run's minimum and maximum
pub struct TrendSparkline<'a> {
    values: &'a [f64],
    /// Highlighted index, e.g. today
    marker: Option<usize>,
    style: Style,
    marker_style: Style,
}

impl<'a> TrendSparkline<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self {
            values,
            marker: None,
            style: Style::default().fg(Color::LightRed),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn marker(mut self, index: usize) -> Self {
        self.marker = Some(index);
        self
    }

    fn bounds(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
    }

    fn block_for(&self, value: f64) -> char {
        let (lo, hi) = self.bounds();
        let span = hi - lo;
        if !span.is_finite() || span <= 0.0 {
            return BLOCKS[3];
        }
        let normalized = ((value - lo) / span).clamp(0.0, 1.0);
        BLOCKS[((normalized * 7.0).round() as usize).min(7)]
    }
}

impl<'a> Widget for TrendSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (i, value) in self.values.iter().take(area.width as usize).enumerate() {
            let style = if self.marker == Some(i) {
                self.marker_style
            } else {
                self.style
            };
            if let Some(cell) = buf.cell_mut((area.x + i as u16, area.y)) {
                cell.set_char(self.block_for(*value)).set_style(style);
            }
        }
    }
}
