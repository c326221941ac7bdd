//! Temperature sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperature levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing the temperature trend over the forecast
///
/// Temperatures are normalized over the range actually present in the
/// series, so a mild spring day still shows a visible curve instead of a
/// flat line near the bottom.
pub struct TemperatureSparkline<'a> {
    /// Temperature for each forecast slot, in display units
    values: &'a [f64],
    /// Style for the sparkline
    style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self {
            values,
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn value_to_block(&self, value: f64, min: f64, span: f64) -> char {
        if span <= f64::EPSILON {
            // Flat series: everything sits mid-scale
            return BLOCKS[3];
        }
        let normalized = ((value - min) / span).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.values.is_empty() {
            return;
        }

        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let width = area.width as usize;
        for (i, value) in self.values.iter().take(width).enumerate() {
            let block = self.value_to_block(*value, min, span);
            let x = area.x + i as u16;
            let y = area.y;

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(self.style);
            }
        }
    }
}
