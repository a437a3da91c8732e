//! Single-row sparkline for ordered series

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for eight value levels
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A one-line sparkline of a value series
///
/// Series longer than the available width are sampled evenly so the whole
/// range stays visible.
pub struct TrendSparkline<'a> {
    /// Values in display order
    values: &'a [f64],
    /// Value drawn as a full block
    max_value: f64,
    /// Index of a point to highlight
    highlight: Option<usize>,
    style: Style,
    highlight_style: Style,
}

impl<'a> TrendSparkline<'a> {
    pub fn new(values: &'a [f64], max_value: f64) -> Self {
        Self {
            values,
            max_value,
            highlight: None,
            style: Style::default().fg(Color::Cyan),
            highlight_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn highlight(mut self, index: usize) -> Self {
        self.highlight = Some(index);
        self
    }

    fn value_to_block(&self, value: f64) -> char {
        if self.max_value <= 0.0 {
            return BLOCKS[0];
        }
        let normalized = (value / self.max_value).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }

    /// Indices of the values drawn in `width` columns
    fn sample_indices(&self, width: usize) -> Vec<usize> {
        let len = self.values.len();
        if len <= width {
            (0..len).collect()
        } else {
            (0..width).map(|column| column * len / width).collect()
        }
    }
}

impl<'a> Widget for TrendSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (column, index) in self.sample_indices(area.width as usize).into_iter().enumerate() {
            let block = self.value_to_block(self.values[index]);
            let x = area.x + column as u16;

            let style = if self.highlight == Some(index) {
                self.highlight_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
