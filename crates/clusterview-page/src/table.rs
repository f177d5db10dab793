//! Plain-text table rendering of a [`PageView`].
//!
//! Columns are aligned by terminal display width, so wide characters line up.
//! Cells wider than the column cap are cut and end in `…`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::view::PageView;

/// Default per-column width cap.
pub const DEFAULT_MAX_CELL_WIDTH: usize = 32;

const SEPARATOR: &str = "  ";

/// Truncates `s` to `max_width` display columns, ending in `…` when cut.
///
/// ```
/// use clusterview_page::truncate_to_width;
///
/// assert_eq!(truncate_to_width("node-a", 10), "node-a");
/// assert_eq!(truncate_to_width("worker-node-17", 8), "worker-…");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let limit = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > limit {
            break;
        }
        out.push(c);
        width += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Pads `s` on the right to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

/// Renders page views as aligned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRenderer {
    max_cell_width: usize,
    footer: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        TableRenderer {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            footer: true,
        }
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width.max(1);
        self
    }

    /// Whether to append the `1-10 of 42 · page 1/5` line.
    pub fn footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }

    /// Renders a header line, one line per row and the optional footer.
    ///
    /// Trailing spaces are trimmed from every line.
    pub fn render(&self, view: &PageView) -> String {
        let header: Vec<String> = view
            .headers
            .iter()
            .map(|c| truncate_to_width(&c.label, self.max_cell_width))
            .collect();
        let rows: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| truncate_to_width(cell, self.max_cell_width))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .chain(std::iter::once(&header[i]))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(join_line(&header, &widths));
        for row in &rows {
            lines.push(join_line(row, &widths));
        }
        if self.footer {
            lines.push(format!(
                "{} · page {}/{}",
                view.range_label(),
                view.page,
                view.page_count
            ));
        }
        lines.join("\n")
    }
}

fn join_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_right(cell, *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}
