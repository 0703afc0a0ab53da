//! Raw-data view: the full survey table, scrollable by row.
//!
//! The dashboard's counterpart of the original report's "see the complete
//! data" expander. Columns are clipped to a fixed width and as many as fit
//! are shown; rows scroll vertically.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{ACCENT, DIM, TEXT};
use crate::dataset::Dataset;

const COLUMN_WIDTH: usize = 18;

pub struct DataTableView {
    pub scroll: usize,
}

impl DataTableView {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, dataset: &Dataset) {
        self.scroll = (self.scroll + 1).min(dataset.len().saturating_sub(1));
    }

    pub fn render(&self, f: &mut Frame, area: Rect, dataset: &Dataset) {
        let visible_columns =
            ((area.width as usize).saturating_sub(2) / (COLUMN_WIDTH + 1)).max(1);
        let visible_rows = (area.height.saturating_sub(3) as usize).max(1);

        let mut lines = Vec::new();
        lines.push(Line::from(
            dataset
                .headers()
                .iter()
                .take(visible_columns)
                .map(|header| {
                    Span::styled(
                        format!("{} ", clip(header)),
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                    )
                })
                .collect::<Vec<_>>(),
        ));

        for row in dataset.rows().iter().skip(self.scroll).take(visible_rows) {
            lines.push(Line::from(
                row.iter()
                    .take(visible_columns)
                    .map(|cell| Span::styled(format!("{} ", clip(cell)), Style::default().fg(TEXT)))
                    .collect::<Vec<_>>(),
            ));
        }

        let hidden = dataset.headers().len().saturating_sub(visible_columns);
        let title = if hidden > 0 {
            format!(
                "[ RESPONSES {}/{} (+{hidden} columns off-screen) ]",
                (self.scroll + 1).min(dataset.len()),
                dataset.len()
            )
        } else {
            format!("[ RESPONSES {}/{} ]", (self.scroll + 1).min(dataset.len()), dataset.len())
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(DIM)),
        );
        f.render_widget(paragraph, area);
    }
}

/// Pad or clip a cell to the fixed column width (char-aware).
fn clip(cell: &str) -> String {
    let mut out: String = cell.chars().take(COLUMN_WIDTH).collect();
    let used = out.chars().count();
    if cell.chars().count() > COLUMN_WIDTH {
        out.truncate(out.char_indices().nth(COLUMN_WIDTH - 1).map_or(out.len(), |(i, _)| i));
        out.push('…');
        return out;
    }
    out.push_str(&" ".repeat(COLUMN_WIDTH - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_pads_to_width() {
        assert_eq!(clip("abc").chars().count(), COLUMN_WIDTH);
    }

    #[test]
    fn test_clip_marks_truncation() {
        let long = "a".repeat(COLUMN_WIDTH * 2);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), COLUMN_WIDTH);
        assert!(clipped.ends_with('…'));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let dataset = Dataset::from_reader("A\n1\n2\n".as_bytes()).expect("parse");
        let mut view = DataTableView::new();
        view.scroll_up();
        assert_eq!(view.scroll, 0);
        view.scroll_down(&dataset);
        view.scroll_down(&dataset);
        view.scroll_down(&dataset);
        assert_eq!(view.scroll, 1);
    }
}
