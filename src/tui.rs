//! # Terminal User Interface (TUI)
//!
//! Interactive terminal dashboard using `ratatui`.
//!
//! ## View Modes
//!
//! - **Dashboard** - one tab per report section, panels side by side
//! - **Data** - raw survey responses, scrollable
//! - **Help** - keyboard shortcut overlay
//!
//! The report is built once before the TUI starts and never changes while
//! it is open; the event loop only moves UI state (active tab, scroll
//! offsets, overlays) and redraws.
//!
//! ## Sub-Modules
//!
//! - `panels` - renderers for the report panel kinds
//! - `data` - raw response table
//! - `theme` - color scheme and gauges

#![allow(clippy::cast_possible_truncation, clippy::too_many_lines)]

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};
use std::io;
use std::time::Duration;

mod data;
mod panels;
mod theme;

use crate::dataset::Dataset;
use crate::report::{Report, SCORE_MAX};
use data::DataTableView;
use theme::{ACCENT, BACKGROUND, DIM, HIGHLIGHT, TEXT};

// Pre-computed styles for consistent UI rendering
const STYLE_HEADING: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(DIM);
const STYLE_KEY: Style = Style::new().fg(HIGHLIGHT);
const STYLE_TEXT: Style = Style::new().fg(TEXT);

/// Current view mode determines what's displayed and how keys are handled
#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewMode {
    /// Section tabs with their panels
    Dashboard,
    /// Raw survey responses
    Data,
    /// Keyboard shortcut overlay
    Help,
}

/// The dashboard application: an immutable report plus UI state.
pub struct App<'a> {
    report: &'a Report,
    dataset: &'a Dataset,

    // UI state
    view_mode: ViewMode,
    section_index: usize,
    panel_scroll: usize,
    data_view: DataTableView,
    should_quit: bool,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(report: &'a Report, dataset: &'a Dataset) -> Self {
        Self {
            report,
            dataset,
            view_mode: ViewMode::Dashboard,
            section_index: 0,
            panel_scroll: 0,
            data_view: DataTableView::new(),
            should_quit: false,
        }
    }

    fn section_count(&self) -> usize {
        self.report.sections.len()
    }

    fn select_section(&mut self, index: usize) {
        if index < self.section_count() && index != self.section_index {
            self.section_index = index;
            self.panel_scroll = 0;
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match self.view_mode {
            ViewMode::Dashboard => match key {
                KeyCode::Char('q' | 'Q') => self.should_quit = true,
                KeyCode::Right | KeyCode::Tab => {
                    let next = (self.section_index + 1) % self.section_count().max(1);
                    self.select_section(next);
                }
                KeyCode::Left | KeyCode::BackTab => {
                    let count = self.section_count().max(1);
                    let previous = (self.section_index + count - 1) % count;
                    self.select_section(previous);
                }
                KeyCode::Char(c @ '1'..='9') => {
                    self.select_section(c as usize - '1' as usize);
                }
                KeyCode::Up => self.panel_scroll = self.panel_scroll.saturating_sub(1),
                KeyCode::Down => self.panel_scroll += 1,
                KeyCode::Char('d' | 'D') => self.view_mode = ViewMode::Data,
                KeyCode::Char('?') => self.view_mode = ViewMode::Help,
                _ => {}
            },
            ViewMode::Data => match key {
                KeyCode::Esc | KeyCode::Char('d' | 'D' | 'q' | 'Q') => {
                    self.view_mode = ViewMode::Dashboard;
                }
                KeyCode::Up => self.data_view.scroll_up(),
                KeyCode::Down => self.data_view.scroll_down(self.dataset),
                _ => {}
            },
            // Any key closes help
            ViewMode::Help => self.view_mode = ViewMode::Dashboard,
        }
    }

    fn render_header(&self, f: &mut ratatui::Frame, area: Rect) {
        let kpis = &self.report.kpis;
        let mut kpi_spans = vec![
            Span::styled("SHOPLENS", STYLE_HEADING),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} respondents", kpis.respondents), Style::new().fg(TEXT)),
        ];
        if let Some(top) = &kpis.top_channel {
            kpi_spans.push(Span::styled(" | ", STYLE_DIM));
            kpi_spans.push(Span::styled("Top channel ", STYLE_DIM));
            kpi_spans.push(Span::styled(top.channel.clone(), Style::new().fg(ACCENT)));
            kpi_spans.push(Span::styled(format!(" {:.1}%", top.share), Style::new().fg(HIGHLIGHT)));
        }
        if let Some(mean) = kpis.online_trust_mean {
            kpi_spans.push(Span::styled(" | ", STYLE_DIM));
            kpi_spans.push(Span::styled("Online trust ", STYLE_DIM));
            kpi_spans.push(Span::styled(
                format!("{mean:.2}/{SCORE_MAX:.0}"),
                Style::new().fg(ACCENT),
            ));
        }

        let header = Paragraph::new(vec![Line::from(kpi_spans)]).block(
            Block::default().borders(Borders::ALL).border_style(Style::new().fg(ACCENT)),
        );
        f.render_widget(header, area);
    }

    fn render_tabs(&self, f: &mut ratatui::Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for (index, section) in self.report.sections.iter().enumerate() {
            let style = if index == self.section_index {
                Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                STYLE_DIM
            };
            spans.push(Span::styled(format!(" {} {} ", index + 1, section.title), style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(vec![Line::from(spans)]), area);
    }

    fn render_section(&self, f: &mut ratatui::Frame, area: Rect) {
        let Some(section) = self.report.sections.get(self.section_index) else {
            let notice = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("  No sections could be built.", STYLE_DIM)),
                Line::from(Span::styled(
                    "  Check the skipped list below or the logs.",
                    STYLE_DIM,
                )),
            ])
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(notice, area);
            return;
        };

        let panel_count = section.panels.len().max(1) as u32;
        let constraints: Vec<Constraint> =
            (0..panel_count).map(|_| Constraint::Ratio(1, panel_count)).collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (panel, column) in section.panels.iter().zip(columns.iter()) {
            panels::render_panel(f, *column, panel, self.panel_scroll);
        }
    }

    fn render_skipped_notice(&self, f: &mut ratatui::Frame, area: Rect) {
        let skipped: Vec<&str> = self.report.skipped.iter().map(|s| s.title).collect();
        let notice = Paragraph::new(vec![Line::from(vec![
            Span::styled(" ! ", Style::new().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} section(s) skipped: ", skipped.len()), STYLE_DIM),
            Span::styled(skipped.join(", "), Style::new().fg(HIGHLIGHT)),
        ])]);
        f.render_widget(notice, area);
    }

    fn render_status_bar(&self, f: &mut ratatui::Frame, area: Rect) {
        let status_line = match self.view_mode {
            ViewMode::Dashboard => Line::from(vec![
                Span::styled("Q", STYLE_KEY),
                Span::styled(":Quit ", STYLE_DIM),
                Span::styled("←→", STYLE_KEY),
                Span::styled(":Section ", STYLE_DIM),
                Span::styled("↑↓", STYLE_KEY),
                Span::styled(":Scroll ", STYLE_DIM),
                Span::styled("D", STYLE_KEY),
                Span::styled(":Data ", STYLE_DIM),
                Span::styled("?", STYLE_KEY),
                Span::styled(":Help ", STYLE_DIM),
                Span::styled(
                    format!("[{}/{}]", self.section_index + 1, self.section_count()),
                    Style::new().fg(ACCENT),
                ),
            ]),
            ViewMode::Data => Line::from(vec![
                Span::styled("ESC", STYLE_KEY),
                Span::styled(":Back ", STYLE_DIM),
                Span::styled("↑↓", STYLE_KEY),
                Span::styled(":Scroll ", STYLE_DIM),
                Span::styled("[Data]", Style::new().fg(HIGHLIGHT)),
            ]),
            ViewMode::Help => Line::from(vec![
                Span::styled("Any key", STYLE_KEY),
                Span::styled(":Close ", STYLE_DIM),
                Span::styled("[Help]", Style::new().fg(ACCENT)),
            ]),
        };

        let status = Paragraph::new(vec![status_line]).block(
            Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(status, area);
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let has_skipped = !self.report.skipped.is_empty();
        let mut constraints = vec![
            Constraint::Length(3), // Header with KPIs
            Constraint::Length(1), // Section tabs
            Constraint::Min(0),    // Panels
        ];
        if has_skipped {
            constraints.push(Constraint::Length(1)); // Skipped notice
        }
        constraints.push(Constraint::Length(3)); // Status bar

        let outer_layout =
            Layout::default().direction(Direction::Vertical).constraints(constraints).split(f.area());

        self.render_header(f, outer_layout[0]);
        self.render_tabs(f, outer_layout[1]);

        match self.view_mode {
            ViewMode::Dashboard | ViewMode::Help => self.render_section(f, outer_layout[2]),
            ViewMode::Data => self.data_view.render(f, outer_layout[2], self.dataset),
        }

        if has_skipped {
            self.render_skipped_notice(f, outer_layout[3]);
        }
        self.render_status_bar(f, outer_layout[outer_layout.len() - 1]);

        if self.view_mode == ViewMode::Help {
            render_help_overlay(f, f.area());
        }
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns an error if terminal setup or rendering fails
    pub fn run(mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }
}

/// Open the dashboard on a built report.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails
pub fn run(report: &Report, dataset: &Dataset) -> Result<()> {
    App::new(report, dataset).run()
}

/// Render the help overlay explaining the dashboard and keyboard shortcuts
fn render_help_overlay(f: &mut ratatui::Frame, area: Rect) {
    let popup_area = centered_popup(area, 70, 20);

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  What You're Looking At", STYLE_HEADING)),
        Line::from(Span::styled(
            "  Survey answers aggregated per question: ranked categories,",
            STYLE_DIM,
        )),
        Line::from(Span::styled(
            "  channel splits per age band, and 1-5 score averages.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  How to Read It", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  Bars      ", STYLE_LABEL),
            Span::styled("Counts scaled to the largest category.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Stacked   ", STYLE_LABEL),
            Span::styled("Every bar is 100% of its age band.", STYLE_DIM),
        ]),
        Line::from(vec![
            Span::styled("  Percent   ", STYLE_LABEL),
            Span::styled("Denominator named in each panel (answers/shown/people).", STYLE_DIM),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  ←→", STYLE_KEY),
            Span::styled(" Sections   ", STYLE_TEXT),
            Span::styled("↑↓", STYLE_KEY),
            Span::styled(" Scroll   ", STYLE_TEXT),
            Span::styled("D", STYLE_KEY),
            Span::styled(" Raw data   ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(BACKGROUND).fg(TEXT)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, schema};

    fn fixture() -> (Report, Dataset) {
        let header = [
            schema::AGE_BAND,
            schema::GENDER,
            schema::PURCHASE_FREQUENCY,
            schema::PRIMARY_CHANNEL,
            schema::ONLINE_MOTIVE,
            schema::STORE_MOTIVE,
            schema::ONLINE_TRUST,
            schema::STORE_EXPERIENCE,
            schema::ONLINE_PRODUCTS,
            schema::STORE_PRODUCTS,
            schema::ABANDONMENT,
        ]
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(",");
        let row = "18 a 24 anos,Feminino,Semanal,Online,Preço,Atendimento,4,5,Livros,Roupas,Frete caro";
        let csv = format!("{header}\n{row}\n{row}\n");
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse");
        let report = build_report(&dataset, ";");
        (report, dataset)
    }

    #[test]
    fn test_section_navigation_wraps() {
        let (report, dataset) = fixture();
        let mut app = App::new(&report, &dataset);
        let count = app.section_count();
        assert!(count > 0);

        for _ in 0..count {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.section_index, 0);

        app.handle_key(KeyCode::Left);
        assert_eq!(app.section_index, count - 1);
    }

    #[test]
    fn test_number_keys_jump_to_section() {
        let (report, dataset) = fixture();
        let mut app = App::new(&report, &dataset);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.section_index, 1);
        // Out-of-range digits are ignored
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.section_index, 1);
    }

    #[test]
    fn test_data_view_toggles_and_closes() {
        let (report, dataset) = fixture();
        let mut app = App::new(&report, &dataset);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.view_mode, ViewMode::Data);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.view_mode, ViewMode::Dashboard);
    }

    #[test]
    fn test_quit_only_from_dashboard() {
        let (report, dataset) = fixture();
        let mut app = App::new(&report, &dataset);
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('q'));
        // In the data view, q goes back instead of quitting
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_section_change_resets_scroll() {
        let (report, dataset) = fixture();
        let mut app = App::new(&report, &dataset);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.panel_scroll, 2);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.panel_scroll, 0);
    }
}
