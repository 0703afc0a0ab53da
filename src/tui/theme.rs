//! TUI color theme
//!
//! Storefront-inspired color scheme for the terminal dashboard.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0, 200, 255);
pub const HIGHLIGHT: Color = Color::Rgb(255, 191, 0);
pub const TEXT: Color = Color::Rgb(220, 220, 220);
pub const DIM: Color = Color::Rgb(110, 110, 110);
pub const BACKGROUND: Color = Color::Rgb(12, 12, 20);

/// Segment palette for stacked bars and legends, cycled by series index.
pub const SERIES: [Color; 6] = [
    Color::Rgb(0, 200, 255),
    Color::Rgb(255, 140, 60),
    Color::Rgb(120, 220, 120),
    Color::Rgb(230, 110, 200),
    Color::Rgb(250, 220, 90),
    Color::Rgb(150, 130, 255),
];

/// Color for the i-th series of a stacked bar or legend.
#[must_use]
pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

/// Horizontal gauge: `percentage` of `width` cells filled.
#[must_use]
pub fn gauge_bar(percentage: f64, width: usize) -> String {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((percentage / 100.0) * width as f64).round().min(width as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_bar_is_fixed_width() {
        for pct in [0.0, 33.3, 50.0, 100.0] {
            assert_eq!(gauge_bar(pct, 10).chars().count(), 10);
        }
    }

    #[test]
    fn test_gauge_bar_clamps_overflow() {
        assert_eq!(gauge_bar(150.0, 10), "█".repeat(10));
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(SERIES.len()));
    }
}
