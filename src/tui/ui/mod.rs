//! UI module: View components for the TUI.

pub mod confetti;
pub mod form;
pub mod result;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::CardioTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Indicative estimate only. It does not replace a medical evaluation.",
            CardioTheme::text_faint(),
        )),
        Line::from(vec![
            Span::styled("[Ctrl+Q] ", CardioTheme::key_hint()),
            Span::styled("Quit", CardioTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(CardioTheme::outline());

    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}

/// Modal message box; the rest of the screen ignores keys while it is up.
pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(area, 50, 7);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), CardioTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", CardioTheme::key_hint()),
            Span::styled("OK", CardioTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Alert ", CardioTheme::invalid()))
        .borders(Borders::ALL)
        .border_style(CardioTheme::invalid_border());

    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

/// A `percent_x` wide, `height` tall rectangle centered in `area`.
pub fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let side = (100 - percent_x.min(100)) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}


#[cfg(test)]
mod tests {
    use super::test_support::buffer_text;
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 50, 7);
        assert_eq!(popup.height, 7);
        assert_eq!(popup.width, 50);
        assert!(popup.x >= 20 && popup.right() <= 80);
    }

    #[test]
    fn test_alert_shows_message() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        terminal
            .draw(|f| render_alert(f, f.area(), "Network error"))
            .expect("draw");
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Network error"));
        assert!(text.contains("Alert"));
    }
}
