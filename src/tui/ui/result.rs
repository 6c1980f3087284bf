//! Prediction result panel: tiered label, confidence gauge and advice.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Gauge, Paragraph, Wrap,
    },
    Frame,
};

use crate::application::{FormController, ViewFocus};
use crate::domain::ResultView;
use crate::ports::ErrorRenderer;
use crate::tui::styles::CardioTheme;

/// Dots used to draw the half-circle arc.
const ARC_SAMPLES: usize = 120;

/// Render the result panel. Draws nothing while the panel is hidden.
pub fn render_result<R: ErrorRenderer>(
    f: &mut Frame,
    area: Rect,
    controller: &FormController<R>,
    now: Instant,
) {
    let view = controller.result();
    if !view.visible {
        return;
    }

    let border = if controller.focus() == ViewFocus::Result {
        CardioTheme::outline_focused()
    } else {
        CardioTheme::outline()
    };
    let block = Block::default()
        .title(Span::styled(" Result ", CardioTheme::title()))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Label + timestamp
            Constraint::Length(7), // Arc gauge
            Constraint::Length(1), // Bar
            Constraint::Min(0),    // Recommendations
        ])
        .split(inner);

    render_label(f, chunks[0], view);
    render_arc(f, chunks[1], view, controller.gauge().fill_at(now));
    render_bar(f, chunks[2], view);
    render_recommendations(f, chunks[3], view);
}

fn render_label(f: &mut Frame, area: Rect, view: &ResultView) {
    let received = view
        .received_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(view.label.clone(), CardioTheme::tier(view.tier()))),
        Line::from(Span::styled(received, CardioTheme::text_faint())),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Points of a half circle from the left end, `fraction` of the way round.
fn arc_points(fraction: f64) -> Vec<(f64, f64)> {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let count = (ARC_SAMPLES as f64 * fraction).round() as usize;
    (0..count)
        .map(|i| {
            let t = i as f64 / ARC_SAMPLES as f64;
            let angle = std::f64::consts::PI * (1.0 - t);
            (angle.cos(), angle.sin())
        })
        .collect()
}

fn render_arc(f: &mut Frame, area: Rect, view: &ResultView, fill: f64) {
    let track = arc_points(1.0);
    let filled = arc_points(fill);
    let color = CardioTheme::tier_color(view.tier());
    let text = view.confidence_text.clone();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.3, 1.3])
        .y_bounds([-0.3, 1.1])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: CardioTheme::TRACK,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &filled,
                color,
            });
            ctx.print(-0.15, 0.1, Span::styled(text.clone(), CardioTheme::title()));
        })
        .background_color(Color::Reset);

    f.render_widget(canvas, area);
}

fn render_bar(f: &mut Frame, area: Rect, view: &ResultView) {
    let ratio = if view.bar_width.is_finite() {
        (view.bar_width / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(CardioTheme::bar(view.tier()))
        .ratio(ratio)
        .label(Span::styled(view.confidence_text.clone(), CardioTheme::text()));
    f.render_widget(gauge, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, view: &ResultView) {
    let mut lines = vec![Line::from(Span::styled(
        "Recommendations",
        CardioTheme::text_dim(),
    ))];
    lines.extend(view.recommendations.iter().map(|item| {
        Line::from(vec![
            Span::styled("  • ", CardioTheme::cursor()),
            Span::styled(item.clone(), CardioTheme::text()),
        ])
    }));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionResponse;
    use crate::ports::{PredictionClient, PredictionOutcome, TransportError};
    use crate::tui::ui::test_support::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    struct Fixed;

    impl PredictionClient for Fixed {
        fn predict(
            &self,
            _request: &crate::domain::PredictionRequest,
        ) -> Result<PredictionOutcome, TransportError> {
            Ok(PredictionOutcome::Success(PredictionResponse {
                label: "High risk".to_string(),
                confidence: 82.0,
                recommendation: "Reduce salt; walk daily".to_string(),
            }))
        }
    }

    fn draw(controller: &FormController, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), controller, now))
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_arc_points_follow_fraction() {
        assert!(arc_points(0.0).is_empty());
        assert_eq!(arc_points(0.5).len(), ARC_SAMPLES / 2);
        assert_eq!(arc_points(f64::NAN).len(), 0);

        let first = arc_points(1.0)[0];
        assert!((first.0 + 1.0).abs() < 1e-9);
        assert!(first.1.abs() < 1e-9);
    }

    #[test]
    fn test_hidden_panel_draws_nothing() {
        let controller: FormController = FormController::default();
        let text = draw(&controller, Instant::now());
        assert!(!text.contains("Result"));
    }

    #[test]
    fn test_shown_result_lists_recommendations() {
        let mut controller: FormController = FormController::default();
        controller.load_sample_data();
        let now = Instant::now();
        controller.submit_with(&Fixed, now).expect("sample data is valid");

        let text = draw(&controller, now);
        assert!(text.contains("High risk"));
        assert!(text.contains("82%"));
        assert!(text.contains("Reduce salt"));
        assert!(text.contains("walk daily"));
    }
}
