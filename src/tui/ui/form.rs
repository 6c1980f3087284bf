//! Health-metrics form view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{FormController, UiMode};
use crate::domain::FormField;
use crate::ports::ErrorRenderer;
use crate::tui::styles::CardioTheme;

/// Render the form, its action buttons and the key hints.
pub fn render_form<R: ErrorRenderer>(f: &mut Frame, area: Rect, controller: &FormController<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Buttons
            Constraint::Length(2), // Tooltip / hints
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_fields(f, chunks[1], controller);
    render_buttons(f, chunks[2], controller);
    render_footer(f, chunks[3], controller);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ❤ ", CardioTheme::invalid()),
        Span::styled("Cardiovascular Risk Check", CardioTheme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(CardioTheme::outline()),
    );
    f.render_widget(header, area);
}

fn render_fields<R: ErrorRenderer>(f: &mut Frame, area: Rect, controller: &FormController<R>) {
    let form = controller.form();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = (form.fields.len() + 1) / 2;
    let editable = controller.mode() == UiMode::Idle;

    render_column(f, columns[0], &form.fields[..mid], 0, form.selected_field, editable);
    render_column(f, columns[1], &form.fields[mid..], mid, form.selected_field, editable);
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
    editable: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let focused = offset + i == selected;

        let border_style = if field.error {
            CardioTheme::invalid_border()
        } else if focused {
            CardioTheme::outline_focused()
        } else {
            CardioTheme::outline()
        };
        let title_style = if focused {
            CardioTheme::label_focused()
        } else {
            CardioTheme::text_dim()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(field, focused && editable)).block(block);
        f.render_widget(content, rows[i]);
    }
}

/// Display line of one field: value (or hint), select arrows, cursor.
fn field_line(field: &FormField, cursor: bool) -> Line<'_> {
    let mut spans = vec![Span::raw(" ")];

    if let Some(label) = field.selected_choice_label() {
        let arrow = if cursor {
            CardioTheme::cursor()
        } else {
            CardioTheme::text_faint()
        };
        spans.push(Span::styled("◀ ", arrow));
        spans.push(Span::styled(label, CardioTheme::text()));
        spans.push(Span::styled(" ▶", arrow));
        return Line::from(spans);
    }

    if field.value.is_empty() {
        spans.push(Span::styled(field.hint, CardioTheme::text_faint()));
    } else if field.readonly {
        spans.push(Span::styled(field.value.as_str(), CardioTheme::text_dim()));
    } else {
        spans.push(Span::styled(field.value.as_str(), CardioTheme::text()));
    }

    if cursor && !field.readonly {
        spans.push(Span::styled("▌", CardioTheme::cursor()));
    }
    Line::from(spans)
}

fn render_buttons<R: ErrorRenderer>(f: &mut Frame, area: Rect, controller: &FormController<R>) {
    let submit_style = if controller.submit_enabled() {
        CardioTheme::button()
    } else {
        CardioTheme::button_disabled()
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", controller.submit_label()), submit_style),
    ];
    if controller.reset_visible() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" ↺ Reset ", CardioTheme::button()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer<R: ErrorRenderer>(f: &mut Frame, area: Rect, controller: &FormController<R>) {
    let tooltip = controller
        .form()
        .selected()
        .filter(|field| field.error && !field.title.is_empty())
        .map(|field| {
            Line::from(vec![
                Span::styled("! ", CardioTheme::invalid()),
                Span::styled(field.title.clone(), CardioTheme::invalid()),
            ])
        })
        .unwrap_or_else(|| Line::from(""));

    let mut hints = vec![
        Span::styled("[↑↓] ", CardioTheme::key_hint()),
        Span::styled("Field ", CardioTheme::key_desc()),
        Span::styled("[←→] ", CardioTheme::key_hint()),
        Span::styled("Choose ", CardioTheme::key_desc()),
    ];
    match controller.mode() {
        UiMode::Idle => {
            hints.push(Span::styled("[Enter] ", CardioTheme::key_hint()));
            hints.push(Span::styled("Predict ", CardioTheme::key_desc()));
            hints.push(Span::styled("[S] ", CardioTheme::key_hint()));
            hints.push(Span::styled("Sample data ", CardioTheme::key_desc()));
        }
        UiMode::Submitting => {
            hints.push(Span::styled("Waiting for the service…", CardioTheme::text_faint()));
        }
        UiMode::ResultShown => {
            hints.push(Span::styled("[R] ", CardioTheme::key_hint()));
            hints.push(Span::styled("Reset ", CardioTheme::key_desc()));
        }
    }

    f.render_widget(Paragraph::new(vec![tooltip, Line::from(hints)]), area);
}
