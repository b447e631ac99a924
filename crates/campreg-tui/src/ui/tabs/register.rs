use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use campreg_core::form::{Field, FormState, RenderMode, Section};
use campreg_core::print::PrintDocument;

use crate::app::App;
use crate::ui::styles;

/// Render the Register tab - the form on the left, print preview on the right
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(frame, app, chunks[0]);
    render_preview(frame, app, chunks[1]);
}

/// Form lines grouped by section, plus the index of the focused line
fn form_lines(app: &App) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut focus_line = 0;

    for section in Section::ALL {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.title().to_string(),
            styles::highlight_style(),
        )));

        for field in section.fields() {
            let focused = field == app.form_focus;
            if focused {
                focus_line = lines.len();
            }
            lines.push(field_line(app, field, focused));
        }
    }
    (lines, focus_line)
}

fn field_line(app: &App, field: Field, focused: bool) -> Line<'static> {
    let marker = if field.is_required() { "*" } else { " " };
    let label = format!(" {}{:<20}", marker, field.label());
    let label_style = if app.form_missing.contains(&field) {
        styles::missing_field_style()
    } else {
        styles::muted_style()
    };

    let value = app.form.value(field).to_string();
    let value = if !field.choices().is_empty() && focused {
        format!("◀ {} ▶", if value.is_empty() { "select" } else { value.as_str() })
    } else {
        value
    };
    let (value_style, cursor) = if focused {
        let cursor = if field.choices().is_empty() { "▌" } else { "" };
        (styles::selected_style(), cursor)
    } else if field == Field::Balance {
        let owed = app.form.draft().numeric(Field::Balance).value_or_zero();
        (styles::balance_style(owed), "")
    } else {
        (styles::list_item_style(), "")
    };

    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let (lines, focus_line) = form_lines(app);

    // Keep the focused field inside the visible window
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 2).saturating_sub(visible);

    let title = match app.form.state() {
        FormState::Editing if app.submitting => " New Registration - submitting... ".to_string(),
        FormState::Editing => " New Registration ".to_string(),
        FormState::Submitted => {
            let id = app
                .form
                .submitted_record()
                .and_then(|m| m.id.as_ref())
                .map(|id| format!(" #{}", id))
                .unwrap_or_default();
            format!(" Registered{} - Ctrl+R for a new one ", id)
        }
    };
    let title_style = match app.form.state() {
        FormState::Submitted => styles::success_style(),
        FormState::Editing => styles::title_style(),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .title_style(title_style)
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.form.render_mode();
    let document = PrintDocument::build(app.form.projection(mode));
    let lines: Vec<Line> = document
        .to_text()
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), styles::preview_style())))
        .collect();

    let title = match mode {
        RenderMode::Filled => " Print Preview: filled [^T] ",
        RenderMode::Blank => " Print Preview: blank [^T] ",
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}
