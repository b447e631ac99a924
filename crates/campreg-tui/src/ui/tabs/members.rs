use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use campreg_core::detail::DetailState;
use campreg_core::models::MemberRecord;
use campreg_core::utils::{
    format_date, format_optional, format_phone, format_stored_currency, truncate_string,
    NOT_AVAILABLE,
};

use crate::app::{App, AppState};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Render the Members tab - the loaded list with the name filter applied
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let members = app.filtered_members();

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Gender"),
        Cell::from("Age"),
        Cell::from("Phone"),
        Cell::from("Church"),
        Cell::from("Balance"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = members
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.display_name().to_string()),
                Cell::from(format_optional(&m.gender, "-")),
                Cell::from(format!("{:>3}", m.age_str())),
                Cell::from(format_phone(m.phone_number.as_deref().unwrap_or(""))),
                Cell::from(truncate_string(m.church_name.as_deref().unwrap_or(""), 24)),
                Cell::from(format!("{:>12}", format_stored_currency(&m.balance))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Length(7),
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Fill(1),
        Constraint::Length(13),
    ];

    let searching = app.state == AppState::Searching;
    let title = if searching || !app.search_query.is_empty() {
        let cursor = if searching { "▌" } else { "" };
        format!(
            " Members ({}/{}) - search: {}{} ",
            members.len(),
            app.members.len(),
            app.search_query,
            cursor
        )
    } else if app.members_loading && app.members.is_empty() {
        " Members - loading... ".to_string()
    } else {
        format!(" Members ({}) ", app.members.len())
    };
    let title_style = if searching {
        styles::search_style()
    } else {
        styles::muted_style()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(title_style)
                .borders(Borders::ALL)
                .border_style(styles::border_style(!app.detail.is_open())),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !members.is_empty() {
        state.select(Some(app.member_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Popup with the full record of the selected member
pub fn render_detail_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 34, frame.area());
    frame.render_widget(Clear, area);

    let (title, lines) = match app.detail.state() {
        DetailState::Loaded(member) => (member.display_name().to_string(), detail_lines(member)),
        _ => (
            "Member".to_string(),
            vec![Line::from(Span::styled(" Loading...", styles::muted_style()))],
        ),
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .title_bottom(Line::from(Span::styled(" [Esc] close ", styles::muted_style())))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<20}", label), styles::muted_style()),
        Span::raw(value),
    ])
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(format!(" {}", title), styles::highlight_style()))
}

fn text(value: &Option<String>) -> String {
    format_optional(value, NOT_AVAILABLE)
}

fn detail_lines(m: &MemberRecord) -> Vec<Line<'static>> {
    let phone = |v: &Option<String>| format_phone(v.as_deref().unwrap_or(""));
    let date = |v: &Option<String>| format_date(v.as_deref().unwrap_or(""));
    let age = match m.age_str() {
        a if a.is_empty() => NOT_AVAILABLE.to_string(),
        a => a,
    };

    vec![
        heading("Participant Information"),
        row("Date of Birth:", date(&m.date_of_birth)),
        row("Age:", age),
        row("Gender:", text(&m.gender)),
        row("Nationality:", text(&m.nationality)),
        row("Phone:", phone(&m.phone_number)),
        row("Email:", text(&m.email)),
        row("Church:", text(&m.church_name)),
        row("Denomination:", text(&m.denomination)),
        row("Pastor/Youth Leader:", text(&m.pastor_name)),
        Line::from(""),
        heading("Emergency Contact"),
        row("Name:", text(&m.emergency_name)),
        row("Relationship:", text(&m.emergency_relationship)),
        row("Phone:", phone(&m.emergency_phone)),
        row("Alternative Phone:", phone(&m.emergency_alt_phone)),
        Line::from(""),
        heading("Medical Information"),
        row("Allergies:", text(&m.allergies)),
        row("Chronic Illnesses:", text(&m.chronic_illnesses)),
        row("Medications:", text(&m.medications)),
        Line::from(""),
        heading("Payment"),
        row("Camp Fee:", format_stored_currency(&m.camp_fee)),
        row("Deposit Paid:", format_stored_currency(&m.deposit_paid)),
        row("Balance:", format_stored_currency(&m.balance)),
        row("Method:", text(&m.payment_method)),
        row("Receipt No:", text(&m.receipt_no)),
        Line::from(""),
        heading("Office Use"),
        row("Registration No:", text(&m.registration_no)),
        row("Date Received:", date(&m.date_received)),
        row("Checked By:", text(&m.checked_by)),
    ]
}
