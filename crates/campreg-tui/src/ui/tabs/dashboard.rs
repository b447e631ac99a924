use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use campreg_core::models::Gender;
use campreg_core::stats::{MissingValuePolicy, Summary};
use campreg_core::utils::format_currency;

use crate::app::App;
use crate::ui::styles;

/// Width of the gender distribution bars
const BAR_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(7)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_participants(frame, app, &summary, top[0]);
    render_finances(frame, &summary, top[1]);
    render_gender(frame, &summary, chunks[1]);
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<18}", label), styles::muted_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn render_participants(frame: &mut Frame, app: &App, summary: &Summary, area: Rect) {
    let policy_note = match app.config.missing_value_policy {
        MissingValuePolicy::AsZero => "missing ages count as 0",
        MissingValuePolicy::Exclude => "missing ages excluded",
    };

    let lines = vec![
        Line::from(""),
        stat_line("Registered:", summary.total_count.to_string()),
        stat_line("Male:", summary.count(Gender::Male).to_string()),
        stat_line("Female:", summary.count(Gender::Female).to_string()),
        stat_line("Average Age:", summary.average_age.to_string()),
        Line::from(Span::styled(format!(" ({})", policy_note), styles::muted_style())),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Participants ")
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        ),
        area,
    );
}

fn render_finances(frame: &mut Frame, summary: &Summary, area: Rect) {
    let lines = vec![
        Line::from(""),
        stat_line("Total Fees:", format_currency(summary.total_fees)),
        stat_line("Deposits Paid:", format_currency(summary.total_deposits)),
        Line::from(vec![
            Span::styled(format!(" {:<18}", "Outstanding:"), styles::muted_style()),
            Span::styled(
                format_currency(summary.total_balance),
                styles::balance_style(summary.total_balance),
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Finances ")
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        ),
        area,
    );
}

fn bar(percentage: usize) -> String {
    let filled = (percentage.min(100) * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_gender(frame: &mut Frame, summary: &Summary, area: Rect) {
    let mut lines = vec![Line::from("")];
    for gender in Gender::ALL {
        let pct = summary.percentage(gender);
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<8}", gender.as_str()), styles::muted_style()),
            Span::styled(bar(pct), styles::title_style()),
            Span::styled(
                format!(" {:>3}%  ({})", pct, summary.count(gender)),
                styles::list_item_style(),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Gender Distribution ")
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar() {
        assert_eq!(bar(0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 15);
        assert_eq!(bar(100).chars().filter(|c| *c == '█').count(), 30);
        assert_eq!(bar(150).chars().count(), 30);
    }
}
