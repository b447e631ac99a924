use ratatui::style::{Color, Modifier, Style};

// Camp palette
pub const FOREST: Color = Color::Rgb(72, 140, 96);
pub const SKY: Color = Color::Rgb(80, 144, 200);
pub const CAMPFIRE: Color = Color::Rgb(216, 150, 64);
pub const ALERT: Color = Color::Rgb(204, 72, 64);
pub const STONE: Color = Color::Rgb(130, 130, 124);
pub const NIGHT: Color = Color::Rgb(40, 48, 56);
pub const PAPER: Color = Color::Rgb(236, 232, 220);

pub fn title_style() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(NIGHT).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(STONE)
}

/// Section headings and key hints
pub fn highlight_style() -> Style {
    Style::default().fg(CAMPFIRE)
}

pub fn success_style() -> Style {
    Style::default().fg(FOREST)
}

pub fn error_style() -> Style {
    Style::default().fg(ALERT)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        title_style().add_modifier(Modifier::UNDERLINED)
    } else {
        muted_style()
    }
}

pub fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { SKY } else { STONE })
}

pub fn search_style() -> Style {
    Style::default().fg(CAMPFIRE).add_modifier(Modifier::ITALIC)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(NIGHT).fg(PAPER)
}

pub fn help_key_style() -> Style {
    highlight_style().add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(PAPER)
}

/// Label of a required form field left empty on submit
pub fn missing_field_style() -> Style {
    error_style().add_modifier(Modifier::BOLD)
}

/// Computed balance: green when settled, amber while money is owed
pub fn balance_style(outstanding: f64) -> Style {
    if outstanding > 0.0 {
        Style::default().fg(CAMPFIRE).add_modifier(Modifier::BOLD)
    } else {
        success_style()
    }
}

/// Print preview text, rendered like paper
pub fn preview_style() -> Style {
    Style::default().fg(PAPER)
}
