use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render_help_dialog(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let jump_key = app.jump_binding.label();

    let entries: Vec<(&str, &str)> = vec![
        (jump_key.as_str(), "Jump to parent topic note"),
        ("j/k", "Move in the note list / scroll the note"),
        ("Enter", "Open the selected note"),
        ("Tab", "Switch focus"),
        ("Backspace", "Back to the previous note"),
        (",", "Topic property setting"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let key_style = Style::default().fg(theme.primary).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from("")];
    lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), key_style),
            Span::styled(desc.to_string(), Style::default().fg(theme.foreground)),
        ])
    }));

    let width = 52.min(area.width.saturating_sub(2));
    let height = (lines.len() as u16 + 3).min(area.height);
    let dialog_area = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    f.render_widget(Clear, dialog_area);
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.background_secondary)),
    );
    f.render_widget(dialog, dialog_area);
}
