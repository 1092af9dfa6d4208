use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::config::DEFAULT_TOPIC_PROPERTY;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 6;

pub fn render_settings_dialog(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();

    let dialog_width = DIALOG_WIDTH.min(area.width.saturating_sub(2));
    let dialog_x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = area.y + (area.height.saturating_sub(DIALOG_HEIGHT)) / 2;
    let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, DIALOG_HEIGHT.min(area.height));

    f.render_widget(Clear, dialog_area);

    let query = &app.input_buffer;
    let available_width = (dialog_width as usize).saturating_sub(5);
    let display_query = if query.len() > available_width {
        let start = query
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| query.len() - i <= available_width)
            .unwrap_or(0);
        format!("...{}", &query[start..])
    } else {
        query.clone()
    };

    let input_line = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(display_query, Style::default().fg(theme.foreground)),
        Span::styled("_", Style::default().fg(theme.primary).add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let lines = vec![
        Line::from(Span::styled(
            " Front matter property holding parent links",
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        input_line,
        Line::from(Span::styled(
            format!(" Empty resets to \"{}\"", DEFAULT_TOPIC_PROPERTY),
            Style::default().fg(theme.muted),
        )),
    ];

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(" Topic property name ")
            .title_bottom(Line::from(Span::styled(
                " Enter: save, Esc: cancel ",
                Style::default().fg(theme.muted),
            )).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background_secondary)),
    );

    f.render_widget(dialog, dialog_area);
}
