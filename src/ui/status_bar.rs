use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let note_path = app
        .current_note
        .as_ref()
        .map(|n| {
            let path_str = n.path.to_string_lossy().to_string();
            if let Some(home) = dirs::home_dir() {
                let home_str = home.to_string_lossy().to_string();
                if path_str.starts_with(&home_str) {
                    return path_str.replacen(&home_str, "~", 1);
                }
            }
            path_str
        })
        .unwrap_or_else(|| "—".to_string());

    let mode = match app.focus {
        Focus::Sidebar => "notes",
        Focus::Content => "content",
    };

    let left = vec![
        Span::styled(" topicjump ", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled("›", Style::default().fg(theme.muted)),
        Span::styled(format!(" {} ", mode), Style::default().fg(theme.foreground)),
        Span::styled("›", Style::default().fg(theme.muted)),
        Span::styled(format!(" {}", note_path), Style::default().fg(theme.foreground)),
    ];

    let hint = format!(
        "{}: parent  ,: {}  ?: help ",
        app.jump_binding.label(),
        app.config.topic_property
    );
    let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + hint.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(hint, Style::default().fg(theme.muted)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
