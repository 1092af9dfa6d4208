use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

pub fn render_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    app.sidebar_area = area;
    let theme = &app.theme;
    let labels = app.sidebar_labels();
    let visible = area.height.saturating_sub(2) as usize;

    if app.selected_sidebar_index < app.sidebar_scroll {
        app.sidebar_scroll = app.selected_sidebar_index;
    } else if visible > 0 && app.selected_sidebar_index >= app.sidebar_scroll + visible {
        app.sidebar_scroll = app.selected_sidebar_index + 1 - visible;
    }

    let current = app.current_note.as_ref().map(|n| n.path.as_path());
    let lines: Vec<Line> = labels
        .iter()
        .zip(app.vault.notes())
        .enumerate()
        .skip(app.sidebar_scroll)
        .take(visible)
        .map(|(idx, (label, path))| {
            let mut style = Style::default().fg(theme.foreground);
            if current == Some(path.as_path()) {
                style = style.fg(theme.primary).add_modifier(Modifier::BOLD);
            }
            if idx == app.selected_sidebar_index && app.focus == Focus::Sidebar {
                style = style.fg(theme.selection_fg).bg(theme.primary);
            }
            Line::from(Span::styled(format!(" {}", label), style))
        })
        .collect();

    let vault_name = app
        .vault
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "Notes".to_string());
    let border_color = if app.focus == Focus::Sidebar { theme.primary } else { theme.muted };
    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", vault_name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(sidebar, area);
}
