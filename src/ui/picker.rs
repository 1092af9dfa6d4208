use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::picker::Session;

const POPUP_MAX_WIDTH: u16 = 60;
const POPUP_MIN_WIDTH: u16 = 30;
const POPUP_MAX_VISIBLE_ITEMS: usize = 10;

pub(crate) fn render_picker<T>(f: &mut Frame, session: &mut Session<T>, highlighted: Option<usize>, theme: &Theme) {
    let area = f.area();

    let longest = session
        .items
        .iter()
        .map(|item| item.label.width())
        .chain(std::iter::once(session.title.width()))
        .max()
        .unwrap_or(0) as u16;
    let popup_width = longest
        .saturating_add(6)
        .clamp(POPUP_MIN_WIDTH, POPUP_MAX_WIDTH)
        .min(area.width.saturating_sub(4));

    let visible_items = session.items.len().min(POPUP_MAX_VISIBLE_ITEMS);
    // Rows plus top/bottom padding and borders
    let popup_height = (visible_items as u16 + 4).min(area.height.saturating_sub(2));

    // Center the popup
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let rows_area = Rect::new(
        popup_area.x + 1,
        popup_area.y + 2,
        popup_area.width.saturating_sub(2),
        popup_area.height.saturating_sub(4),
    );

    // Keep the highlighted row in view
    let visible_rows = rows_area.height as usize;
    if let Some(row) = highlighted {
        if row < session.scroll_offset {
            session.scroll_offset = row;
        } else if visible_rows > 0 && row >= session.scroll_offset + visible_rows {
            session.scroll_offset = row + 1 - visible_rows;
        }
    }
    session.popup_area = popup_area;
    session.rows_area = rows_area;

    f.render_widget(Clear, popup_area);

    let counter = match highlighted {
        Some(index) => format!(" {}/{} ", index + 1, session.items.len()),
        None => format!(" {} ", session.items.len()),
    };
    let block = Block::default()
        .title(format!(" {} ", session.title))
        .title_bottom(Line::from(Span::styled(counter, Style::default().fg(theme.muted))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.info))
        .style(Style::default().bg(theme.background_secondary));
    f.render_widget(block, popup_area);

    let content_width = rows_area.width as usize;
    let max_label_width = content_width.saturating_sub(3);
    let lines: Vec<Line> = session
        .items
        .iter()
        .enumerate()
        .skip(session.scroll_offset)
        .take(visible_rows)
        .map(|(idx, item)| {
            let is_selected = highlighted == Some(idx);
            let label = truncate(&item.label, max_label_width);
            let used_width = 1 + label.width();
            let padding = " ".repeat(content_width.saturating_sub(used_width));

            if is_selected {
                let style = Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.primary)
                    .add_modifier(Modifier::BOLD);
                Line::from(vec![
                    Span::styled(" ", style),
                    Span::styled(label, style),
                    Span::styled(padding, style),
                ])
            } else {
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(label, Style::default().fg(theme.foreground)),
                ])
            }
        })
        .collect();

    let list = Paragraph::new(lines).style(Style::default().bg(theme.background_secondary));
    f.render_widget(list, rows_area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
