use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::jump::NoticeLevel;

const TOAST_MAX_WIDTH: u16 = 48;

/// Stack transient messages in the top right corner, newest at the bottom.
pub fn render_notifications(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let mut y = area.y + 1;

    for notification in &app.notifications {
        let (title, color) = match notification.level {
            NoticeLevel::Info => (" Info ", theme.info),
            NoticeLevel::Warning => (" Warning ", theme.warning),
            NoticeLevel::Error => (" Error ", theme.error),
        };

        let width = (notification.message.width() as u16 + 4)
            .min(TOAST_MAX_WIDTH)
            .min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let text_lines = notification.message.width().div_ceil(inner_width).max(1) as u16;
        let height = text_lines + 2;
        if y + height > area.y + area.height {
            break;
        }

        let toast_area = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, height);
        f.render_widget(Clear, toast_area);
        let toast = Paragraph::new(Line::from(Span::styled(
            notification.message.as_str(),
            Style::default().fg(theme.foreground),
        )))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.background_secondary)),
        );
        f.render_widget(toast, toast_area);
        y += height;
    }
}
