use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::config::Theme;
use crate::link::LinkReference;
use crate::parents::{classify, ParentField};

pub fn render_note_view(f: &mut Frame, app: &mut App, area: Rect) {
    app.content_area = area;
    let theme = &app.theme;
    let border_color = if app.focus == Focus::Content { theme.primary } else { theme.muted };

    let Some(note) = app.current_note.as_ref() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            " Select a note in the sidebar",
            Style::default().fg(theme.muted),
        )))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border_color)));
        f.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Parent badges under the title, taken from the configured property
    let property = app.config.topic_property.as_str();
    let value = note.frontmatter.as_ref().and_then(|fm| fm.get(property));
    if let ParentField::ValidLinks(links) = classify(value) {
        if !links.is_empty() {
            let mut spans = vec![Span::styled(" ↑ ", Style::default().fg(theme.muted))];
            for (i, link) in links.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" · ", Style::default().fg(theme.muted)));
                }
                spans.push(Span::styled(link.display_name.clone(), Style::default().fg(theme.link)));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
    }

    lines.extend(
        note.body_lines()
            .skip(app.content_scroll)
            .map(|line| styled_line(line, theme)),
    );

    let view = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", note.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(view, area);
}

fn styled_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return Line::from(Span::styled(
            line,
            Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
        ));
    }

    // Render [[links]] with their display names
    let mut spans = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("[[") {
        let Some(len) = rest[start..].find("]]") else {
            break;
        };
        let end = start + len + 2;
        match LinkReference::parse(&rest[start..end]) {
            Some(link) => {
                spans.push(Span::raw(&rest[..start]));
                spans.push(Span::styled(
                    link.display_name,
                    Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED),
                ));
            }
            None => spans.push(Span::raw(&rest[..end])),
        }
        rest = &rest[end..];
    }
    spans.push(Span::styled(rest, Style::default().fg(theme.foreground)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_links_show_display_names() {
        let theme = Theme::default();
        let line = styled_line("See [[Folder/Topic|the topic]] and [[Other]].", &theme);
        assert_eq!(text(&line), "See the topic and Other.");
    }

    #[test]
    fn test_unclosed_link_is_kept() {
        let theme = Theme::default();
        let line = styled_line("broken [[link", &theme);
        assert_eq!(text(&line), "broken [[link");
    }
}
