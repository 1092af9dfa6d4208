use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, DialogState, Focus};
use crate::picker::Modal;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.expire_notifications();
        terminal.draw(|f| ui::render(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            _ => {}
        }
        // Parents picked during this event are followed after the picker closed
        app.process_parent_choices();

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.picker.handle_key(key) {
        return;
    }

    match app.dialog {
        DialogState::Settings => {
            handle_settings_key(app, key);
            return;
        }
        DialogState::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.dialog = DialogState::None;
            }
            return;
        }
        DialogState::None => {}
    }

    if app.jump_binding.matches(&key) {
        app.jump_to_parent();
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('?') => app.dialog = DialogState::Help,
        KeyCode::Char(',') => app.open_settings(),
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            }
        }
        KeyCode::Backspace => app.go_back(),
        KeyCode::Down | KeyCode::Char('j') => match app.focus {
            Focus::Sidebar => app.select_next_note(),
            Focus::Content => app.scroll_content(1),
        },
        KeyCode::Up | KeyCode::Char('k') => match app.focus {
            Focus::Sidebar => app.select_previous_note(),
            Focus::Content => app.scroll_content(-1),
        },
        KeyCode::Enter if app.focus == Focus::Sidebar => {
            app.open_selected_note();
            app.focus = Focus::Content;
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_settings(),
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.input_buffer.push(c),
        _ => {}
    }
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.picker.handle_mouse(mouse) {
        return;
    }
    if app.dialog != DialogState::None {
        return;
    }

    let inside = |area: ratatui::layout::Rect| {
        mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside(app.sidebar_area) => {
            app.focus = Focus::Sidebar;
            // One row per note below the top border
            let row = mouse.row.saturating_sub(app.sidebar_area.y + 1) as usize;
            let index = app.sidebar_scroll + row;
            if mouse.row > app.sidebar_area.y && index < app.vault.notes().len() {
                app.selected_sidebar_index = index;
                app.open_selected_note();
            }
        }
        MouseEventKind::Down(MouseButton::Left) if inside(app.content_area) => app.focus = Focus::Content,
        MouseEventKind::ScrollDown if inside(app.content_area) => app.scroll_content(3),
        MouseEventKind::ScrollUp if inside(app.content_area) => app.scroll_content(-3),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;

    fn app_with(files: &[(&str, &str)]) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let vault = dir.path().join("vault");
        for (name, content) in files {
            let path = vault.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let mut app = App::with_config(Config::default(), dir.path().join("config.toml"), &vault);
        app.open_selected_note();
        (dir, app)
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_key_event(app, KeyEvent::new(code, modifiers));
        app.process_parent_choices();
    }

    fn title(app: &App) -> &str {
        &app.current_note.as_ref().unwrap().title
    }

    #[test]
    fn test_jump_key_opens_picker_and_enter_follows() {
        let (_dir, mut app) = app_with(&[
            ("A.md", "---\nparents: [\"[[B]]\", \"[[C]]\"]\n---\n"),
            ("B.md", "b"),
            ("C.md", "c"),
        ]);
        assert_eq!(title(&app), "A");

        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(app.picker.is_open());
        // Keys go to the picker, not the sidebar
        press(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.selected_sidebar_index, 0);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(!app.picker.is_open());
        assert_eq!(title(&app), "C");
    }

    #[test]
    fn test_escape_in_picker_stays_on_note() {
        let (_dir, mut app) = app_with(&[
            ("A.md", "---\nparents: [\"[[B]]\", \"[[C]]\"]\n---\n"),
            ("B.md", "b"),
            ("C.md", "c"),
        ]);
        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.picker.is_open());
        assert!(!app.should_quit);
        assert_eq!(title(&app), "A");
    }

    #[test]
    fn test_settings_dialog_typing() {
        let (_dir, mut app) = app_with(&[("A.md", "a")]);
        press(&mut app, KeyCode::Char(','), KeyModifiers::NONE);
        assert_eq!(app.dialog, DialogState::Settings);
        for _ in 0.."parents".len() {
            press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        }
        for c in "up".chars() {
            press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        // 'q' is text here, not quit
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.config.topic_property, "upq");
    }

    #[test]
    fn test_quit_and_help() {
        let (_dir, mut app) = app_with(&[("A.md", "a")]);
        press(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.dialog, DialogState::Help);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.dialog, DialogState::None);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_backspace_goes_back_after_jump() {
        let (_dir, mut app) = app_with(&[("A.md", "---\nparents: [\"[[B]]\"]\n---\n"), ("B.md", "b")]);
        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(title(&app), "B");
        press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(title(&app), "A");
    }
}
