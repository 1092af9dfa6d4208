mod help_dialog;
mod note_view;
mod notifications;
pub mod picker;
mod settings_dialog;
mod sidebar;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, DialogState};
use crate::picker::Modal;

const SIDEBAR_WIDTH: u16 = 30;

pub fn render(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(rows[0]);

    sidebar::render_sidebar(f, app, columns[0]);
    note_view::render_note_view(f, app, columns[1]);
    status_bar::render_status_bar(f, app, rows[1]);

    match app.dialog {
        DialogState::Settings => settings_dialog::render_settings_dialog(f, app),
        DialogState::Help => help_dialog::render_help_dialog(f, app),
        DialogState::None => {}
    }

    app.picker.render(f, &app.theme);

    notifications::render_notifications(f, app);
}
