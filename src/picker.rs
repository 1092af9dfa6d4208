//! Generic modal selection list.
//!
//! A [`Picker`] shows an ordered list of labeled items and reports the chosen
//! one through a single-shot callback. Keyboard and pointer input share one
//! highlight: hovering a row takes over the highlight, and the next keyboard
//! move continues from the hovered row.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};

use crate::config::Theme;

/// Capabilities every modal overlay offers to the event loop.
pub trait Modal {
    fn is_open(&self) -> bool;
    fn render(&mut self, f: &mut Frame, theme: &Theme);
    /// Returns true when the key was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
    /// Returns true when the mouse event was consumed.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool;
    /// Dismiss without choosing anything.
    fn close(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem<T> {
    pub label: String,
    pub payload: T,
}

impl<T> SelectableItem<T> {
    pub fn new(label: impl Into<String>, payload: T) -> Self {
        Self {
            label: label.into(),
            payload,
        }
    }
}

/// Called with the chosen item. At most once per session.
pub type OnSelect<T> = Box<dyn FnOnce(SelectableItem<T>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Keyboard-driven position
    Active(usize),
    /// Pointer is over `hovered`; `active` is remembered but not shown
    Hovered { active: usize, hovered: usize },
    /// Pointer left the rows; nothing is shown until the next move or hover
    Hidden { active: usize },
}

impl Highlight {
    /// Row currently drawn as highlighted.
    pub fn rendered(self) -> Option<usize> {
        match self {
            Highlight::Active(i) => Some(i),
            Highlight::Hovered { hovered, .. } => Some(hovered),
            Highlight::Hidden { .. } => None,
        }
    }

    /// Keyboard position after folding in any hover.
    fn anchor(self) -> usize {
        match self {
            Highlight::Active(i) => i,
            Highlight::Hovered { hovered, .. } => hovered,
            Highlight::Hidden { active } => active,
        }
    }

    fn active(self) -> usize {
        match self {
            Highlight::Active(active) | Highlight::Hovered { active, .. } | Highlight::Hidden { active } => active,
        }
    }
}

pub(crate) struct Session<T> {
    pub(crate) title: String,
    pub(crate) items: Vec<SelectableItem<T>>,
    pub(crate) highlight: Highlight,
    pub(crate) scroll_offset: usize,
    /// Popup and row areas from the last render, for mouse hit-testing
    pub(crate) popup_area: Rect,
    pub(crate) rows_area: Rect,
    on_select: OnSelect<T>,
}

pub struct Picker<T> {
    pub(crate) session: Option<Session<T>>,
}

impl<T> Default for Picker<T> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<T> std::fmt::Debug for Picker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.session {
            Some(session) => f
                .debug_struct("Picker")
                .field("title", &session.title)
                .field("items", &session.items.len())
                .field("highlight", &session.highlight)
                .finish(),
            None => f.write_str("Picker(closed)"),
        }
    }
}

impl<T> Picker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over `items`. An empty list is refused: the picker
    /// stays closed and `on_select` is dropped unused. A session that is
    /// already open is cancelled first.
    pub fn open(&mut self, items: Vec<SelectableItem<T>>, on_select: OnSelect<T>, title: impl Into<String>) {
        if self.session.is_some() {
            tracing::debug!("picker reopened, cancelling previous session");
            self.cancel();
        }
        if items.is_empty() {
            tracing::warn!("refusing to open picker over an empty list");
            return;
        }
        self.session = Some(Session {
            title: title.into(),
            items,
            highlight: Highlight::Active(0),
            scroll_offset: 0,
            popup_area: Rect::default(),
            rows_area: Rect::default(),
            on_select,
        });
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.session.as_ref().map(|s| s.highlight)
    }

    /// Row drawn as highlighted, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight().and_then(Highlight::rendered)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.session
            .as_ref()
            .map(|s| s.items.iter().map(|item| item.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Move the keyboard highlight by `delta` rows, wrapping both ways.
    pub fn move_highlight(&mut self, delta: isize) {
        if let Some(session) = self.session.as_mut() {
            let len = session.items.len() as isize;
            let next = (session.highlight.anchor() as isize + delta).rem_euclid(len) as usize;
            session.highlight = Highlight::Active(next);
        }
    }

    pub fn pointer_enter(&mut self, index: usize) {
        if let Some(session) = self.session.as_mut() {
            if index < session.items.len() {
                let active = session.highlight.active();
                session.highlight = Highlight::Hovered { active, hovered: index };
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let active = session.highlight.active();
            session.highlight = Highlight::Hidden { active };
        }
    }

    /// Select the highlighted row; a hovered row takes precedence.
    pub fn confirm(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let index = session.highlight.anchor();
            session.highlight = Highlight::Active(index);
            self.select(index);
        }
    }

    /// Choose `index`, run the callback and close. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        let in_range = self.session.as_ref().is_some_and(|s| index < s.items.len());
        if !in_range {
            tracing::debug!("ignoring picker selection {} (closed or out of range)", index);
            return;
        }
        if let Some(session) = self.session.take() {
            let Session { mut items, on_select, .. } = session;
            let item = items.swap_remove(index);
            on_select(item);
        }
    }

    /// Close without choosing.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let session = self.session.as_ref()?;
        let area = session.rows_area;
        if !contains(area, column, row) {
            return None;
        }
        let index = session.scroll_offset + (row - area.y) as usize;
        (index < session.items.len()).then_some(index)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

impl<T> Modal for Picker<T> {
    fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn render(&mut self, f: &mut Frame, theme: &Theme) {
        let highlighted = self.highlighted();
        if let Some(session) = self.session.as_mut() {
            crate::ui::picker::render_picker(f, session, highlighted, theme);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.is_open() || key.kind != KeyEventKind::Press {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Down | KeyCode::Tab => self.move_highlight(1),
            KeyCode::Up | KeyCode::BackTab => self.move_highlight(-1),
            KeyCode::Char('n') if ctrl => self.move_highlight(1),
            KeyCode::Char('p') if ctrl => self.move_highlight(-1),
            KeyCode::Char('c') if ctrl => self.cancel(),
            KeyCode::Char('j') => self.move_highlight(1),
            KeyCode::Char('k') => self.move_highlight(-1),
            KeyCode::Enter => self.confirm(),
            KeyCode::Esc | KeyCode::Char('q') => self.cancel(),
            _ => {}
        }
        // Modal: swallow everything while open
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let popup_area = session.popup_area;
        let hovering = matches!(session.highlight, Highlight::Hovered { .. });
        let row = self.row_at(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => match row {
                Some(index) => self.pointer_enter(index),
                None if hovering => self.pointer_leave(),
                None => {}
            },
            MouseEventKind::Down(MouseButton::Left) => match row {
                Some(index) => self.select(index),
                None if !contains(popup_area, mouse.column, mouse.row) => self.cancel(),
                None => {}
            },
            MouseEventKind::ScrollDown => self.move_highlight(1),
            MouseEventKind::ScrollUp => self.move_highlight(-1),
            _ => {}
        }
        true
    }

    fn close(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Picked = Rc<RefCell<Vec<SelectableItem<usize>>>>;

    fn open_picker(labels: &[&str]) -> (Picker<usize>, Picked) {
        let picked: Picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&picked);
        let items = labels
            .iter()
            .enumerate()
            .map(|(i, label)| SelectableItem::new(*label, i))
            .collect();
        let mut picker = Picker::new();
        picker.open(items, Box::new(move |item| sink.borrow_mut().push(item)), "Pick");
        (picker, picked)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_open_highlights_first_row() {
        for n in 1..6 {
            let labels: Vec<String> = (0..n).map(|i| format!("item {}", i)).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let (picker, _) = open_picker(&refs);
            assert!(picker.is_open());
            assert_eq!(picker.highlighted(), Some(0));
            assert_eq!(picker.highlight(), Some(Highlight::Active(0)));
        }
    }

    #[test]
    fn test_move_wraps_full_circle() {
        for n in 1..7 {
            let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let (mut picker, _) = open_picker(&refs);
            picker.move_highlight(1);
            let start = picker.highlighted();
            for _ in 0..n {
                picker.move_highlight(1);
            }
            assert_eq!(picker.highlighted(), start);
        }
    }

    #[test]
    fn test_move_up_inverts_move_down() {
        let (mut picker, _) = open_picker(&["a", "b", "c", "d"]);
        for start in 0..4 {
            while picker.highlighted() != Some(start) {
                picker.move_highlight(1);
            }
            picker.move_highlight(1);
            picker.move_highlight(-1);
            assert_eq!(picker.highlighted(), Some(start));
        }
        picker.move_highlight(-1);
        picker.move_highlight(-1);
        picker.move_highlight(-1);
        picker.move_highlight(-1);
        picker.move_highlight(-1);
        assert_eq!(picker.highlighted(), Some(2));
    }

    #[test]
    fn test_single_item_stays_highlighted() {
        let (mut picker, _) = open_picker(&["only"]);
        picker.move_highlight(1);
        assert_eq!(picker.highlighted(), Some(0));
        picker.move_highlight(-1);
        assert_eq!(picker.highlighted(), Some(0));
    }

    #[test]
    fn test_hover_then_move_continues_from_hovered() {
        let (mut picker, _) = open_picker(&["a", "b", "c", "d", "e"]);
        picker.move_highlight(1);
        picker.pointer_enter(3);
        assert_eq!(picker.highlighted(), Some(3));
        assert_eq!(picker.highlight(), Some(Highlight::Hovered { active: 1, hovered: 3 }));
        picker.move_highlight(1);
        assert_eq!(picker.highlighted(), Some(4));

        picker.pointer_enter(4);
        picker.move_highlight(1);
        assert_eq!(picker.highlighted(), Some(0));

        picker.pointer_enter(0);
        picker.move_highlight(-1);
        assert_eq!(picker.highlighted(), Some(4));
    }

    #[test]
    fn test_pointer_leave_hides_highlight() {
        let (mut picker, _) = open_picker(&["a", "b", "c"]);
        picker.move_highlight(1);
        picker.pointer_enter(2);
        picker.pointer_leave();
        assert_eq!(picker.highlighted(), None);
        // Keyboard resumes from the last keyboard position
        picker.move_highlight(1);
        assert_eq!(picker.highlighted(), Some(2));
    }

    #[test]
    fn test_hover_after_leave_shows_again() {
        let (mut picker, _) = open_picker(&["a", "b"]);
        picker.pointer_leave();
        assert_eq!(picker.highlighted(), None);
        picker.pointer_enter(1);
        assert_eq!(picker.highlighted(), Some(1));
    }

    #[test]
    fn test_select_invokes_callback_once_with_item() {
        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        picker.select(1);
        assert!(!picker.is_open());
        picker.select(1);
        picker.confirm();
        let picked = picked.borrow();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0], SelectableItem::new("b", 1));
    }

    #[test]
    fn test_duplicate_labels_select_by_position() {
        let (mut picker, picked) = open_picker(&["same", "same"]);
        picker.select(1);
        assert_eq!(picked.borrow()[0].payload, 1);
    }

    #[test]
    fn test_cancel_never_invokes_callback() {
        let (mut picker, picked) = open_picker(&["a", "b"]);
        picker.move_highlight(1);
        picker.cancel();
        assert!(!picker.is_open());
        picker.confirm();
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn test_confirm_selects_highlighted() {
        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        picker.move_highlight(-1);
        picker.confirm();
        assert_eq!(picked.borrow()[0].payload, 2);

        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        picker.pointer_enter(1);
        picker.confirm();
        assert_eq!(picked.borrow()[0].payload, 1);
    }

    #[test]
    fn test_confirm_after_leave_uses_active() {
        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        picker.move_highlight(1);
        picker.move_highlight(1);
        picker.pointer_enter(0);
        picker.pointer_leave();
        picker.confirm();
        assert_eq!(picked.borrow()[0].payload, 2);
    }

    #[test]
    fn test_empty_list_is_refused() {
        let called = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&called);
        let mut picker: Picker<()> = Picker::new();
        picker.open(Vec::new(), Box::new(move |_| *flag.borrow_mut() = true), "Empty");
        assert!(!picker.is_open());
        assert!(!*called.borrow());
    }

    #[test]
    fn test_reopen_cancels_previous_session() {
        let (mut picker, first) = open_picker(&["a", "b"]);
        let second: Picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&second);
        picker.open(
            vec![SelectableItem::new("x", 9)],
            Box::new(move |item| sink.borrow_mut().push(item)),
            "Again",
        );
        picker.confirm();
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow()[0].payload, 9);
    }

    #[test]
    fn test_key_mapping() {
        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        assert!(picker.handle_key(key(KeyCode::Down)));
        assert!(picker.handle_key(key(KeyCode::Char('j'))));
        assert_eq!(picker.highlighted(), Some(2));
        picker.handle_key(key(KeyCode::Up));
        picker.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert_eq!(picker.highlighted(), Some(0));
        picker.handle_key(key(KeyCode::BackTab));
        picker.handle_key(key(KeyCode::Enter));
        assert_eq!(picked.borrow()[0].payload, 2);
        assert!(!picker.handle_key(key(KeyCode::Down)));
    }

    #[test]
    fn test_escape_cancels() {
        let (mut picker, picked) = open_picker(&["a", "b"]);
        picker.handle_key(key(KeyCode::Esc));
        assert!(!picker.is_open());
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn test_mouse_hover_leave_and_click() {
        let (mut picker, picked) = open_picker(&["a", "b", "c"]);
        if let Some(session) = picker.session.as_mut() {
            session.popup_area = Rect::new(10, 5, 30, 7);
            session.rows_area = Rect::new(11, 7, 28, 3);
        }

        picker.handle_mouse(mouse(MouseEventKind::Moved, 15, 8));
        assert_eq!(picker.highlighted(), Some(1));
        picker.handle_mouse(mouse(MouseEventKind::Moved, 15, 6));
        assert_eq!(picker.highlighted(), None);
        // Moving elsewhere without a hover does not hide anything further
        picker.handle_key(key(KeyCode::Down));
        picker.handle_mouse(mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(picker.highlighted(), Some(1));

        picker.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 9));
        assert!(!picker.is_open());
        assert_eq!(picked.borrow()[0].payload, 2);
    }

    #[test]
    fn test_click_outside_popup_cancels() {
        let (mut picker, picked) = open_picker(&["a", "b"]);
        if let Some(session) = picker.session.as_mut() {
            session.popup_area = Rect::new(10, 5, 30, 6);
            session.rows_area = Rect::new(11, 7, 28, 2);
        }
        picker.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 6));
        assert!(picker.is_open());
        picker.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(!picker.is_open());
        assert!(picked.borrow().is_empty());
    }
}
