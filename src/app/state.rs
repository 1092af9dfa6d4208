use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use serde_yaml::Value;

use crate::config::{Config, KeyBinding, Theme};
use crate::error::JumpError;
use crate::jump::{self, JumpOutcome, NoticeLevel, ParentChoice, Workspace};
use crate::link::LinkReference;
use crate::picker::{Modal, Picker};
use crate::vault::{Note, Vault};

use super::welcome_notes::create_welcome_notes;

const NOTIFICATION_TTL: Duration = Duration::from_secs(4);
const MAX_NOTIFICATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogState {
    None,
    Settings,
    Help,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

pub struct App {
    pub config: Config,
    config_path: PathBuf,
    pub theme: Theme,
    pub vault: Vault,
    pub current_note: Option<Note>,
    pub selected_sidebar_index: usize,
    pub sidebar_scroll: usize,
    pub content_scroll: usize,
    pub focus: Focus,
    pub dialog: DialogState,
    pub input_buffer: String,
    pub picker: Picker<LinkReference>,
    pub parent_sender: Sender<ParentChoice>,
    pub parent_receiver: Receiver<ParentChoice>,
    pub notifications: Vec<Notification>,
    // Navigation history (like browser back)
    pub navigation_history: Vec<PathBuf>,
    pub jump_binding: KeyBinding,
    pub sidebar_area: Rect,
    pub content_area: Rect,
    pub should_quit: bool,
}

impl App {
    /// Build the app from the user's config. `initial_path` may be a notes
    /// folder or a single note, which then also selects its folder.
    pub fn new_with_path(initial_path: Option<PathBuf>) -> Self {
        let config = Config::load_or_create();
        let (root, initial_note) = match initial_path {
            Some(path) if path.is_dir() => (path, None),
            Some(path) => {
                let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| config.notes_path());
                (root, Some(path))
            }
            None => (config.notes_path(), None),
        };

        if !root.exists() || Vault::open(&root).map(|v| v.is_empty()).unwrap_or(false) {
            if let Err(e) = create_welcome_notes(&root) {
                tracing::error!(dir = %root.display(), error = %e, "failed to create welcome notes");
            }
        }

        let mut app = Self::with_config(config, Config::config_path(), &root);
        match initial_note {
            Some(path) => {
                if let Err(e) = app.open(&path) {
                    app.notify(NoticeLevel::Error, e.to_string());
                }
            }
            None => app.open_selected_note(),
        }
        app
    }

    pub fn with_config(config: Config, config_path: PathBuf, root: &Path) -> Self {
        let vault = Vault::open(root).unwrap_or_else(|e| {
            tracing::error!(dir = %root.display(), error = %e, "failed to read notes directory");
            Vault::default()
        });
        let (parent_sender, parent_receiver) = mpsc::channel();
        let jump_binding = config.jump_binding();

        let mut app = Self {
            config,
            config_path,
            theme: Theme::default(),
            vault,
            current_note: None,
            selected_sidebar_index: 0,
            sidebar_scroll: 0,
            content_scroll: 0,
            focus: Focus::Sidebar,
            dialog: DialogState::None,
            input_buffer: String::new(),
            picker: Picker::new(),
            parent_sender,
            parent_receiver,
            notifications: Vec::new(),
            navigation_history: Vec::new(),
            jump_binding,
            sidebar_area: Rect::default(),
            content_area: Rect::default(),
            should_quit: false,
        };
        if app.vault.is_empty() {
            app.notify(NoticeLevel::Info, format!("No notes in {}", root.display()));
        }
        app
    }

    // ==================== Notes ====================

    pub fn sidebar_labels(&self) -> Vec<String> {
        self.vault
            .notes()
            .iter()
            .map(|path| self.vault.link_path(path).unwrap_or_else(|| path.display().to_string()))
            .collect()
    }

    pub fn select_next_note(&mut self) {
        let count = self.vault.notes().len();
        if count > 0 {
            self.selected_sidebar_index = (self.selected_sidebar_index + 1).min(count - 1);
        }
    }

    pub fn select_previous_note(&mut self) {
        self.selected_sidebar_index = self.selected_sidebar_index.saturating_sub(1);
    }

    pub fn open_selected_note(&mut self) {
        let Some(path) = self.vault.notes().get(self.selected_sidebar_index).cloned() else {
            return;
        };
        if let Err(e) = self.open(&path) {
            tracing::error!(error = %e, "failed to open selected note");
            self.notify(NoticeLevel::Warning, e.to_string());
        }
    }

    fn show_note(&mut self, note: Note) {
        // Showing another note dismisses any open picker
        self.picker.close();
        if let Some(index) = self.vault.notes().iter().position(|p| *p == note.path) {
            self.selected_sidebar_index = index;
        }
        self.content_scroll = 0;
        self.current_note = Some(note);
    }

    pub fn scroll_content(&mut self, delta: isize) {
        let lines = self.current_note.as_ref().map_or(0, |n| n.body_lines().count());
        let next = (self.content_scroll as isize + delta).max(0) as usize;
        self.content_scroll = next.min(lines.saturating_sub(1));
    }

    // ==================== Navigation History ====================

    pub fn go_back(&mut self) {
        while let Some(path) = self.navigation_history.pop() {
            match Note::load(&path) {
                Ok(note) => {
                    self.show_note(note);
                    return;
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable history entry"),
            }
        }
    }

    // ==================== Parent Topics ====================

    /// The "jump to parent topic note" command.
    pub fn jump_to_parent(&mut self) -> JumpOutcome {
        let sender = self.parent_sender.clone();
        let mut picker = std::mem::take(&mut self.picker);
        let outcome = jump::jump_to_parent(self, &mut picker, &sender);
        self.picker = picker;
        outcome
    }

    /// Follow parents chosen in the picker since the last call.
    pub fn process_parent_choices(&mut self) {
        while let Ok(choice) = self.parent_receiver.try_recv() {
            jump::follow_link(self, &choice.link, &choice.source);
        }
    }

    // ==================== Settings ====================

    pub fn open_settings(&mut self) {
        self.input_buffer = self.config.topic_property.clone();
        self.dialog = DialogState::Settings;
    }

    /// Apply the settings field and persist it right away.
    pub fn submit_settings(&mut self) {
        self.dialog = DialogState::None;
        let raw = std::mem::take(&mut self.input_buffer);
        if !self.config.set_topic_property(&raw) {
            return;
        }
        match self.config.save_to(&self.config_path) {
            Ok(()) => {
                tracing::info!(property = %self.config.topic_property, "topic property changed");
                self.notify(
                    NoticeLevel::Info,
                    format!("Parent links now read from \"{}\"", self.config.topic_property),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save config");
                self.notify(NoticeLevel::Warning, format!("Setting not saved: {}", e));
            }
        }
    }

    pub fn cancel_settings(&mut self) {
        self.dialog = DialogState::None;
        self.input_buffer.clear();
    }

    // ==================== Notifications ====================

    pub fn expire_notifications(&mut self) {
        self.notifications.retain(|n| n.created.elapsed() < NOTIFICATION_TTL);
    }
}

impl Workspace for App {
    fn active_note(&self) -> Option<PathBuf> {
        self.current_note.as_ref().map(|n| n.path.clone())
    }

    fn topic_property(&self) -> String {
        self.config.topic_property.clone()
    }

    fn property_value(&self, property: &str) -> Option<Value> {
        self.current_note.as_ref()?.frontmatter.as_ref()?.get(property).cloned()
    }

    fn resolve(&self, link_path: &str, source: &Path) -> Option<PathBuf> {
        self.vault.resolve(link_path, source)
    }

    fn open(&mut self, target: &Path) -> Result<(), JumpError> {
        let note = Note::load(target).map_err(|source| JumpError::Open {
            path: target.to_path_buf(),
            source,
        })?;
        if let Some(current) = self.current_note.as_ref() {
            if current.path != note.path {
                self.navigation_history.push(current.path.clone());
            }
        }
        self.show_note(note);
        Ok(())
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        self.notifications.push(Notification {
            level,
            message,
            created: Instant::now(),
        });
    }
}
