use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TOPIC_PROPERTY: &str = "parents";
pub const DEFAULT_JUMP_KEY: &str = "ctrl+u";

fn default_notes_dir() -> String {
    "~/Documents/topicjump".to_string()
}

fn default_topic_property() -> String {
    DEFAULT_TOPIC_PROPERTY.to_string()
}

fn default_jump_key() -> String {
    DEFAULT_JUMP_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
    /// Front matter property holding the parent links
    #[serde(default = "default_topic_property")]
    pub topic_property: String,
    /// Key combination for "jump to parent topic note"
    #[serde(default = "default_jump_key")]
    pub jump_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            topic_property: default_topic_property(),
            jump_key: default_jump_key(),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()).join(".config"))
            .join("topicjump")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load the config file, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        match Self::load_from(&Self::config_path()) {
            Ok(config) => config,
            Err(ConfigError::Io { ref source, .. }) if source.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_or_create() -> Self {
        let path = Self::config_path();
        if path.exists() {
            return Self::load();
        }
        let config = Self::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("could not write default config: {}", e);
        }
        config
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // A hand-edited blank property behaves like the settings field
        config.set_topic_property(&config.topic_property.clone());
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn notes_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.notes_dir).to_string())
    }

    /// Apply a value from the settings field: trimmed, empty falls back to the default.
    /// Returns true when the stored value changed.
    pub fn set_topic_property(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() { DEFAULT_TOPIC_PROPERTY } else { trimmed };
        if self.topic_property == value {
            return false;
        }
        self.topic_property = value.to_string();
        true
    }

    pub fn jump_binding(&self) -> KeyBinding {
        KeyBinding::parse(&self.jump_key).unwrap_or_else(|| {
            tracing::warn!("invalid jump_key {:?}, using {}", self.jump_key, DEFAULT_JUMP_KEY);
            KeyBinding {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL,
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Parse `"ctrl+u"`, `"alt+p"`, `"ctrl+shift+p"` or a bare character.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;
        for part in spec.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                key => {
                    let mut chars = key.chars();
                    let c = chars.next()?;
                    if chars.next().is_some() || code.is_some() {
                        return None;
                    }
                    code = Some(KeyCode::Char(c));
                }
            }
        }
        Some(Self { code: code?, modifiers })
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        code == self.code && key.modifiers == self.modifiers
    }

    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if let KeyCode::Char(c) = self.code {
            parts.push(c.to_ascii_uppercase().to_string());
        }
        parts.join("+")
    }
}

/// Fixed palette used by every view.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub foreground: Color,
    pub muted: Color,
    pub background_secondary: Color,
    pub selection_fg: Color,
    pub heading: Color,
    pub link: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(137, 180, 250),
            foreground: Color::Rgb(205, 214, 244),
            muted: Color::Rgb(108, 112, 134),
            background_secondary: Color::Rgb(30, 30, 46),
            selection_fg: Color::Rgb(17, 17, 27),
            heading: Color::Rgb(203, 166, 247),
            link: Color::Rgb(148, 226, 213),
            info: Color::Rgb(116, 199, 236),
            warning: Color::Rgb(249, 226, 175),
            error: Color::Rgb(243, 139, 168),
        }
    }
}
