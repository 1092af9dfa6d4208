//! Notes directory on disk: discovery, link resolution and loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app::Frontmatter;

#[derive(Debug, Clone)]
pub struct Note {
    pub title: String,
    pub path: PathBuf,
    pub content: String,
    pub frontmatter: Option<Frontmatter>,
    /// First line after the front matter block
    pub body_start: usize,
}

impl Note {
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let (frontmatter, body_start) = Frontmatter::parse(&content);
        Ok(Self {
            title: note_title(path),
            path: path.to_path_buf(),
            content,
            frontmatter,
            body_start,
        })
    }

    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines().skip(self.body_start)
    }
}

fn note_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn strip_md_extension(target: &str) -> &str {
    match target.len().checked_sub(3) {
        Some(cut) if target.is_char_boundary(cut) && target[cut..].eq_ignore_ascii_case(".md") => &target[..cut],
        _ => target,
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[derive(Debug, Clone, Default)]
pub struct Vault {
    root: PathBuf,
    /// Every markdown file below `root`, sorted by path
    notes: Vec<PathBuf>,
}

impl Vault {
    pub fn open(root: &Path) -> io::Result<Self> {
        let mut notes = Vec::new();
        collect_notes(root, &mut notes)?;
        notes.sort();
        tracing::debug!(root = %root.display(), count = notes.len(), "scanned vault");
        Ok(Self {
            root: root.to_path_buf(),
            notes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes(&self) -> &[PathBuf] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Vault-relative path without the `.md` extension, as written in wikilinks.
    pub fn link_path(&self, note: &Path) -> Option<String> {
        let relative = note.strip_prefix(&self.root).ok()?;
        Some(relative.with_extension("").to_string_lossy().replace('\\', "/"))
    }

    /// Resolve a wikilink path.
    /// "folder/note" -> exact vault-relative path
    /// "note" -> file stem match, preferring the source note's folder, then the root
    pub fn resolve(&self, target: &str, source: &Path) -> Option<PathBuf> {
        let target = strip_md_extension(target.trim()).to_lowercase();
        if target.is_empty() {
            return None;
        }

        if target.contains('/') {
            let target = target.trim_start_matches('/');
            return self
                .notes
                .iter()
                .find(|note| self.link_path(note).is_some_and(|p| p.to_lowercase() == target))
                .cloned();
        }

        let candidates: Vec<&PathBuf> = self
            .notes
            .iter()
            .filter(|note| note_title(note).to_lowercase() == target)
            .collect();

        let source_dir = source.parent();
        candidates
            .iter()
            .find(|note| note.parent() == source_dir)
            .or_else(|| candidates.iter().find(|note| note.parent() == Some(self.root.as_path())))
            .or_else(|| candidates.first())
            .map(|note| note.to_path_buf())
    }
}

fn collect_notes(dir: &Path, notes: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden {
            continue;
        }
        if path.is_dir() {
            if let Err(e) = collect_notes(&path, notes) {
                tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable folder");
            }
        } else if is_markdown(&path) {
            notes.push(path);
        }
    }
    Ok(())
}
