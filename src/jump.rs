//! "Jump to parent topic note": reads the parent links of the active note
//! and either opens the single parent or lets the user pick one.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use serde_yaml::Value;

use crate::error::JumpError;
use crate::link::LinkReference;
use crate::parents::{classify, ParentField};
use crate::picker::{Picker, SelectableItem};

pub const PICKER_TITLE: &str = "Select superior topic note";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Host services the jump command relies on.
pub trait Workspace {
    /// Path of the note shown in the focused pane.
    fn active_note(&self) -> Option<PathBuf>;
    /// Name of the front matter property holding parent links.
    fn topic_property(&self) -> String;
    /// Raw front matter value of the active note under `property`.
    fn property_value(&self, property: &str) -> Option<Value>;
    fn resolve(&self, link_path: &str, source: &Path) -> Option<PathBuf>;
    fn open(&mut self, target: &Path) -> Result<(), JumpError>;
    fn notify(&mut self, level: NoticeLevel, message: String);
}

/// A parent chosen in the picker, waiting for the event loop to follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentChoice {
    pub link: LinkReference,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JumpOutcome {
    /// No active note, no parents declared, or an empty list
    Nothing,
    /// The property or one of its entries is malformed
    Rejected,
    PickerOpened,
    Opened(PathBuf),
    Failed,
}

pub fn jump_to_parent<W: Workspace>(
    workspace: &mut W,
    picker: &mut Picker<LinkReference>,
    chosen: &Sender<ParentChoice>,
) -> JumpOutcome {
    let Some(source) = workspace.active_note() else {
        tracing::debug!("jump to parent requested without an active note");
        return JumpOutcome::Nothing;
    };
    let property = workspace.topic_property();
    let value = workspace.property_value(&property);

    let mut links = match classify(value.as_ref()) {
        ParentField::Absent => return JumpOutcome::Nothing,
        ParentField::NotAList => {
            tracing::error!(
                note = %source.display(),
                property = %property,
                value = ?value,
                "parent property is not a list"
            );
            workspace.notify(
                NoticeLevel::Error,
                format!("Property \"{}\" must be a list of links", property),
            );
            return JumpOutcome::Rejected;
        }
        ParentField::InvalidEntries(offenders) => {
            for entry in &offenders {
                tracing::warn!(note = %source.display(), property = %property, entry = %entry, "invalid parent link");
            }
            workspace.notify(
                NoticeLevel::Warning,
                format!("Invalid links in \"{}\": {}", property, offenders.join(", ")),
            );
            return JumpOutcome::Rejected;
        }
        ParentField::ValidLinks(links) => links,
    };

    if links.len() < 2 {
        return match links.pop() {
            Some(link) => follow_link(workspace, &link, &source),
            None => JumpOutcome::Nothing,
        };
    }

    let items = links
        .into_iter()
        .map(|link| SelectableItem::new(link.display_name.clone(), link))
        .collect();
    let source_display = source.display().to_string();
    let sender = chosen.clone();
    picker.open(
        items,
        Box::new(move |item: SelectableItem<LinkReference>| {
            let choice = ParentChoice {
                link: item.payload,
                source,
            };
            if sender.send(choice).is_err() {
                tracing::warn!("parent choice dropped, receiver closed");
            }
        }),
        PICKER_TITLE,
    );
    tracing::debug!(note = %source_display, parents = ?picker.labels(), "opened parent picker");
    JumpOutcome::PickerOpened
}

/// Resolve `link` relative to `source` and open it, reporting failures to the user.
pub fn follow_link<W: Workspace>(workspace: &mut W, link: &LinkReference, source: &Path) -> JumpOutcome {
    let result = workspace
        .resolve(&link.resolvable_path, source)
        .ok_or_else(|| JumpError::NotFound(link.resolvable_path.clone()))
        .and_then(|target| workspace.open(&target).map(|_| target));

    match result {
        Ok(target) => {
            tracing::info!(from = %source.display(), to = %target.display(), "jumped to parent");
            JumpOutcome::Opened(target)
        }
        Err(e) => {
            match &e {
                JumpError::NotFound(path) => tracing::warn!(from = %source.display(), link = %path, "parent note not found"),
                JumpError::Open { path, source: io } => {
                    tracing::error!(path = %path.display(), error = %io, "failed to open parent note")
                }
            }
            workspace.notify(NoticeLevel::Warning, e.to_string());
            JumpOutcome::Failed
        }
    }
}
