//! Classification of the parent-links property read from a note header.

use serde_yaml::Value;

use crate::link::LinkReference;

#[derive(Debug, Clone, PartialEq)]
pub enum ParentField {
    /// Property missing or null
    Absent,
    /// Property present but not a sequence
    NotAList,
    /// At least one entry is not a `[[...]]` string; holds every offender
    InvalidEntries(Vec<String>),
    /// Every entry is a link reference, in header order
    ValidLinks(Vec<LinkReference>),
}

/// Classify the raw property value. Any invalid entry rejects the whole list.
pub fn classify(value: Option<&Value>) -> ParentField {
    let entries = match value {
        None | Some(Value::Null) => return ParentField::Absent,
        Some(Value::Sequence(entries)) => entries,
        Some(_) => return ParentField::NotAList,
    };

    let mut links = Vec::with_capacity(entries.len());
    let mut offenders = Vec::new();
    for entry in entries {
        match entry.as_str().and_then(LinkReference::parse) {
            Some(link) => links.push(link),
            None => offenders.push(describe(entry)),
        }
    }

    if offenders.is_empty() {
        ParentField::ValidLinks(links)
    } else {
        ParentField::InvalidEntries(offenders)
    }
}

fn describe(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
