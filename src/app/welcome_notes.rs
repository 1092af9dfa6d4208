//! Sample notes written into a new, empty notes directory.

use std::fs;
use std::io;
use std::path::Path;

pub const GETTING_STARTED_CONTENT: &str = r#"---
title: Getting Started
parents:
  - "[[Topics/Knowledge Base]]"
  - "[[Topics/Tools|Tooling]]"
---

# Getting Started

Notes declare their parent topics in the front matter:

    parents:
      - "[[Topics/Knowledge Base]]"
      - "[[Topics/Tools|Tooling]]"

## Jumping up

- `Ctrl+u`: jump to a parent topic note
- one parent opens directly, several open a picker
- in the picker use `j/k` or arrows, `Enter` to open, `Esc` to cancel
- the mouse works too: hover a row and click it

## Other keys

- `Tab`: switch between the note list and the note
- `Backspace`: go back to the previous note
- `,`: change the front matter property used for parents
- `?`: help
- `q`: quit
"#;

pub const KNOWLEDGE_BASE_CONTENT: &str = r#"---
parents: ["[[Home]]"]
---

# Knowledge Base

This note has a single parent, so `Ctrl+u` opens [[Home]] straight away.
"#;

pub const TOOLS_CONTENT: &str = r#"---
parents: ["[[Home]]", "Home"]
---

# Tools

The second parent entry is not a wikilink, so jumping from here shows a
warning and goes nowhere.
"#;

pub const HOME_CONTENT: &str = r#"# Home

The top of the hierarchy. There is no `parents` property here, so `Ctrl+u`
does nothing.
"#;

/// Write the sample notes into `dir`.
pub fn create_welcome_notes(dir: &Path) -> io::Result<()> {
    let topics = dir.join("Topics");
    fs::create_dir_all(&topics)?;
    fs::write(dir.join("Getting Started.md"), GETTING_STARTED_CONTENT)?;
    fs::write(dir.join("Home.md"), HOME_CONTENT)?;
    fs::write(topics.join("Knowledge Base.md"), KNOWLEDGE_BASE_CONTENT)?;
    fs::write(topics.join("Tools.md"), TOOLS_CONTENT)?;
    tracing::info!(dir = %dir.display(), "created welcome notes");
    Ok(())
}
