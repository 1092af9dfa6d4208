//! Wikilink references as they appear in front matter, e.g.
//! `[[Folder/Note#Heading|Alias]]`.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    /// Text shown to the user (alias, or the last path segment)
    pub display_name: String,
    /// Path handed to the resolver, without heading or block anchors
    pub resolvable_path: String,
}

fn wrapper_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\[\[.+\]\]$").expect("wikilink pattern is valid"))
}

/// Check the surface syntax: the whole string must be wrapped in `[[` `]]`.
/// Links embedded in surrounding text are rejected.
pub fn is_link_reference(raw: &str) -> bool {
    wrapper_pattern().is_match(raw)
}

impl LinkReference {
    /// Parse a raw `[[...]]` string. Returns `None` when the wrapper is missing.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_link_reference(raw) {
            return None;
        }
        let inner = &raw[2..raw.len() - 2];

        let (path_part, alias) = match inner.find('|') {
            Some(pipe_pos) => (&inner[..pipe_pos], Some(&inner[pipe_pos + 1..])),
            None => (inner, None),
        };

        let basis = alias.unwrap_or(path_part);
        let display_name = basis.rsplit('/').next().unwrap_or(basis).to_string();

        let anchor_pos = path_part.find(['#', '^']).unwrap_or(path_part.len());
        let resolvable_path = path_part[..anchor_pos].to_string();

        Some(Self {
            display_name,
            resolvable_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> LinkReference {
        LinkReference::parse(raw).unwrap()
    }

    #[test]
    fn test_plain_link() {
        let link = parse("[[Topic A]]");
        assert_eq!(link.display_name, "Topic A");
        assert_eq!(link.resolvable_path, "Topic A");
    }

    #[test]
    fn test_alias_wins_display_name() {
        let link = parse("[[Folder/Topic B|Custom Alias]]");
        assert_eq!(link.display_name, "Custom Alias");
        assert_eq!(link.resolvable_path, "Folder/Topic B");
    }

    #[test]
    fn test_heading_stripped_from_path_only() {
        let link = parse("[[Folder/Topic B#Heading|Custom Alias]]");
        assert_eq!(link.resolvable_path, "Folder/Topic B");
        assert_eq!(link.display_name, "Custom Alias");
    }

    #[test]
    fn test_block_reference_stripped() {
        let link = parse("[[Journal/2024^abc123]]");
        assert_eq!(link.resolvable_path, "Journal/2024");
    }

    #[test]
    fn test_display_name_uses_last_segment() {
        let link = parse("[[Areas/Research/Topic C]]");
        assert_eq!(link.display_name, "Topic C");
        assert_eq!(link.resolvable_path, "Areas/Research/Topic C");
    }

    #[test]
    fn test_alias_with_slash_keeps_last_segment() {
        let link = parse("[[Topic D|a/b]]");
        assert_eq!(link.display_name, "b");
    }

    #[test]
    fn test_surface_syntax() {
        assert!(is_link_reference("[[A]]"));
        assert!(is_link_reference("[[A#h^b|c]]"));
        assert!(!is_link_reference("plain text"));
        assert!(!is_link_reference("see [[A]]"));
        assert!(!is_link_reference("[[A]] later"));
        assert!(!is_link_reference("[[]]"));
        assert!(!is_link_reference("[A]"));
        assert!(LinkReference::parse("A").is_none());
    }
}
