use serde_yaml::{Mapping, Value};

/// The YAML header of a note, kept as a raw mapping so any configured
/// property can be looked up without a fixed schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    /// Parse YAML frontmatter from content.
    /// Returns the parsed Frontmatter (if valid) and the line index where content starts.
    pub fn parse(content: &str) -> (Option<Self>, usize) {
        let lines: Vec<&str> = content.lines().collect();

        if lines.is_empty() || lines[0].trim() != "---" {
            return (None, 0);
        }
        let end_index = match lines.iter().skip(1).position(|line| line.trim() == "---") {
            Some(i) => i + 1,
            None => return (None, 0), // No closing delimiter
        };

        let yaml_content: String = lines[1..end_index].join("\n");
        let content_start_line = end_index + 1;

        let fields = match serde_yaml::from_str::<Value>(&yaml_content) {
            Ok(Value::Mapping(map)) => map,
            // An empty header parses as null
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                tracing::debug!("frontmatter is not a mapping, ignoring");
                return (None, content_start_line);
            }
            Err(e) => {
                tracing::debug!("invalid frontmatter yaml: {}", e);
                return (None, content_start_line);
            }
        };

        (Some(Self { fields }), content_start_line)
    }

    /// Raw value stored under `name`, if the key exists.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = r#"---
title: Test Note
parents: ["[[Topic A]]", "[[Topic B]]"]
---
# Heading
Content here"#;

        let (fm, start) = Frontmatter::parse(content);
        let fm = fm.unwrap();
        assert_eq!(fm.get("title"), Some(&Value::String("Test Note".into())));
        let parents = fm.get("parents").unwrap().as_sequence().unwrap();
        assert_eq!(parents.len(), 2);
        assert_eq!(parents[0].as_str(), Some("[[Topic A]]"));
        assert_eq!(start, 4);
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let content = "# Just a heading\nSome content";
        let (fm, start) = Frontmatter::parse(content);
        assert!(fm.is_none());
        assert_eq!(start, 0);
    }

    #[test]
    fn test_parse_unclosed_frontmatter() {
        let content = "---\ntitle: Test\nNo closing delimiter";
        let (fm, start) = Frontmatter::parse(content);
        assert!(fm.is_none());
        assert_eq!(start, 0);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let content = "---\n: invalid yaml [\n---\nContent";
        let (fm, start) = Frontmatter::parse(content);
        assert!(fm.is_none());
        assert_eq!(start, 3);
    }

    #[test]
    fn test_parse_empty_header() {
        let (fm, start) = Frontmatter::parse("---\n---\nBody");
        assert_eq!(fm, Some(Frontmatter::default()));
        assert_eq!(start, 2);
    }

    #[test]
    fn test_parse_parents_multiline() {
        let content = r#"---
parents:
  - "[[Rust]]"
  - "[[Languages/Systems|Systems]]"
up: null
---
Content"#;

        let (fm, start) = Frontmatter::parse(content);
        let fm = fm.unwrap();
        assert_eq!(fm.get("parents").unwrap().as_sequence().unwrap().len(), 2);
        assert_eq!(fm.get("up"), Some(&Value::Null));
        assert!(fm.get("missing").is_none());
        assert_eq!(start, 6);
    }
}
