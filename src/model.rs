use serde::{Deserialize, Serialize};

/// A stored command: a button label, the text it inserts, and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub label: String,
    pub insert: String,
    #[serde(default)]
    pub hint: String,
}

impl Snippet {
    pub fn new(label: impl Into<String>, insert: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            insert: insert.into(),
            hint: hint.into(),
        }
    }

    /// Label and insert text must both carry something other than whitespace.
    pub fn is_valid(&self) -> bool {
        !self.label.trim().is_empty() && !self.insert.trim().is_empty()
    }

    /// Text the popup filter matches against.
    pub fn search_text(&self) -> String {
        format!("{}{}{}", self.label, self.insert, self.hint).to_lowercase()
    }
}

/// Seed collection written on first run and on reset.
pub fn default_snippets() -> Vec<Snippet> {
    vec![Snippet::new(
        "Example",
        "/example ",
        "(This is an example command.)",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_defaults_to_empty() {
        let snippet: Snippet =
            serde_json::from_str(r#"{"label":"A","insert":"/a"}"#).expect("parse snippet");
        assert_eq!(snippet, Snippet::new("A", "/a", ""));
    }

    #[test]
    fn whitespace_only_fields_are_invalid() {
        assert!(!Snippet::new("  ", "/a", "").is_valid());
        assert!(!Snippet::new("A", "\t", "").is_valid());
        assert!(Snippet::new("A", "/a ", "").is_valid());
    }

    #[test]
    fn default_seed_is_valid() {
        let seed = default_snippets();
        assert_eq!(seed.len(), 1);
        assert!(seed.iter().all(Snippet::is_valid));
        assert_eq!(seed[0].insert, "/example ");
    }
}
