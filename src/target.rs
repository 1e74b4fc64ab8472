//! Editable-element lookup.
//!
//! Resolution walks an ordered list of strategies; each strategy scans the
//! page in document order and the first strategy with a hit wins.

/// Attributes of a page element relevant to target matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Lower-case tag name.
    pub tag: String,
    /// Value of the `type` attribute, if present.
    pub input_type: Option<String>,
    /// Value of the `contenteditable` attribute, if present.
    pub content_editable: Option<String>,
}

impl ElementDescriptor {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_string());
        self
    }

    pub fn with_content_editable(mut self, value: &str) -> Self {
        self.content_editable = Some(value.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    ContentEditable,
    TextArea,
    TextInput,
}

#[derive(Clone, Copy)]
pub struct TargetStrategy {
    pub name: &'static str,
    pub kind: TargetKind,
    pub matches: fn(&ElementDescriptor) -> bool,
}

impl std::fmt::Debug for TargetStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetStrategy")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Position in the document-order element list.
    pub index: usize,
    pub kind: TargetKind,
}

pub fn is_content_editable(el: &ElementDescriptor) -> bool {
    matches!(
        el.content_editable.as_deref(),
        Some(v) if v.is_empty() || v.eq_ignore_ascii_case("true")
    )
}

pub fn is_textarea(el: &ElementDescriptor) -> bool {
    el.tag == "textarea"
}

/// `<input>` with no type or `type="text"`.
pub fn is_text_input(el: &ElementDescriptor) -> bool {
    el.tag == "input"
        && el
            .input_type
            .as_deref()
            .map_or(true, |t| t.eq_ignore_ascii_case("text"))
}

#[derive(Debug, Clone)]
pub struct TargetResolver {
    strategies: Vec<TargetStrategy>,
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(vec![
            TargetStrategy {
                name: "contenteditable",
                kind: TargetKind::ContentEditable,
                matches: is_content_editable,
            },
            TargetStrategy {
                name: "textarea",
                kind: TargetKind::TextArea,
                matches: is_textarea,
            },
            TargetStrategy {
                name: "text-input",
                kind: TargetKind::TextInput,
                matches: is_text_input,
            },
        ])
    }
}

impl TargetResolver {
    pub fn new(strategies: Vec<TargetStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[TargetStrategy] {
        &self.strategies
    }

    pub fn resolve(&self, elements: &[ElementDescriptor]) -> Option<ResolvedTarget> {
        self.strategies.iter().find_map(|strategy| {
            let index = elements.iter().position(strategy.matches)?;
            tracing::debug!(strategy = strategy.name, index, "insert target resolved");
            Some(ResolvedTarget {
                index,
                kind: strategy.kind,
            })
        })
    }
}
