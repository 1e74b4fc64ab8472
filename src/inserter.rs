//! Page-side insertion.
//!
//! The page is reached only through [`PageDocument`] and [`PageElement`], so
//! the insertion rules run the same against a live DOM binding or a test fake.
//! Text-field offsets are UTF-16 code units, matching what browsers report
//! for `selectionStart`/`selectionEnd`.

use serde_json::Value;

use crate::{
    message::PageMessage,
    target::{ElementDescriptor, TargetKind, TargetResolver},
};

/// Tells whatever observes an element that its value changed, the way a
/// bubbling `input` event does for reactive frameworks.
pub trait ChangeNotifier {
    fn notify_value_changed(&mut self);
}

pub trait PageElement: ChangeNotifier {
    fn focus(&mut self);

    /// Rich-text insertion at the caret, replacing any selected content.
    fn insert_at_caret(&mut self, text: &str);

    fn value(&self) -> Option<String>;

    /// `(selectionStart, selectionEnd)` as reported by the field.
    fn selection(&self) -> (Option<usize>, Option<usize>);

    fn set_value(&mut self, value: &str);

    fn set_selection(&mut self, start: usize, end: usize);
}

pub trait PageDocument {
    type Element: PageElement;

    /// All candidate elements in document order.
    fn describe_elements(&self) -> Vec<ElementDescriptor>;

    fn element_mut(&mut self, index: usize) -> Option<&mut Self::Element>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub value: String,
    /// Caret position after the inserted text, in UTF-16 code units.
    pub caret: usize,
}

/// Replaces `existing[start..end]` with `inserted`.
///
/// A missing start means end of text; a missing end means `start`.
/// Offsets past the end are clamped and an end before start collapses to start.
pub fn splice_text(
    existing: &str,
    start: Option<usize>,
    end: Option<usize>,
    inserted: &str,
) -> Splice {
    let len = utf16_len(existing);
    let start = start.unwrap_or(len).min(len);
    let end = end.unwrap_or(start).clamp(start, len);

    let head = byte_offset(existing, start);
    let tail = byte_offset(existing, end).max(head);

    let mut value = String::with_capacity(existing.len() + inserted.len());
    value.push_str(&existing[..head]);
    value.push_str(inserted);
    value.push_str(&existing[tail..]);

    Splice {
        value,
        caret: utf16_len(&existing[..head]) + utf16_len(inserted),
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Byte index for a UTF-16 offset, snapped forward to a char boundary.
fn byte_offset(s: &str, utf16_pos: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in s.char_indices() {
        if units >= utf16_pos {
            return idx;
        }
        units += ch.len_utf16();
    }
    s.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(TargetKind),
    NoTarget,
}

#[derive(Debug, Clone, Default)]
pub struct PageInserter {
    resolver: TargetResolver,
}

impl PageInserter {
    pub fn new(resolver: TargetResolver) -> Self {
        Self { resolver }
    }

    /// Entry point for the page's message listener. Returns `None` for
    /// messages that are not insert requests.
    pub fn handle_message<D: PageDocument>(
        &self,
        document: &mut D,
        raw: &Value,
    ) -> Option<InsertOutcome> {
        let message = PageMessage::decode(raw)?;
        Some(self.insert(document, message.text()))
    }

    pub fn insert<D: PageDocument>(&self, document: &mut D, text: &str) -> InsertOutcome {
        let Some(target) = self.resolver.resolve(&document.describe_elements()) else {
            tracing::debug!("no editable element on page");
            return InsertOutcome::NoTarget;
        };
        let Some(element) = document.element_mut(target.index) else {
            tracing::debug!(index = target.index, "resolved element vanished");
            return InsertOutcome::NoTarget;
        };

        insert_into(element, target.kind, text);
        InsertOutcome::Inserted(target.kind)
    }
}

pub fn insert_into<E: PageElement + ?Sized>(element: &mut E, kind: TargetKind, text: &str) {
    match kind {
        TargetKind::ContentEditable => {
            element.focus();
            element.insert_at_caret(text);
        }
        TargetKind::TextArea | TargetKind::TextInput => {
            let (start, end) = element.selection();
            let existing = element.value().unwrap_or_default();
            let splice = splice_text(&existing, start, end, text);
            element.set_value(&splice.value);
            element.focus();
            element.set_selection(splice.caret, splice.caret);
        }
    }
    element.notify_value_changed();
}
