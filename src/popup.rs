use anyhow::Result;

use crate::{
    dispatcher::{DispatchOutcome, InsertionDispatcher},
    error::{SnippetError, SnippetResult},
    model::Snippet,
    store::{KeyValueStorage, SnippetStore},
    transfer::export_snippets,
};

/// Everything the popup renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub commands: Vec<Snippet>,
    pub filter: String,
    pub edit_mode: bool,
}

/// One visible list row. `index` points into the full command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub label: String,
    pub detail: String,
}

impl PopupState {
    pub fn new(commands: Vec<Snippet>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn with_filter(self, filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..self
        }
    }

    pub fn toggled_edit_mode(self) -> Self {
        Self {
            edit_mode: !self.edit_mode,
            ..self
        }
    }

    pub fn with_commands(self, commands: Vec<Snippet>) -> Self {
        Self { commands, ..self }
    }

    pub fn visible_rows(&self) -> Vec<RowView> {
        let needle = self.filter.trim().to_lowercase();
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, c)| needle.is_empty() || c.search_text().contains(&needle))
            .map(|(index, c)| RowView {
                index,
                label: c.label.clone(),
                detail: if c.hint.is_empty() {
                    c.insert.clone()
                } else {
                    format!("{} {}", c.insert, c.hint)
                },
            })
            .collect()
    }

    pub fn edit_button_label(&self) -> &'static str {
        if self.edit_mode {
            "Done"
        } else {
            "Edit"
        }
    }
}

/// Values collected from the add/edit prompts. `None` means the prompt was
/// dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub label: Option<String>,
    pub insert: Option<String>,
    pub hint: Option<String>,
}

impl SnippetDraft {
    pub fn new(label: &str, insert: &str, hint: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            insert: Some(insert.to_string()),
            hint: Some(hint.to_string()),
        }
    }

    /// Label and insert are kept as typed; only blank values are refused.
    pub fn into_snippet(self) -> SnippetResult<Snippet> {
        let label = required(self.label, "label")?;
        let insert = required(self.insert, "insert text")?;
        Ok(Snippet {
            label,
            insert,
            hint: self.hint.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> SnippetResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SnippetError::EmptyField(field)),
    }
}

fn check_index(commands: &[Snippet], index: usize) -> SnippetResult<()> {
    if index < commands.len() {
        Ok(())
    } else {
        Err(SnippetError::OutOfRange {
            index,
            len: commands.len(),
        })
    }
}

pub fn with_added(mut commands: Vec<Snippet>, snippet: Snippet) -> Vec<Snippet> {
    commands.push(snippet);
    commands
}

pub fn with_replaced(
    mut commands: Vec<Snippet>,
    index: usize,
    snippet: Snippet,
) -> SnippetResult<Vec<Snippet>> {
    check_index(&commands, index)?;
    commands[index] = snippet;
    Ok(commands)
}

pub fn with_removed(mut commands: Vec<Snippet>, index: usize) -> SnippetResult<Vec<Snippet>> {
    check_index(&commands, index)?;
    commands.remove(index);
    Ok(commands)
}

/// Takes the entry at `from` out and re-inserts it at `to`, clamped to the end.
pub fn with_moved(mut commands: Vec<Snippet>, from: usize, to: usize) -> SnippetResult<Vec<Snippet>> {
    check_index(&commands, from)?;
    let item = commands.remove(from);
    let to = to.min(commands.len());
    commands.insert(to, item);
    Ok(commands)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivateOutcome {
    Dispatched(DispatchOutcome),
    /// Edit mode: the caller should prompt with this entry and call `edit`.
    Editing { index: usize, current: Snippet },
}

/// Drives the popup flows. Every mutation is persisted before the in-memory
/// state changes, so a failed write leaves the rendered list as it was.
pub struct PopupController<S: KeyValueStorage> {
    store: SnippetStore<S>,
    dispatcher: InsertionDispatcher,
    state: PopupState,
}

impl<S: KeyValueStorage> PopupController<S> {
    pub fn open(store: SnippetStore<S>, dispatcher: InsertionDispatcher) -> Result<Self> {
        let commands = store.load_or_default()?;
        Ok(Self {
            store,
            dispatcher,
            state: PopupState::new(commands),
        })
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn store(&self) -> &SnippetStore<S> {
        &self.store
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.state = std::mem::take(&mut self.state).with_filter(filter);
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.state = std::mem::take(&mut self.state).toggled_edit_mode();
        self.state.edit_mode
    }

    fn commit(&mut self, commands: Vec<Snippet>) -> SnippetResult<()> {
        self.store.save(&commands)?;
        self.state = std::mem::take(&mut self.state).with_commands(commands);
        Ok(())
    }

    pub fn add(&mut self, draft: SnippetDraft) -> SnippetResult<()> {
        let snippet = draft.into_snippet()?;
        self.commit(with_added(self.state.commands.clone(), snippet))
    }

    pub fn edit(&mut self, index: usize, draft: SnippetDraft) -> SnippetResult<()> {
        check_index(&self.state.commands, index)?;
        let snippet = draft.into_snippet()?;
        self.commit(with_replaced(self.state.commands.clone(), index, snippet)?)
    }

    pub fn delete(&mut self, index: usize) -> SnippetResult<()> {
        self.commit(with_removed(self.state.commands.clone(), index)?)
    }

    /// Returns whether anything moved.
    pub fn move_entry(&mut self, from: usize, to: usize) -> SnippetResult<bool> {
        if from == to {
            return Ok(false);
        }
        self.commit(with_moved(self.state.commands.clone(), from, to)?)?;
        Ok(true)
    }

    /// Replaces the list with the payload's valid entries and returns how
    /// many were imported.
    pub fn import(&mut self, raw: &str) -> SnippetResult<usize> {
        let imported = match self.store.import_from(raw) {
            Ok(imported) => imported,
            Err(err) => {
                tracing::warn!(error = %err, "import rejected");
                return Err(err);
            }
        };
        let count = imported.len();
        self.commit(imported)?;
        tracing::info!(count, "commands imported");
        Ok(count)
    }

    pub fn export(&self) -> Result<String> {
        export_snippets(&self.state.commands)
    }

    pub fn export_file(&self) -> Result<ExportFile> {
        Ok(ExportFile {
            file_name: self.store.settings().export_file_name.clone(),
            contents: self.export()?,
        })
    }

    /// Only a confirmed reset touches anything.
    pub fn reset(&mut self, confirmed: bool) -> SnippetResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        let defaults = self.store.reset()?;
        self.state = std::mem::take(&mut self.state).with_commands(defaults);
        Ok(true)
    }

    /// Row click: inserts outside edit mode, starts editing inside it.
    pub fn activate(&mut self, index: usize) -> SnippetResult<ActivateOutcome> {
        check_index(&self.state.commands, index)?;
        let current = self.state.commands[index].clone();
        if self.state.edit_mode {
            return Ok(ActivateOutcome::Editing { index, current });
        }
        let outcome = self.dispatcher.dispatch(&current.insert)?;
        Ok(ActivateOutcome::Dispatched(outcome))
    }
}

pub fn import_summary(count: usize) -> String {
    format!("Imported {count} commands.")
}
