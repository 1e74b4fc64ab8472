//! Quick-insert command library.
//!
//! Keeps a small, user-ordered list of text commands in a synced key-value
//! store and inserts a chosen command into the focused field of the active
//! page.
//!
//! - [`store`] / [`transfer`]: persistence, JSON import and export
//! - [`popup`]: popup state and the add/edit/delete/reorder/import/reset flows
//! - [`dispatcher`]: hands the chosen text to the active tab
//! - [`target`] / [`inserter`]: page-side element lookup and text splicing

pub mod dispatcher;
pub mod error;
pub mod inserter;
pub mod logging;
pub mod message;
pub mod model;
pub mod popup;
pub mod services;
pub mod settings;
pub mod store;
pub mod target;
pub mod transfer;

pub use error::{SnippetError, SnippetResult};
pub use model::{default_snippets, Snippet};
