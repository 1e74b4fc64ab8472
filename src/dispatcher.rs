use anyhow::Result;

use crate::{
    message::PageMessage,
    services::{PopupWindow, TabId, TabService},
    settings::ExtensionSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent(TabId),
    NoActiveTab,
}

/// Hands a command's insert text to the active tab and closes the popup.
pub struct InsertionDispatcher {
    tabs: Box<dyn TabService>,
    window: Box<dyn PopupWindow>,
    close_after_insert: bool,
}

impl InsertionDispatcher {
    pub fn new(tabs: Box<dyn TabService>, window: Box<dyn PopupWindow>) -> Self {
        Self {
            tabs,
            window,
            close_after_insert: true,
        }
    }

    pub fn from_settings(
        tabs: Box<dyn TabService>,
        window: Box<dyn PopupWindow>,
        settings: &ExtensionSettings,
    ) -> Self {
        Self::new(tabs, window).with_close_after_insert(settings.close_popup_after_insert)
    }

    pub fn with_close_after_insert(mut self, close: bool) -> Self {
        self.close_after_insert = close;
        self
    }

    pub fn dispatch(&mut self, text: &str) -> Result<DispatchOutcome> {
        let Some(tab) = self.tabs.active_tab()? else {
            tracing::debug!("no active tab, insert dropped");
            return Ok(DispatchOutcome::NoActiveTab);
        };

        // Fire and forget: a page without a listener is not an error.
        if let Err(err) = self.tabs.send_message(tab, &PageMessage::insert(text)) {
            tracing::warn!(tab = tab.0, error = %err, "insert message not delivered");
        } else {
            tracing::debug!(tab = tab.0, len = text.len(), "insert message sent");
        }

        if self.close_after_insert {
            self.window.close();
        }
        Ok(DispatchOutcome::Sent(tab))
    }
}
