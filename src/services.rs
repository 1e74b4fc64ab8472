use anyhow::Result;

use crate::message::PageMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub i32);

/// Browser tab access from the popup context.
pub trait TabService: Send {
    /// Active tab of the focused window, if any.
    fn active_tab(&self) -> Result<Option<TabId>>;
    /// Delivers a message to the tab's content context without waiting for a reply.
    fn send_message(&self, tab: TabId, message: &PageMessage) -> Result<()>;
}

pub trait PopupWindow: Send {
    fn close(&mut self);
}

/// Window handle for hosts without a closable popup.
#[derive(Default)]
pub struct StubPopupWindow;

impl PopupWindow for StubPopupWindow {
    fn close(&mut self) {}
}
