use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages the popup sends to the page context. No reply is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageMessage {
    #[serde(rename = "AID_INSERT")]
    Insert {
        #[serde(default)]
        text: Option<String>,
    },
}

impl PageMessage {
    pub fn insert(text: impl Into<String>) -> Self {
        PageMessage::Insert {
            text: Some(text.into()),
        }
    }

    /// Anything that is not a recognised message is ignored.
    pub fn decode(raw: &Value) -> Option<Self> {
        serde_json::from_value(raw.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        match self {
            PageMessage::Insert { text } => serde_json::json!({
                "type": "AID_INSERT",
                "text": text,
            }),
        }
    }

    /// Text to insert; absent text inserts nothing.
    pub fn text(&self) -> &str {
        match self {
            PageMessage::Insert { text } => text.as_deref().unwrap_or_default(),
        }
    }
}
