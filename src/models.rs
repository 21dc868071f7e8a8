use serde::{Deserialize, Serialize};

/// Notification payload stored per user, written by whoever buffered the notices.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct NotificationRecord {
    /// previously rendered notices, opaque html
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct ExtractionResult {
    pub count: usize,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: u64,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl NotificationRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Viewer {
    pub fn new(user_id: u64, capabilities: Vec<String>) -> Self {
        Self {
            user_id,
            capabilities,
        }
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
