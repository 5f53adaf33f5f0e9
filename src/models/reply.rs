use serde::{Deserialize, Serialize};

/// Buttons offered after most successful interactions.
pub const BASE_KEYBOARD: [&str; 3] = ["/add", "/notes", "/delete"];

/// Outbound payload for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// Quick-reply buttons to render under the message, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyboard: Vec<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    /// A reply that also offers the base `/add`, `/notes`, `/delete` keyboard.
    pub fn with_keyboard(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: BASE_KEYBOARD.iter().map(|b| b.to_string()).collect(),
        }
    }

    pub fn has_keyboard(&self) -> bool {
        !self.keyboard.is_empty()
    }
}
