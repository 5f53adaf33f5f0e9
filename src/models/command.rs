use serde::{Deserialize, Serialize};

/// A slash command recognised by the dispatcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Help,
    Add,
    Notes,
    Delete,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Add => "add",
            Self::Notes => "notes",
            Self::Delete => "delete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "add" => Some(Self::Add),
            "notes" => Some(Self::Notes),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Parse the command at the start of a message.
    ///
    /// Only the first whitespace-separated token counts. A trailing
    /// `@botname` mention (`/add@my_bot`) is accepted and ignored, and
    /// matching is case-insensitive. Returns `None` for plain text and
    /// for unknown commands.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _)| name);
        Self::from_str(&name.to_ascii_lowercase())
    }
}
