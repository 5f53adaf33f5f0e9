//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "::";
pub const DEFAULT_PORT: u16 = 8333;
pub const DEFAULT_MAX_NOTE_LENGTH: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// SQLite file (from NOTEBOT_DB). `None` means the per-user data directory.
    pub database_path: Option<PathBuf>,
    /// Bind address for the HTTP adapter (from NOTEBOT_HOST)
    pub host: String,
    /// Bind port for the HTTP adapter (from NOTEBOT_PORT)
    pub port: u16,
    /// Longest accepted note, in characters (from NOTEBOT_MAX_NOTE_LENGTH)
    pub max_note_length: usize,
    /// Bearer token required by the HTTP adapter (from NOTEBOT_API_KEY)
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = lookup("NOTEBOT_DB")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let host = lookup("NOTEBOT_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("NOTEBOT_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let max_note_length = lookup("NOTEBOT_MAX_NOTE_LENGTH")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_NOTE_LENGTH);

        let api_key = lookup("NOTEBOT_API_KEY").filter(|s| !s.is_empty());

        Self {
            database_path,
            host,
            port,
            max_note_length,
            api_key,
        }
    }

    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_note_length: DEFAULT_MAX_NOTE_LENGTH,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("NOTEBOT_DB", "/tmp/notes.db"),
            ("NOTEBOT_HOST", "127.0.0.1"),
            ("NOTEBOT_PORT", "9000"),
            ("NOTEBOT_MAX_NOTE_LENGTH", "280"),
            ("NOTEBOT_API_KEY", "secret"),
        ]);

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/notes.db")));
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.max_note_length, 280);
        assert_eq!(config.api_key, Some("secret".to_string()));
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("NOTEBOT_PORT", "http"),
            ("NOTEBOT_MAX_NOTE_LENGTH", "0"),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_note_length, DEFAULT_MAX_NOTE_LENGTH);
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        assert_eq!(Config::default().bind_addr(), "[::]:8333");
    }
}
