use serde::Deserialize;

use crate::history::CommandHistory;

fn default_max_undo_depth() -> usize {
    CommandHistory::DEFAULT_MAX_DEPTH
}

/// Session settings, loadable from a TOML snippet
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of commands retained for undo
    #[serde(default = "default_max_undo_depth")]
    pub max_undo_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: CommandHistory::DEFAULT_MAX_DEPTH,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
