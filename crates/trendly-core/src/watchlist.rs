use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One account listed in the competitor watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub username: String,
    #[serde(default)]
    pub niche: Vec<String>,
    pub notes: Option<String>,
}

impl WatchlistEntry {
    /// Username without a leading `@`.
    #[must_use]
    pub fn handle(&self) -> &str {
        self.username.trim().trim_start_matches('@')
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchlistFile {
    pub competitors: Vec<WatchlistEntry>,
}

/// Load and validate the competitor watchlist from a YAML file.
///
/// Usernames are normalized by stripping a leading `@`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watchlist(path: &Path) -> Result<WatchlistFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut watchlist: WatchlistFile =
        serde_yaml::from_str(&content).map_err(ConfigError::WatchlistParse)?;

    for entry in &mut watchlist.competitors {
        entry.username = entry.handle().to_string();
    }

    validate_watchlist(&watchlist)?;

    Ok(watchlist)
}

fn validate_watchlist(watchlist: &WatchlistFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &watchlist.competitors {
        let handle = entry.handle();
        if handle.is_empty() {
            return Err(ConfigError::Validation(
                "competitor username must be non-empty".to_string(),
            ));
        }

        if !seen.insert(handle.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate competitor username: '{handle}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "watchlist_test.rs"]
mod tests;
