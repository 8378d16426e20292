//! # History File Management
//!
//! Resolves where the interactive editor's history lives. By default it
//! is `~/.binsheet_history`; the `BINSHEET_HISTORY` environment variable
//! overrides the location, and setting it to an empty string disables
//! persistence entirely. rustyline handles the actual file I/O.

use std::env;
use std::path::PathBuf;

use crate::config::{HISTORY_ENV, HISTORY_FILE};

pub fn history_path() -> Option<PathBuf> {
    resolve(env::var(HISTORY_ENV).ok(), home_dir())
}

fn resolve(custom: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match custom {
        Some(path) if path.is_empty() => None,
        Some(path) => Some(PathBuf::from(path)),
        None => home.map(|home| home.join(HISTORY_FILE)),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_path_is_in_home() {
        let path = resolve(None, Some(PathBuf::from("/home/someone")));
        assert_eq!(path, Some(PathBuf::from("/home/someone/.binsheet_history")));
    }

    #[test]
    fn custom_path_overrides_home() {
        let path = resolve(
            Some("/custom/path".to_string()),
            Some(PathBuf::from("/home/someone")),
        );
        assert_eq!(path, Some(PathBuf::from("/custom/path")));
    }

    #[test]
    fn empty_override_disables_history() {
        let path = resolve(Some(String::new()), Some(PathBuf::from("/home/someone")));
        assert_eq!(path, None);
    }

    #[test]
    fn no_home_means_no_history() {
        assert_eq!(resolve(None, None), None);
    }
}
