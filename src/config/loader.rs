//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::EventKind;
use crate::error::{WatcherError, WatcherResult};

use super::types::Config;

/// Environment variable overriding `watcher.events` (comma-separated kinds)
pub const EVENTS_ENV_VAR: &str = "DIRWATCH_EVENTS";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WatcherResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WatcherError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.watcher.validate(path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit file, the user config, or defaults.
///
/// An explicit path must exist and parse. The user config is only used when
/// present. Environment overrides are applied last.
pub fn load_or_default(explicit: Option<&Path>) -> WatcherResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match user_config_path().filter(|p| p.is_file()) {
            Some(path) => load_with_warnings(&path)?,
            None => (Config::default(), Vec::new()),
        },
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply `DIRWATCH_*` environment overrides
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(events) = std::env::var(EVENTS_ENV_VAR) {
        let parsed: Vec<EventKind> = events
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| match s.parse::<EventKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    log::warn!("{}: {}", EVENTS_ENV_VAR, e);
                    None
                }
            })
            .collect();
        if !parsed.is_empty() {
            config.watcher.events = parsed;
        }
    }
    config
}

/// `$XDG_CONFIG_HOME/dirwatch/config.toml`, falling back to the platform
/// config directory.
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("dirwatch").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["watcher", "io_thread_name", "delivery_thread_name", "events"];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
