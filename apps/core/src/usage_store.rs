use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::model::Application;
use crate::style::{StyleAttribute, StyleMap};

const STYLE_SECTION: &str = "[Style]";
const COUNTS_SECTION: &str = "[Application Launch Counts]";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Entry = (String, String);

/// Persisted key/value source and sink.
pub trait KeyValueStore {
    /// All stored entries, or `None` when nothing has been persisted yet.
    fn read_entries(&self) -> Result<Option<Vec<Entry>>, StoreError>;

    /// Replaces everything previously stored.
    fn write_entries(&mut self, style: &[Entry], counts: &[Entry]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub style: StyleMap,
    pub counts: HashMap<String, u32>,
}

impl Preferences {
    pub fn count_for(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }
}

/// Splits a `key=value` line on its last `=`.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    line.rsplit_once('=')
}

/// Count records are keyed by application id, which always holds a path separator.
pub fn is_count_key(key: &str) -> bool {
    key.contains('/')
}

pub fn load(store: &dyn KeyValueStore) -> Result<Preferences, StoreError> {
    let mut preferences = Preferences::default();
    let Some(entries) = store.read_entries()? else {
        return Ok(preferences);
    };

    for (key, value) in &entries {
        apply_entry(&mut preferences, key, value);
    }
    Ok(preferences)
}

fn apply_entry(preferences: &mut Preferences, key: &str, value: &str) {
    if is_count_key(key) {
        match value.trim().parse::<u32>() {
            Ok(count) => {
                preferences.counts.insert(key.to_string(), count);
            }
            Err(error) => debug!(key, value, %error, "skipping unparsable launch count"),
        }
        return;
    }

    if let Some(attribute) = StyleAttribute::from_name(key) {
        preferences.style.set(attribute, value);
    }
}

pub fn save(
    store: &mut dyn KeyValueStore,
    apps: &[Application],
    style: &StyleMap,
) -> Result<(), StoreError> {
    let style_entries: Vec<Entry> = style
        .overrides()
        .into_iter()
        .map(|(attribute, value)| (attribute.name().to_string(), value.to_string()))
        .collect();
    let count_entries: Vec<Entry> = apps
        .iter()
        .filter(|app| app.count > 0)
        .map(|app| (app.id.clone(), app.count.to_string()))
        .collect();

    store.write_entries(&style_entries, &count_entries)
}

/// The launcher's plain-text config file: a style section followed by a
/// launch count section, one `key=value` per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileStore {
    path: PathBuf,
}

impl TextFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeyValueStore for TextFileStore {
    fn read_entries(&self) -> Result<Option<Vec<Entry>>, StoreError> {
        // Undecodable bytes are replaced so the rest of the file still loads.
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let text = String::from_utf8_lossy(&bytes);
        Ok(Some(
            text.lines()
                .filter_map(parse_line)
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        ))
    }

    fn write_entries(&mut self, style: &[Entry], counts: &[Entry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut out = String::new();
        out.push_str(STYLE_SECTION);
        out.push('\n');
        for (key, value) in style {
            out.push_str(&format!("{key}={value}\n"));
        }
        out.push('\n');
        out.push_str(COUNTS_SECTION);
        out.push('\n');
        for (key, value) in counts {
            out.push_str(&format!("{key}={value}\n"));
        }

        fs::write(&self.path, out)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: Option<Vec<Entry>>,
}

impl MemoryStore {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn entries(&self) -> Option<&[Entry]> {
        self.entries.as_deref()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_entries(&self) -> Result<Option<Vec<Entry>>, StoreError> {
        Ok(self.entries.clone())
    }

    fn write_entries(&mut self, style: &[Entry], counts: &[Entry]) -> Result<(), StoreError> {
        self.entries = Some(style.iter().chain(counts).cloned().collect());
        Ok(())
    }
}
