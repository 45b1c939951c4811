use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::desktop_entry::parse_desktop_entry;
use crate::model::AppRecord;

const DESKTOP_EXTENSION: &str = "desktop";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DiscoveryError {
    message: String,
}

impl DiscoveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait DiscoveryProvider {
    fn provider_name(&self) -> &'static str;
    fn discover(&self) -> Result<Vec<AppRecord>, DiscoveryError>;
}

/// Reads `.desktop` files from a list of application directories.
pub struct DesktopEntryProvider {
    dirs: Vec<PathBuf>,
    max_depth: usize,
}

impl DesktopEntryProvider {
    pub fn new(dirs: Vec<PathBuf>, max_depth: usize) -> Self {
        Self {
            dirs,
            max_depth: max_depth.max(1),
        }
    }
}

impl DiscoveryProvider for DesktopEntryProvider {
    fn provider_name(&self) -> &'static str {
        "desktop-entry"
    }

    fn discover(&self) -> Result<Vec<AppRecord>, DiscoveryError> {
        let mut records = Vec::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "application directory missing; skipping");
                continue;
            }

            let mut paths: Vec<PathBuf> = WalkDir::new(dir)
                .follow_links(true)
                .min_depth(1)
                .max_depth(self.max_depth)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(error) => {
                        warn!(%error, "failed to walk application directory entry");
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| {
                    path.extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| ext == DESKTOP_EXTENSION)
                        .unwrap_or(false)
                })
                .collect();
            paths.sort();

            for path in paths {
                match fs::read(&path) {
                    Ok(bytes) => {
                        let id = path.to_string_lossy().into_owned();
                        let text = String::from_utf8_lossy(&bytes);
                        records.push(parse_desktop_entry(&id, &text));
                    }
                    Err(error) => {
                        warn!(path = %path.display(), %error, "failed to read desktop entry");
                    }
                }
            }
        }

        Ok(records)
    }
}

/// Serves a fixed record list.
pub struct RecordProvider {
    records: Vec<AppRecord>,
}

impl RecordProvider {
    pub fn from_records(records: Vec<AppRecord>) -> Self {
        Self { records }
    }

    pub fn deterministic_fixture() -> Self {
        Self {
            records: vec![
                AppRecord::new(
                    "/usr/share/applications/firefox.desktop",
                    "Firefox",
                    "Web Browser",
                    "Browse the World Wide Web",
                    "firefox %u",
                )
                .with_keyword_hints("Internet WWW Browser Web Explorer"),
                AppRecord::new(
                    "/usr/share/applications/org.gnome.Terminal.desktop",
                    "Terminal",
                    "Terminal Emulator",
                    "Use the command line",
                    "gnome-terminal",
                )
                .with_keyword_hints("shell prompt command commandline cmd"),
                AppRecord::new(
                    "/usr/share/applications/org.gnome.Nautilus.desktop",
                    "Files",
                    "File Manager",
                    "Access and organize files",
                    "nautilus --new-window %U",
                ),
            ],
        }
    }
}

impl DiscoveryProvider for RecordProvider {
    fn provider_name(&self) -> &'static str {
        "records"
    }

    fn discover(&self) -> Result<Vec<AppRecord>, DiscoveryError> {
        Ok(self.records.clone())
    }
}

/// Runs every provider in order, concatenating their records.
pub fn discover_all(
    providers: &[Box<dyn DiscoveryProvider>],
) -> Result<Vec<AppRecord>, DiscoveryError> {
    let mut records = Vec::new();
    for provider in providers {
        let found = provider.discover().map_err(|error| {
            DiscoveryError::new(format!("{} provider failed: {error}", provider.provider_name()))
        })?;
        debug!(provider = provider.provider_name(), count = found.len(), "discovered records");
        records.extend(found);
    }
    Ok(records)
}
