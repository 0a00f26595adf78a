//! Hot-reload of the settings file.
//!
//! Watches the settings file's directory with `notify` and queues events
//! for the owner to drain with [`SettingsWatcher::poll`] from its own loop.

use crate::error::PatchbayResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use tracing::{error, info};

/// `<config dir>/patchbay/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("patchbay").join("settings.json"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    receiver: Receiver<SettingsEvent>,
    pending: VecDeque<SettingsEvent>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. Its parent directory must exist.
    pub fn new(path: PathBuf) -> PatchbayResult<Self> {
        let (tx, receiver) = channel();
        let file_name = path.file_name().map(ToOwned::to_owned);

        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(event) => {
                        let ours = event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == file_name.as_deref());
                        match event.kind {
                            EventKind::Create(_) if ours => SettingsEvent::Created,
                            EventKind::Modify(_) if ours => SettingsEvent::Modified,
                            EventKind::Remove(_) if ours => SettingsEvent::Deleted,
                            _ => return,
                        }
                    }
                    Err(e) => SettingsEvent::Error(e.to_string()),
                };
                let _ = tx.send(event);
            })?;

        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Watching settings file: {}", path.display());

        Ok(Self {
            path,
            receiver,
            pending: VecDeque::new(),
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next queued event, if any. Repeated identical events collapse into one.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.pending.back() != Some(&event) {
                        self.pending.push_back(event);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    error!("Settings watcher channel closed");
                    break;
                }
            }
        }
        self.pending.pop_front()
    }
}
