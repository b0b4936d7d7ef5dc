use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crossbeam_channel::Sender;
use thiserror::Error;

use super::theme_mode::ThemeMode;
use crate::shared::constants::THEME_MODE_KEY;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preferences file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent string key-value storage.
///
/// Implementations decide where the bytes live (a JSON file, memory, a
/// platform settings API); the theme engine only ever touches one key.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Saves and restores the user's [`ThemeMode`] under the `themeMode` key.
///
/// Reads are synchronous. Saves are queued to a writer thread so a slow
/// disk never holds up the caller; every failure is logged and swallowed
/// there, so the in-memory mode always takes effect.
pub struct PreferenceStore {
    backend: Arc<Mutex<Box<dyn KeyValueStore>>>,
    jobs: Sender<StoreJob>,
}

enum StoreJob {
    Save(ThemeMode),
    Flush(Sender<()>),
}

impl PreferenceStore {
    /// Spawn the writer thread. It exits once the store is dropped and the
    /// queue has drained.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let backend = Arc::new(Mutex::new(backend));
        let (jobs, rx) = crossbeam_channel::unbounded::<StoreJob>();

        let writer_backend = backend.clone();
        thread::spawn(move || {
            for job in rx {
                match job {
                    StoreJob::Save(mode) => {
                        let result = lock(&writer_backend).set(THEME_MODE_KEY, mode.as_str());
                        match result {
                            Ok(()) => log::debug!("Saved theme mode {}", mode.as_str()),
                            Err(e) => log::warn!("Could not persist theme mode {}: {e}", mode.as_str()),
                        }
                    }
                    StoreJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self { backend, jobs }
    }

    /// Returns the previously saved mode, or `None` if nothing usable is stored.
    pub fn load(&self) -> Option<ThemeMode> {
        let raw = match lock(&self.backend).get(THEME_MODE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read saved theme mode: {e}");
                return None;
            }
        };

        match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                log::warn!("Ignoring saved theme mode: {e}");
                None
            }
        }
    }

    /// Queue `mode` for writing and return immediately.
    pub fn save(&self, mode: ThemeMode) {
        if self.jobs.send(StoreJob::Save(mode)).is_err() {
            log::warn!("Preference writer is gone; theme mode {} not saved", mode.as_str());
        }
    }

    /// Block until every save queued so far has been attempted.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self.jobs.send(StoreJob::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

fn lock(backend: &Mutex<Box<dyn KeyValueStore>>) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
    backend
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
