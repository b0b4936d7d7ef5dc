use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crossbeam_channel::Sender;

use crate::theme::domain::theme_backend::{BackendError, ThemeBackend};
use crate::theme::domain::theme_mode::{ResolvedTheme, ThemeMode};

/// Mirrors resolved themes to the backend without blocking the caller.
///
/// Notifications are queued to a worker thread that calls
/// [`ThemeBackend::set_theme`] in order. Failures are logged there and never
/// reach the controller. A stalled backend only stalls the worker.
pub struct BackendBridge {
    backend: Arc<Mutex<Box<dyn ThemeBackend>>>,
    tx: Sender<BridgeJob>,
}

enum BridgeJob {
    Notify(ResolvedTheme),
    Flush(Sender<()>),
}

impl BackendBridge {
    /// Spawn the notification worker. It exits once the bridge is dropped
    /// and the queue has drained.
    pub fn spawn(backend: Box<dyn ThemeBackend>) -> Self {
        let backend = Arc::new(Mutex::new(backend));
        let (tx, rx) = crossbeam_channel::unbounded::<BridgeJob>();

        let worker_backend = backend.clone();
        thread::spawn(move || {
            for job in rx {
                match job {
                    BridgeJob::Notify(theme) => {
                        let result = lock(&worker_backend).set_theme(theme);
                        match result {
                            Ok(()) => log::debug!("Backend acknowledged {theme} theme"),
                            Err(e) => log::warn!("Failed to notify backend of {theme} theme: {e}"),
                        }
                    }
                    BridgeJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self { backend, tx }
    }

    /// Fire-and-forget.
    pub fn notify(&self, theme: ResolvedTheme) {
        if self.tx.send(BridgeJob::Notify(theme)).is_err() {
            log::warn!("Backend bridge worker is gone; dropped {theme} theme");
        }
    }

    /// Block until every notification queued so far has been delivered or
    /// has failed. Read-throughs after this see the mirrored theme.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self.tx.send(BridgeJob::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Mode the backend has on record. Blocks while a notification is in flight.
    pub fn fetch_saved_theme(&self) -> Result<ThemeMode, BackendError> {
        lock(&self.backend).get_theme()
    }

    pub fn fetch_system_theme(&self) -> Result<ThemeMode, BackendError> {
        lock(&self.backend).get_system_theme()
    }
}

fn lock(backend: &Mutex<Box<dyn ThemeBackend>>) -> MutexGuard<'_, Box<dyn ThemeBackend>> {
    backend
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
