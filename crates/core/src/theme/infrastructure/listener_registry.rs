use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::theme::domain::system_signal_monitor::{SignalCallback, SubscriptionHandle};
use crate::theme::domain::theme_mode::SystemTheme;

/// Thread-safe set of signal listeners shared by the monitor implementations.
///
/// Callbacks run with the registry locked, so they must not call back into
/// `add`/`remove`. Once `remove` returns, that listener is never invoked again.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Mutex<HashMap<u64, SignalCallback>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub fn add(&self, callback: SignalCallback) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, callback);
        SubscriptionHandle(id)
    }

    /// Returns `true` if the handle was still registered.
    pub fn remove(&self, handle: SubscriptionHandle) -> bool {
        self.lock().remove(&handle.0).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn emit(&self, theme: SystemTheme) {
        for callback in self.lock().values() {
            callback(theme);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, SignalCallback>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
