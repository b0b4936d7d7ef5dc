use std::sync::{Arc, Mutex};

use super::listener_registry::ListenerRegistry;
use crate::theme::domain::system_signal_monitor::{
    SignalCallback, SubscriptionHandle, SystemSignalMonitor,
};
use crate::theme::domain::theme_mode::SystemTheme;

/// Monitor whose value is pushed by the host instead of read from the OS.
///
/// Clones share state: hand one clone to the controller and keep another to
/// drive transitions. Listeners run synchronously inside [`Self::set`].
#[derive(Clone)]
pub struct ManualSignalMonitor {
    current: Arc<Mutex<SystemTheme>>,
    listeners: Arc<ListenerRegistry>,
}

impl ManualSignalMonitor {
    pub fn new(initial: SystemTheme) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial)),
            listeners: Arc::new(ListenerRegistry::default()),
        }
    }

    /// Report an OS color-scheme value. Emits only if it differs from the
    /// current one.
    pub fn set(&self, theme: SystemTheme) {
        {
            let mut current = self
                .current
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *current == theme {
                return;
            }
            *current = theme;
        }
        self.listeners.emit(theme);
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl SystemSignalMonitor for ManualSignalMonitor {
    fn current_value(&self) -> SystemTheme {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn subscribe(&mut self, on_change: SignalCallback) -> SubscriptionHandle {
        self.listeners.add(on_change)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.listeners.remove(handle);
    }
}
