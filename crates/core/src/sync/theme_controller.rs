use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::backend_bridge::BackendBridge;
use crate::theme::domain::preference_store::PreferenceStore;
use crate::theme::domain::system_signal_monitor::{SubscriptionHandle, SystemSignalMonitor};
use crate::theme::domain::theme_mode::{InvalidModeError, ResolvedTheme, SystemTheme, ThemeMode};
use crate::theme::domain::theme_presenter::ThemePresenter;
use crate::theme::domain::theme_resolver::resolve;

/// Owns the theme state triple and keeps presentation, persistence and the
/// backend mirror in step with it.
///
/// The controller is driven from one thread. OS transitions are queued by
/// the monitor callback and applied when the owner calls
/// [`Self::process_pending`] or [`Self::wait_event`], one at a time.
/// Saves and backend notifications are queued to worker threads; nothing
/// here waits on them except [`Self::flush`] and [`Self::teardown`].
/// Dropping the controller releases the monitor subscription.
pub struct ThemeController {
    mode: ThemeMode,
    system_theme: SystemTheme,
    resolved: ResolvedTheme,
    monitor: Box<dyn SystemSignalMonitor>,
    subscription: Option<SubscriptionHandle>,
    store: PreferenceStore,
    presenter: ThemePresenter,
    bridge: BackendBridge,
    signals: Receiver<SystemTheme>,
}

impl ThemeController {
    /// Run the startup protocol: subscribe to the OS signal, restore the
    /// saved mode (default `System`), then resolve, apply and notify.
    pub fn start(
        mut monitor: Box<dyn SystemSignalMonitor>,
        store: PreferenceStore,
        presenter: ThemePresenter,
        bridge: BackendBridge,
    ) -> Self {
        // Subscribe before reading anything so no transition can slip between
        let (tx, signals) = crossbeam_channel::unbounded::<SystemTheme>();
        let subscription = monitor.subscribe(Box::new(move |theme| {
            let _ = tx.send(theme);
        }));
        let system_theme = monitor.current_value();
        log::info!("System color scheme: {system_theme}");

        let mode = match store.load() {
            Some(mode) => {
                log::info!("Restored theme mode: {}", mode.as_str());
                mode
            }
            None => ThemeMode::default(),
        };

        let resolved = resolve(mode, system_theme);
        let mut controller = Self {
            mode,
            system_theme,
            resolved,
            monitor,
            subscription: Some(subscription),
            store,
            presenter,
            bridge,
            signals,
        };
        controller.publish();
        controller
    }

    /// Theme currently presented.
    pub fn current_theme(&self) -> ResolvedTheme {
        self.resolved
    }

    pub fn system_theme(&self) -> SystemTheme {
        self.system_theme
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn bridge(&self) -> &BackendBridge {
        &self.bridge
    }

    /// Validate and apply a mode string from the UI. Unrecognized values
    /// leave every piece of state untouched.
    pub fn set_mode(&mut self, mode: &str) -> Result<ResolvedTheme, InvalidModeError> {
        match mode.parse::<ThemeMode>() {
            Ok(mode) => Ok(self.set_theme_mode(mode)),
            Err(e) => {
                log::error!("Rejected theme mode change: {e}");
                Err(e)
            }
        }
    }

    /// Switch mode, resolve, apply and notify, then queue the save.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> ResolvedTheme {
        log::info!("Theme mode set to {mode}");
        self.mode = mode;
        self.resolved = resolve(self.mode, self.system_theme);
        self.publish();
        self.store.save(mode);
        self.resolved
    }

    /// Record an OS transition. Only `System` mode reacts to it; a fixed
    /// preference is never perturbed.
    pub fn on_system_signal_change(&mut self, system_theme: SystemTheme) {
        if system_theme == self.system_theme {
            log::debug!("System color scheme still {system_theme}");
            return;
        }
        self.system_theme = system_theme;
        if self.mode != ThemeMode::System {
            log::debug!(
                "Ignoring system color scheme {system_theme}: mode is {}",
                self.mode.as_str()
            );
            return;
        }
        self.resolved = resolve(self.mode, self.system_theme);
        log::info!("Following system color scheme: {}", self.resolved);
        self.publish();
    }

    /// Apply every queued OS transition. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(system_theme) = self.signals.try_recv() {
            self.on_system_signal_change(system_theme);
            handled += 1;
        }
        handled
    }

    /// Block up to `timeout` for an OS transition, then drain the queue.
    /// Returns how many transitions were handled.
    pub fn wait_event(&mut self, timeout: Duration) -> usize {
        match self.signals.recv_timeout(timeout) {
            Ok(system_theme) => {
                self.on_system_signal_change(system_theme);
                1 + self.process_pending()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Wait for queued saves and backend notifications to finish.
    pub fn flush(&self) {
        self.store.flush();
        self.bridge.flush();
    }

    /// Release the OS subscription and wait for pending saves. Consuming
    /// `self` makes this terminal.
    pub fn teardown(self) {
        self.store.flush();
        drop(self);
    }

    fn publish(&mut self) {
        self.presenter.apply(self.resolved);
        self.bridge.notify(self.resolved);
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.monitor.unsubscribe(handle);
            log::debug!("Theme controller torn down");
        }
    }
}
