use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};

use super::listener_registry::ListenerRegistry;
use super::platform_probe::ColorSchemeProbe;
use crate::theme::domain::system_signal_monitor::{
    SignalCallback, SubscriptionHandle, SystemSignalMonitor,
};
use crate::theme::domain::theme_mode::SystemTheme;

/// Turns a [`ColorSchemeProbe`] into a change-notifying monitor.
///
/// A background thread probes at a fixed interval while at least one
/// listener is registered and emits only when the value differs from the
/// last one seen. An inconclusive probe keeps the last known value.
pub struct PollingSignalMonitor {
    probe: Arc<dyn ColorSchemeProbe + Sync>,
    interval: Duration,
    state: Arc<MonitorState>,
    /// Dropping this sender stops the poll thread.
    stop_tx: Option<Sender<()>>,
}

struct MonitorState {
    current: Mutex<SystemTheme>,
    listeners: ListenerRegistry,
}

impl MonitorState {
    fn current(&self) -> SystemTheme {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Probe once. Returns the new value if it differs from the cached one.
    fn refresh(&self, probe: &dyn ColorSchemeProbe) -> Option<SystemTheme> {
        let observed = SystemTheme::from_prefers_dark(probe.prefers_dark()?);
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *current == observed {
            return None;
        }
        *current = observed;
        Some(observed)
    }
}

impl PollingSignalMonitor {
    pub fn new(probe: impl ColorSchemeProbe + Sync, interval: Duration) -> Self {
        let probe: Arc<dyn ColorSchemeProbe + Sync> = Arc::new(probe);
        let initial = probe
            .prefers_dark()
            .map(SystemTheme::from_prefers_dark)
            .unwrap_or_default();
        Self {
            probe,
            interval,
            state: Arc::new(MonitorState {
                current: Mutex::new(initial),
                listeners: ListenerRegistry::default(),
            }),
            stop_tx: None,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.stop_tx.is_some()
    }

    fn start(&mut self) {
        if self.stop_tx.is_some() {
            return;
        }
        // Catch up silently so a change made while idle is not replayed
        self.state.refresh(self.probe.as_ref());

        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let probe = self.probe.clone();
        let state = self.state.clone();
        let interval = self.interval;

        thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(next) = state.refresh(probe.as_ref()) {
                        log::info!("System color scheme changed to {next}");
                        state.listeners.emit(next);
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        self.stop_tx = Some(stop_tx);
        log::debug!("Polling system color scheme every {:?}", self.interval);
    }

    fn stop(&mut self) {
        if self.stop_tx.take().is_some() {
            log::debug!("Stopped polling system color scheme");
        }
    }
}

impl SystemSignalMonitor for PollingSignalMonitor {
    fn current_value(&self) -> SystemTheme {
        if !self.is_polling() {
            self.state.refresh(self.probe.as_ref());
        }
        self.state.current()
    }

    fn subscribe(&mut self, on_change: SignalCallback) -> SubscriptionHandle {
        let handle = self.state.listeners.add(on_change);
        self.start();
        handle
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.state.listeners.remove(handle);
        if self.state.listeners.is_empty() {
            self.stop();
        }
    }
}

impl Drop for PollingSignalMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    // --- Stubs ---

    /// Replays scripted probe answers, then repeats the last one.
    #[derive(Clone)]
    struct ScriptedProbe {
        answers: Arc<Mutex<VecDeque<Option<bool>>>>,
        last: Arc<Mutex<Option<bool>>>,
    }

    impl ScriptedProbe {
        fn new(answers: &[Option<bool>]) -> Self {
            Self {
                answers: Arc::new(Mutex::new(answers.iter().copied().collect())),
                last: Arc::new(Mutex::new(None)),
            }
        }

        fn set(&self, answer: Option<bool>) {
            self.answers.lock().unwrap().clear();
            *self.last.lock().unwrap() = answer;
        }
    }

    impl ColorSchemeProbe for ScriptedProbe {
        fn prefers_dark(&self) -> Option<bool> {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.answers.lock().unwrap().pop_front() {
                *last = next;
            }
            *last
        }
    }

    fn channel_listener() -> (
        crossbeam_channel::Receiver<SystemTheme>,
        SignalCallback,
    ) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (
            rx,
            Box::new(move |theme| {
                let _ = tx.send(theme);
            }),
        )
    }

    const INTERVAL: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn test_initial_value_from_probe() {
        let monitor = PollingSignalMonitor::new(ScriptedProbe::new(&[Some(true)]), INTERVAL);
        assert_eq!(monitor.current_value(), SystemTheme::Dark);
    }

    #[test]
    fn test_inconclusive_probe_defaults_to_light() {
        let monitor = PollingSignalMonitor::new(ScriptedProbe::new(&[None]), INTERVAL);
        assert_eq!(monitor.current_value(), SystemTheme::Light);
    }

    #[test]
    fn test_subscribe_does_not_emit_initial_state() {
        let probe = ScriptedProbe::new(&[Some(true)]);
        let mut monitor = PollingSignalMonitor::new(probe, INTERVAL);
        let (rx, cb) = channel_listener();
        monitor.subscribe(cb);

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_transition_is_emitted_once() {
        let probe = ScriptedProbe::new(&[Some(false)]);
        let mut monitor = PollingSignalMonitor::new(probe.clone(), INTERVAL);
        let (rx, cb) = channel_listener();
        monitor.subscribe(cb);

        probe.set(Some(true));

        assert_eq!(rx.recv_timeout(WAIT).unwrap(), SystemTheme::Dark);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert_eq!(monitor.current_value(), SystemTheme::Dark);
    }

    #[test]
    fn test_inconclusive_probe_keeps_last_value() {
        let probe = ScriptedProbe::new(&[Some(true)]);
        let mut monitor = PollingSignalMonitor::new(probe.clone(), INTERVAL);
        let (rx, cb) = channel_listener();
        monitor.subscribe(cb);

        probe.set(None);

        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        assert_eq!(monitor.current_value(), SystemTheme::Dark);
    }

    #[test]
    fn test_unsubscribe_stops_notifications_and_polling() {
        let probe = ScriptedProbe::new(&[Some(false)]);
        let mut monitor = PollingSignalMonitor::new(probe.clone(), INTERVAL);
        let (rx, cb) = channel_listener();
        let handle = monitor.subscribe(cb);
        assert!(monitor.is_polling());

        monitor.unsubscribe(handle);
        monitor.unsubscribe(handle);
        assert!(!monitor.is_polling());

        probe.set(Some(true));
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_current_value_refreshes_while_idle() {
        let probe = ScriptedProbe::new(&[Some(false)]);
        let monitor = PollingSignalMonitor::new(probe.clone(), INTERVAL);

        probe.set(Some(true));

        assert_eq!(monitor.current_value(), SystemTheme::Dark);
    }
}
