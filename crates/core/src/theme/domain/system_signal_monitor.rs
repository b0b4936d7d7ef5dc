use super::theme_mode::SystemTheme;

/// Listener invoked with the new OS color scheme after each transition.
///
/// May be called from a monitor-owned thread.
pub type SignalCallback = Box<dyn Fn(SystemTheme) + Send>;

/// Opaque token identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub(crate) u64);

/// Domain interface over the OS "prefers dark color scheme" signal.
pub trait SystemSignalMonitor: Send {
    /// Current OS color scheme, read synchronously.
    fn current_value(&self) -> SystemTheme;

    /// Register a listener for transitions. The initial state is never
    /// emitted, only changes after registration.
    fn subscribe(&mut self, on_change: SignalCallback) -> SubscriptionHandle;

    /// Release a listener. Unknown or already-released handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle);
}
