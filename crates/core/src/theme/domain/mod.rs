pub mod preference_store;
pub mod render_target;
pub mod system_signal_monitor;
pub mod theme_backend;
pub mod theme_mode;
pub mod theme_presenter;
pub mod theme_resolver;
