use thiserror::Error;

use super::theme_mode::{ResolvedTheme, ThemeMode};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("theme backend unavailable: {0}")]
    Unavailable(String),
    #[error("theme backend returned unrecognized theme {0:?}")]
    UnrecognizedTheme(String),
    #[error("theme backend call failed: {0}")]
    Call(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// RPC surface of the external backend process that mirrors the theme.
///
/// Transport is owned by the implementation; every call may fail
/// independently of local state.
pub trait ThemeBackend: Send {
    /// What the backend believes the OS theme is. Backends that cannot
    /// detect it answer `ThemeMode::System`.
    fn get_system_theme(&self) -> Result<ThemeMode, BackendError>;

    fn set_theme(&mut self, theme: ResolvedTheme) -> Result<(), BackendError>;

    fn get_theme(&self) -> Result<ThemeMode, BackendError>;
}
