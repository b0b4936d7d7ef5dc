use std::sync::{Arc, Mutex, MutexGuard};

use crate::theme::domain::theme_backend::{BackendError, ThemeBackend};
use crate::theme::domain::theme_mode::{ResolvedTheme, ThemeMode};

/// Backend that lives in the same process and simply mirrors what it is told.
///
/// It cannot see the OS color scheme, so `get_system_theme` always answers
/// `System`. Until a theme is set it reports `Light`.
#[derive(Debug, Clone, Default)]
pub struct InProcessBackend {
    theme: Arc<Mutex<Option<ResolvedTheme>>>,
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last theme received, if any.
    pub fn last_theme(&self) -> Option<ResolvedTheme> {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ResolvedTheme>> {
        self.theme
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ThemeBackend for InProcessBackend {
    fn get_system_theme(&self) -> Result<ThemeMode, BackendError> {
        Ok(ThemeMode::System)
    }

    fn set_theme(&mut self, theme: ResolvedTheme) -> Result<(), BackendError> {
        log::info!("Backend theme set to {theme}");
        *self.lock() = Some(theme);
        Ok(())
    }

    fn get_theme(&self) -> Result<ThemeMode, BackendError> {
        Ok(match self.last_theme() {
            Some(ResolvedTheme::Dark) => ThemeMode::Dark,
            Some(ResolvedTheme::Light) | None => ThemeMode::Light,
        })
    }
}
