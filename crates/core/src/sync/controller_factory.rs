use super::backend_bridge::BackendBridge;
use super::theme_controller::ThemeController;
use crate::shared::config::ThemeSyncConfig;
use crate::theme::domain::preference_store::{KeyValueStore, PreferenceStore, StoreError};
use crate::theme::domain::render_target::RenderTarget;
use crate::theme::domain::system_signal_monitor::SystemSignalMonitor;
use crate::theme::domain::theme_backend::ThemeBackend;
use crate::theme::domain::theme_presenter::ThemePresenter;
use crate::theme::infrastructure::json_file_store::JsonFileStore;
use crate::theme::infrastructure::platform_probe::PlatformProbe;
use crate::theme::infrastructure::polling_signal_monitor::PollingSignalMonitor;

/// Open the configured JSON preferences file.
pub fn open_store(config: &ThemeSyncConfig) -> Result<JsonFileStore, StoreError> {
    config
        .resolved_store_path()
        .map(JsonFileStore::new)
        .ok_or(StoreError::NoConfigDir)
}

/// OS monitor polling the platform settings at the configured interval.
pub fn platform_monitor(config: &ThemeSyncConfig) -> PollingSignalMonitor {
    PollingSignalMonitor::new(PlatformProbe, config.poll_interval())
}

/// Wire a controller from explicit parts.
pub fn create_controller(
    monitor: Box<dyn SystemSignalMonitor>,
    store: Box<dyn KeyValueStore>,
    target: Box<dyn RenderTarget>,
    backend: Box<dyn ThemeBackend>,
) -> ThemeController {
    ThemeController::start(
        monitor,
        PreferenceStore::new(store),
        ThemePresenter::new(target),
        BackendBridge::spawn(backend),
    )
}

/// Controller backed by the JSON preferences file and the platform monitor.
pub fn create_platform_controller(
    config: &ThemeSyncConfig,
    target: Box<dyn RenderTarget>,
    backend: Box<dyn ThemeBackend>,
) -> Result<ThemeController, StoreError> {
    let store = open_store(config)?;
    log::debug!("Theme preferences at {}", store.path().display());
    Ok(create_controller(
        Box::new(platform_monitor(config)),
        Box::new(store),
        target,
        backend,
    ))
}
