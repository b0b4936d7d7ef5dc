/// Key the user's theme mode is stored under.
pub const THEME_MODE_KEY: &str = "themeMode";

/// Root-node attribute mirroring the active theme for styling libraries.
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub const APP_DIR_NAME: &str = "ThemeSync";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Default interval between OS color-scheme probes.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Lower bound on the probe interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 50;
