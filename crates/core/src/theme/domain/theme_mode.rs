use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a caller hands the controller a mode string outside
/// {light, dark, system}.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid theme mode: {value:?} (expected one of light, dark, system)")]
pub struct InvalidModeError {
    pub value: String,
}

/// The user's theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: &[ThemeMode] = &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Human-readable label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| InvalidModeError {
                value: s.to_string(),
            })
    }
}

/// Prints the wire name, matching [`SystemTheme`] and [`ResolvedTheme`].
/// Pickers use [`ThemeMode::label`].
impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The color scheme the operating system currently prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemTheme {
    #[default]
    Light,
    Dark,
}

impl SystemTheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            SystemTheme::Dark
        } else {
            SystemTheme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemTheme::Light => "light",
            SystemTheme::Dark => "dark",
        }
    }
}

impl fmt::Display for SystemTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme actually in effect after reconciling the preference with the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Presentation marker (CSS class and `data-theme` value).
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    /// The marker that must be cleared when this theme is applied.
    pub fn opposite(self) -> Self {
        match self {
            ResolvedTheme::Light => ResolvedTheme::Dark,
            ResolvedTheme::Dark => ResolvedTheme::Light,
        }
    }
}

impl From<SystemTheme> for ResolvedTheme {
    fn from(theme: SystemTheme) -> Self {
        match theme {
            SystemTheme::Light => ResolvedTheme::Light,
            SystemTheme::Dark => ResolvedTheme::Dark,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
