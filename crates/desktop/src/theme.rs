use iced::Theme;

use themesync_core::shared::constants::THEME_ATTRIBUTE;
use themesync_core::theme::infrastructure::root_node::RootNode;

/// Map the root node's `data-theme` marker onto the built-in iced themes.
///
/// The node is written only by the controller's presenter, so the window
/// always shows whatever the controller last applied.
pub fn resolve_theme(root: &RootNode) -> Theme {
    match root.attribute(THEME_ATTRIBUTE).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}
