use std::fmt;

use iced::widget::{column, pick_list, row, text, Space};
use iced::Element;

use themesync_core::sync::theme_controller::ThemeController;
use themesync_core::theme::domain::theme_mode::ThemeMode;

use crate::app::Message;

/// Picker entry showing the capitalized label of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeChoice(ThemeMode);

const CHOICES: [ModeChoice; 3] = [
    ModeChoice(ThemeMode::ALL[0]),
    ModeChoice(ThemeMode::ALL[1]),
    ModeChoice(ThemeMode::ALL[2]),
];

impl fmt::Display for ModeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

pub fn view<'a>(controller: &ThemeController) -> Element<'a, Message> {
    column![
        text("Theme").size(16),
        Space::new().height(8),
        row![
            text("Mode").size(13),
            pick_list(CHOICES, Some(ModeChoice(controller.theme_mode())), |choice| {
                Message::ModeSelected(choice.0)
            })
            .text_size(13),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(20),
        text("Status").size(16),
        Space::new().height(8),
        text(format!("System color scheme: {}", controller.system_theme())).size(13),
        Space::new().height(4),
        text(format!("Active theme: {}", controller.current_theme())).size(13),
    ]
    .spacing(0)
    .into()
}
