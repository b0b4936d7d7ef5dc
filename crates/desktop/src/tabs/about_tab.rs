use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::Message;

pub fn view() -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("ThemeSync").size(22),
        Space::new().height(4),
        text(format!("Version {version}")).size(13),
        Space::new().height(12),
        text(
            "Follows your light or dark preference, or the operating system's \
             color scheme when set to System. Your choice is remembered \
             between launches."
        )
        .size(13),
    ]
    .spacing(0)
    .into()
}
