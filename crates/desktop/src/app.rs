use std::time::Duration;

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{window, Element, Length, Subscription, Task, Theme};

use themesync_core::shared::config::ThemeSyncConfig;
use themesync_core::sync::controller_factory::{
    create_controller, create_platform_controller, platform_monitor,
};
use themesync_core::sync::theme_controller::ThemeController;
use themesync_core::theme::domain::theme_mode::ThemeMode;
use themesync_core::theme::infrastructure::in_process_backend::InProcessBackend;
use themesync_core::theme::infrastructure::memory_store::MemoryStore;
use themesync_core::theme::infrastructure::root_node::RootNode;

use crate::tabs;
use crate::theme;

/// How often queued OS color-scheme transitions are applied.
const SIGNAL_DRAIN_INTERVAL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Appearance,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Appearance, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Appearance => "Appearance",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    ModeSelected(ThemeMode),
    PollSystemTheme,
    CloseRequested(window::Id),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    /// `None` once torn down on close.
    controller: Option<ThemeController>,
    root: RootNode,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let root = RootNode::new();
        let controller = start_controller(&root);
        (Self::with_controller(controller, root), Task::none())
    }

    fn with_controller(controller: ThemeController, root: RootNode) -> Self {
        Self {
            active_tab: Tab::Appearance,
            controller: Some(controller),
            root,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::ModeSelected(mode) => {
                if let Some(controller) = &mut self.controller {
                    controller.set_theme_mode(mode);
                }
            }
            Message::PollSystemTheme => {
                // theme() reads the root node on every render, so applying
                // the queued transitions is enough.
                if let Some(controller) = &mut self.controller {
                    controller.process_pending();
                }
            }
            Message::CloseRequested(_id) => {
                if let Some(controller) = self.controller.take() {
                    controller.teardown();
                }
                return iced::exit();
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(13))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match (self.active_tab, &self.controller) {
            (Tab::Appearance, Some(controller)) => tabs::appearance_tab::view(controller),
            (Tab::Appearance, None) => text("Closing").size(13).into(),
            (Tab::About, _) => tabs::about_tab::view(),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(16)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(&self.root)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(SIGNAL_DRAIN_INTERVAL).map(|_| Message::PollSystemTheme),
            window::close_requests().map(Message::CloseRequested),
        ])
    }
}

/// Controller over the platform preferences file, or over memory when no
/// config directory exists (the choice then lasts only for this run).
fn start_controller(root: &RootNode) -> ThemeController {
    let config = ThemeSyncConfig::default();
    match create_platform_controller(
        &config,
        Box::new(root.clone()),
        Box::new(InProcessBackend::new()),
    ) {
        Ok(controller) => controller,
        Err(e) => {
            log::warn!("Theme preferences will not be saved: {e}");
            create_controller(
                Box::new(platform_monitor(&config)),
                Box::new(MemoryStore::new()),
                Box::new(root.clone()),
                Box::new(InProcessBackend::new()),
            )
        }
    }
}
