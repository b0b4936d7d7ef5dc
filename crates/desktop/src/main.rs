mod app;
mod tabs;
mod theme;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("ThemeSync")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(480.0, 360.0),
            // The app tears the controller down before exiting
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}
