pub mod backend_bridge;
pub mod controller_factory;
pub mod theme_controller;
