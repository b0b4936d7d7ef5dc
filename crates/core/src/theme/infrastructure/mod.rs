pub mod in_process_backend;
pub mod json_file_store;
mod listener_registry;
pub mod manual_signal_monitor;
pub mod memory_store;
pub mod platform_probe;
pub mod polling_signal_monitor;
pub mod root_node;
