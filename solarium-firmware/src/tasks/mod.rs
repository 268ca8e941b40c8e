//! Firmware tasks

pub mod buttons;
pub mod command;
pub mod render;
pub mod sensor;

pub use buttons::buttons_task;
pub use command::command_task;
pub use render::render_task;
pub use sensor::sensor_task;
