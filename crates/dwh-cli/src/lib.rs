//! Library side of the `dwh` command: settings, commands and logging.

pub mod commands;
pub mod logging;
pub mod settings;
