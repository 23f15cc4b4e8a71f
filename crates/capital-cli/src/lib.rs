/*
[INPUT]:  Command modules and configuration
[OUTPUT]: Library surface shared by the capital binary and its tests
[POS]:    Crate root - module wiring
[UPDATE]: When adding new modules
*/

pub mod commands;
pub mod config;

pub use commands::{Command, run};
pub use config::CliConfig;
