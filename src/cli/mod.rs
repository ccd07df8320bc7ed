pub mod commands;
pub mod levels;
pub mod serve;

pub use commands::{Cli, Commands};
