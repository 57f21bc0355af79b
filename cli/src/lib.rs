pub mod commands;
pub mod context;
pub mod logging;
pub mod terminal;

pub use context::Args;
