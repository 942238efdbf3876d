//! Configuration module

pub mod cli;
pub mod settings;

pub use cli::{BumpArgs, SsidArgs};
pub use settings::{BumpSettings, SsidSettings};
