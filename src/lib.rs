//! Controller Tools
//!
//! Two small operational utilities sharing one error, logging and
//! configuration stack:
//! - SSID provisioning of a wireless controller over its terminal session
//! - Version string bumping across a project tree, with optional git release

pub mod config;
pub mod core;
pub mod logging;
pub mod session;
pub mod vcs;

pub use crate::core::{
    error::{BumpError, ConfigureError, SessionError},
    types::{BumpReport, BumpType, SsidParams, Version},
};
