//! Core business logic module

pub mod bumper;
pub mod configurator;
pub mod error;
pub mod outcome;
pub mod params;
pub mod release;
pub mod types;
