//! Error types

mod api;
mod config;

pub use api::*;
pub use config::*;
