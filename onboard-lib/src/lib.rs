//! Onboarding API client library
//!
//! An async client for the login, signup and user-list endpoints, with the
//! response normalization the screens rely on.

pub mod api;
pub mod config;
pub mod error;
pub mod response;

mod client;

pub use client::*;
pub use config::ApiConfig;
pub use error::ApiError;
