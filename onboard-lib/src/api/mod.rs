//! Endpoint payloads and response handling.

pub mod login;
pub mod signup;
pub mod users;

pub use login::LoginRequest;
pub use signup::SignupRequest;
pub use users::User;
