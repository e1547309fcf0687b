/*
[INPUT]:  HTTP client configuration and user service endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod user;

pub use error::{ProfileError, Result};
pub use user::UserService;

pub use client::{ClientConfig, ProfileClient};
