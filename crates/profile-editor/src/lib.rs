/*
[INPUT]:  Public API exports for profile-editor crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod country;
pub mod form;
pub mod schema;
pub mod tui;

// Re-export main types for convenience
pub use config::AppConfig;
pub use controller::{EditMode, MountOutcome, ProfileController, Route, SubmitOutcome};
pub use country::{Country, CountryDirectory};
pub use form::{FormEvent, FormState, ProfileValues};
pub use schema::{ErrorKey, FieldName};
