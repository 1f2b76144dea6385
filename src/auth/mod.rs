//! Credential loading

pub mod credentials;

pub use credentials::Credentials;
