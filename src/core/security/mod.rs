//! Security utilities for the server.
//!
//! Currently contains path validation for the local storage sandbox.

mod path_validator;

pub use path_validator::{PathSecurityError, resolve_within_root, validate_existing};
