//! Authentication and password hashing.
//!
//! Hydra has no token or session machinery: the login endpoint verifies a
//! password and hands back the user record. Only the hashing primitives
//! live here.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
