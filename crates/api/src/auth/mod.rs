//! Authentication primitives: JWT tokens, password hashing, reset tokens.

pub mod jwt;
pub mod password;
