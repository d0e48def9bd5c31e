//! Credential and token primitives.

pub mod jwt;
pub mod password;
