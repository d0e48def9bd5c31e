//! Inbound interfaces.

pub mod http;
