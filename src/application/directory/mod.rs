//! Directory orchestration service.

pub mod service;

pub use service::UserDirectory;
