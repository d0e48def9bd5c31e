//! Business logic and use-case orchestration.

pub mod directory;

pub use directory::UserDirectory;
