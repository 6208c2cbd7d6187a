//! gitrelay core - command validation, repository resolution, and the
//! progress-reporting contract between a dispatched operation and its
//! observer.
//!
//! This crate contains the domain types, the validation/resolution rules,
//! and the ports (interfaces) that adapters implement. It has no
//! dependencies on Git libraries, async runtimes, or the filesystem.

pub mod command;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
