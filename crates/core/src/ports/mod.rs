pub mod catalog;
pub mod git;
pub mod notify;

// Re-exports
pub use catalog::*;
pub use git::*;
pub use notify::*;
