pub mod events;
pub mod repo;

pub use events::*;
pub use repo::*;
