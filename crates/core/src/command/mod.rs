pub mod kind;
pub mod request;
pub mod resolve;
pub mod validate;

pub use kind::*;
pub use request::*;
pub use resolve::*;
pub use validate::*;
