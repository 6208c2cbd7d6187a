pub mod catalog;
pub mod git;
pub mod notify;
