//! gitrelay application library
//!
//! Adapters and the dispatch service around `gitrelay-core`, exposed for
//! integration tests and external usage.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod services;
