use thiserror::Error;

/// Errors produced while turning an incoming command message into a
/// dispatched operation. All of these are detected synchronously, before
/// any background work starts; once an operation is running, failures
/// travel through `ProgressEvent::Completed { success: false }` instead.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("unrecognized command: {name:?}")]
    UnrecognizedCommand { name: String },

    #[error("invalid repository reference")]
    RepositoryNotFound,

    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("remote {remote:?} is not configured for this repository")]
    InvalidRemote { remote: String },

    #[error("repository has no remotes configured")]
    NoRemotesConfigured,

    #[error("neither commit nor branch specified for checkout")]
    NoCheckoutTarget,

    #[error("catalog error: {source}")]
    Catalog { source: anyhow::Error },
}

pub type Result<T> = std::result::Result<T, DispatchError>;
