/// Identifies the status surface bound to one dispatched operation.
///
/// Generated at dispatch time, one per operation, so concurrent
/// operations never overwrite each other's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle events delivered to the observer of one dispatched operation.
///
/// Ordering contract: `Started` occurs at most once and before any
/// `Update`; `Update` occurs zero or more times; exactly one `Completed`
/// terminates the stream and nothing is delivered after it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The operation has been handed to its collaborator.
    Started,

    /// A progress update from the running operation. `percent` is 0-100
    /// by contract; producers constrain it upstream.
    Update {
        stage: String,
        detail: String,
        percent: u8,
    },

    /// The operation finished. Emitted exactly once, on every exit path.
    Completed { success: bool },
}
