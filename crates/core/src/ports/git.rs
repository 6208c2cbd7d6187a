use crate::command::{CheckoutParams, CommitParams, PullParams, PushParams, StageParams};
use crate::domain::RepoEntry;
use anyhow::Result;

/// Sink for in-flight progress from a running operation. Implementations
/// forward to the operation's event stream; `percent` is 0-100 by
/// contract.
pub trait ProgressSink: Send + Sync {
    fn update(&self, stage: &str, detail: &str, percent: u8);
}

/// Port for the git operation collaborators, one method per dispatchable
/// command kind. All methods block until the operation finishes; the
/// dispatcher runs them on a background worker. Failures are returned,
/// never reported through `progress`.
pub trait GitPort: Send + Sync {
    /// Push the current branch (or all local branches with `push_all`) to
    /// the validated remote.
    fn push(&self, repo: &RepoEntry, params: &PushParams, progress: &dyn ProgressSink)
        -> Result<()>;

    /// Fetch from the validated remote and fast-forward the current
    /// branch; with `force`, reset to the fetched tip instead.
    fn pull(&self, repo: &RepoEntry, params: &PullParams, progress: &dyn ProgressSink)
        -> Result<()>;

    /// Stage paths matching the file pattern.
    fn stage(
        &self,
        repo: &RepoEntry,
        params: &StageParams,
        progress: &dyn ProgressSink,
    ) -> Result<()>;

    /// Commit the index, optionally staging everything first or amending
    /// HEAD.
    fn commit(
        &self,
        repo: &RepoEntry,
        params: &CommitParams,
        progress: &dyn ProgressSink,
    ) -> Result<()>;

    /// Check out a commit or branch. When both are given, the commit
    /// reference takes precedence and HEAD is detached at it.
    fn checkout(
        &self,
        repo: &RepoEntry,
        params: &CheckoutParams,
        progress: &dyn ProgressSink,
    ) -> Result<()>;
}
