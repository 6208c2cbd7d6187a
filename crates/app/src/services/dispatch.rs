use gitrelay_core::command::{
    resolve_repo, validate, CommandKind, CommandRequest, ValidatedCommand,
};
use gitrelay_core::domain::{ProgressEvent, RepoEntry, SurfaceId};
use gitrelay_core::error::DispatchError;
use gitrelay_core::ports::{CatalogPort, GitPort, ProgressSink, StatusSink};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Coordinates one command message from validation to completion: resolve
/// the repository, validate parameters, then run exactly one background
/// operation wired to its own status surface.
pub struct DispatchService {
    git: Arc<dyn GitPort>,
    catalog: Arc<dyn CatalogPort>,
    sink: Arc<dyn StatusSink>,
    next_surface: AtomicU64,
}

/// Handle for one in-flight operation. Fire-and-forget by default; `wait`
/// is for callers that need the outcome (the one-shot CLI, tests).
pub struct DispatchedOperation {
    pub surface: SurfaceId,
    pub kind: CommandKind,
    pub repo_name: String,
    worker: JoinHandle<bool>,
    notifier: JoinHandle<()>,
}

impl DispatchedOperation {
    /// Wait until the operation finished and its terminal event has been
    /// rendered. Returns whether the operation succeeded.
    pub async fn wait(self) -> bool {
        let success = self.worker.await.unwrap_or(false);
        let _ = self.notifier.await;
        success
    }
}

/// Parse one JSON command message off the wire.
pub fn parse_request(line: &str) -> Result<CommandRequest, DispatchError> {
    serde_json::from_str(line).map_err(|e| DispatchError::MalformedRequest {
        reason: e.to_string(),
    })
}

impl DispatchService {
    pub fn new(
        git: Arc<dyn GitPort>,
        catalog: Arc<dyn CatalogPort>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            git,
            catalog,
            sink,
            next_surface: AtomicU64::new(1),
        }
    }

    /// Validate, resolve, and dispatch one request. Every failure here is
    /// synchronous and structured; no task is spawned and no surface is
    /// created. Must be called from within a tokio runtime.
    pub fn handle(&self, request: &CommandRequest) -> Result<DispatchedOperation, DispatchError> {
        let kind = CommandKind::resolve(&request.command);
        debug!(command = %request.command, %kind, "resolved command");

        if kind == CommandKind::Invalid {
            return Err(DispatchError::UnrecognizedCommand {
                name: request.command.clone(),
            });
        }

        let repo = resolve_repo(request, self.catalog.as_ref())?;
        let command = validate(kind, request, &repo)?;

        Ok(self.dispatch(repo, command))
    }

    /// Start exactly one background operation and its notifier. `Started`
    /// is queued before the worker ever sees the sender, so no `Update`
    /// can precede it.
    fn dispatch(&self, repo: RepoEntry, command: ValidatedCommand) -> DispatchedOperation {
        let surface = SurfaceId(self.next_surface.fetch_add(1, Ordering::Relaxed));
        let kind = command.kind();
        let title = format!("{}: {}", repo.name, kind);
        info!(%surface, %kind, repo = %repo, "dispatching operation");

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let _ = event_tx.send(ProgressEvent::Started);

        let notifier = tokio::spawn(run_notifier(self.sink.clone(), surface, title, event_rx));

        let git = self.git.clone();
        let repo_name = repo.name.clone();
        let worker_repo_name = repo_name.clone();
        let worker = tokio::spawn(async move {
            let progress_tx = event_tx.clone();
            let result = tokio::task::spawn_blocking(move || {
                let progress = ChannelProgress { tx: progress_tx };
                run_operation(git.as_ref(), &repo, &command, &progress)
            })
            .await;

            let success = match result {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    error!(%surface, repo = %worker_repo_name, "operation failed: {e:#}");
                    false
                }
                Err(e) => {
                    error!(%surface, repo = %worker_repo_name, "operation task panicked: {e}");
                    false
                }
            };

            // The one terminal event, on every exit path.
            let _ = event_tx.send(ProgressEvent::Completed { success });
            success
        });

        DispatchedOperation {
            surface,
            kind,
            repo_name,
            worker,
            notifier,
        }
    }
}

/// Bridges a blocking collaborator's progress calls onto the operation's
/// event stream.
struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSink for ChannelProgress {
    fn update(&self, stage: &str, detail: &str, percent: u8) {
        let _ = self.tx.send(ProgressEvent::Update {
            stage: stage.to_string(),
            detail: detail.to_string(),
            percent,
        });
    }
}

/// Hand the validated command to its collaborator. Exhaustive by
/// construction: `ValidatedCommand` has no invalid variant.
fn run_operation(
    git: &dyn GitPort,
    repo: &RepoEntry,
    command: &ValidatedCommand,
    progress: &dyn ProgressSink,
) -> anyhow::Result<()> {
    match command {
        ValidatedCommand::Push(params) => git.push(repo, params, progress),
        ValidatedCommand::Pull(params) => git.pull(repo, params, progress),
        ValidatedCommand::Stage(params) => git.stage(repo, params, progress),
        ValidatedCommand::Commit(params) => git.commit(repo, params, progress),
        ValidatedCommand::Checkout(params) => git.checkout(repo, params, progress),
    }
}

/// Consume one operation's event stream and drive its status surface.
/// This task is the single writer for the surface; events arriving after
/// `Completed` are ignored.
async fn run_notifier(
    sink: Arc<dyn StatusSink>,
    surface: SurfaceId,
    title: String,
    mut event_rx: mpsc::UnboundedReceiver<ProgressEvent>,
) {
    let mut completed = false;
    while let Some(event) = event_rx.recv().await {
        if completed {
            debug!(%surface, ?event, "ignoring event after completion");
            continue;
        }
        match event {
            ProgressEvent::Started => sink.begin(surface, &title),
            ProgressEvent::Update {
                stage,
                detail,
                percent,
            } => sink.update(surface, &format!("{stage} {detail}"), percent),
            ProgressEvent::Completed { success } => {
                completed = true;
                if success {
                    sink.dismiss(surface);
                } else {
                    sink.fail(surface, &format!("{title} failed"));
                }
            }
        }
    }
}
