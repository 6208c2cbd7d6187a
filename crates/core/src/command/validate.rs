use crate::command::{CommandKind, CommandRequest};
use crate::domain::RepoEntry;
use crate::error::{DispatchError, Result};

/// Validated parameters for a push operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PushParams {
    pub remote: String,
    pub force: bool,
    pub push_all: bool,
}

/// Validated parameters for a pull operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PullParams {
    pub remote: String,
    pub force: bool,
}

/// Validated parameters for a commit operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitParams {
    /// May be empty - only absence of the field is invalid.
    pub message: String,
    pub amend: bool,
    pub stage_all: bool,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

/// Validated parameters for a stage operation.
#[derive(Debug, Clone, PartialEq)]
pub struct StageParams {
    pub pattern: String,
}

/// Validated parameters for a checkout operation. At least one of
/// `commit` / `branch` is present; when both are given the commit
/// reference takes precedence in the git collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutParams {
    pub commit: Option<String>,
    pub branch: Option<String>,
}

/// A request that passed per-kind validation and is ready to dispatch.
/// There is deliberately no `Invalid` variant - an unrecognized command
/// can never reach the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedCommand {
    Push(PushParams),
    Pull(PullParams),
    Stage(StageParams),
    Commit(CommitParams),
    Checkout(CheckoutParams),
}

impl ValidatedCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ValidatedCommand::Push(_) => CommandKind::Push,
            ValidatedCommand::Pull(_) => CommandKind::Pull,
            ValidatedCommand::Stage(_) => CommandKind::Stage,
            ValidatedCommand::Commit(_) => CommandKind::Commit,
            ValidatedCommand::Checkout(_) => CommandKind::Checkout,
        }
    }
}

/// Check the request's fields against the rules for `kind`, applying
/// defaults where the contract allows them. Pure: no side effects, and
/// the first violated rule wins.
pub fn validate(
    kind: CommandKind,
    request: &CommandRequest,
    repo: &RepoEntry,
) -> Result<ValidatedCommand> {
    match kind {
        CommandKind::Push => Ok(ValidatedCommand::Push(PushParams {
            remote: validated_remote(request, repo)?,
            force: request.force,
            push_all: request.push_all,
        })),

        CommandKind::Pull => Ok(ValidatedCommand::Pull(PullParams {
            remote: validated_remote(request, repo)?,
            force: request.force,
        })),

        CommandKind::Commit => {
            // An empty commit message is legal, so only absence is checked.
            let message = request
                .commit_msg
                .clone()
                .ok_or(DispatchError::MissingRequiredField {
                    field: "commit_msg",
                })?;
            Ok(ValidatedCommand::Commit(CommitParams {
                message,
                amend: request.amend,
                stage_all: request.stage_all,
                author_name: request.author_name.clone(),
                author_email: request.author_email.clone(),
            }))
        }

        CommandKind::Stage => match request.file_pattern.as_deref() {
            Some(pattern) if !pattern.is_empty() => Ok(ValidatedCommand::Stage(StageParams {
                pattern: pattern.to_string(),
            })),
            _ => Err(DispatchError::MissingRequiredField {
                field: "file_pattern",
            }),
        },

        CommandKind::Checkout => {
            let commit = non_blank(request.commit.as_deref());
            let branch = non_blank(request.branch.as_deref());
            if commit.is_none() && branch.is_none() {
                return Err(DispatchError::NoCheckoutTarget);
            }
            Ok(ValidatedCommand::Checkout(CheckoutParams { commit, branch }))
        }

        CommandKind::Invalid => Err(DispatchError::UnrecognizedCommand {
            name: request.command.clone(),
        }),
    }
}

/// The remote a push/pull will talk to: the requested one if it is
/// configured on the repository, otherwise the repository's first remote.
fn validated_remote(request: &CommandRequest, repo: &RepoEntry) -> Result<String> {
    let remote = match request.remote.as_deref() {
        Some(remote) if !remote.is_empty() => remote.to_string(),
        _ => repo
            .remotes
            .first()
            .cloned()
            .ok_or(DispatchError::NoRemotesConfigured)?,
    };

    if !repo.remotes.iter().any(|r| r == &remote) {
        return Err(DispatchError::InvalidRemote { remote });
    }
    Ok(remote)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}
