use clap::{Args, Parser, Subcommand};
use gitrelay_core::command::CommandRequest;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitrelay")]
#[command(about = "Dispatch git operations from structured command messages")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the repository catalog (overrides config)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Mode {
    /// Read newline-delimited JSON command messages from stdin (default)
    Serve,

    /// Dispatch one command built from flags and wait for it to finish
    Run(RunArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct RunArgs {
    /// Command name (push, pull, stage, commit, checkout); case-insensitive
    #[arg(long)]
    pub command: String,

    /// Repository id (0 = unset, resolve by local path instead)
    #[arg(long, default_value_t = 0)]
    pub id: u64,

    /// Repository local path, used when --id is unset
    #[arg(long)]
    pub local_path: Option<String>,

    /// Remote for push/pull; defaults to the repository's first remote
    #[arg(long)]
    pub remote: Option<String>,

    #[arg(long)]
    pub force: bool,

    #[arg(long)]
    pub push_all: bool,

    #[arg(long)]
    pub stage_all: bool,

    #[arg(long)]
    pub amend: bool,

    /// Commit message (empty is allowed)
    #[arg(long)]
    pub message: Option<String>,

    #[arg(long)]
    pub author_name: Option<String>,

    #[arg(long)]
    pub author_email: Option<String>,

    /// File pattern to stage
    #[arg(long)]
    pub file_pattern: Option<String>,

    /// Branch to check out
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit reference to check out (takes precedence over --branch)
    #[arg(long)]
    pub commit: Option<String>,
}

impl RunArgs {
    pub fn into_request(self) -> CommandRequest {
        CommandRequest {
            command: self.command,
            repo_id: self.id,
            local_path: self.local_path,
            remote: self.remote,
            force: self.force,
            push_all: self.push_all,
            stage_all: self.stage_all,
            amend: self.amend,
            commit_msg: self.message,
            author_name: self.author_name,
            author_email: self.author_email,
            file_pattern: self.file_pattern,
            branch: self.branch,
            commit: self.commit,
        }
    }
}
