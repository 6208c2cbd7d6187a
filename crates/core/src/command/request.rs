use serde::Deserialize;

/// An incoming command message, as it arrives off the wire.
///
/// Every field beyond `command` is optional at the transport level;
/// per-kind validity is enforced by [`validate`](crate::command::validate).
/// Field names match the original broadcast-intent extras, so existing
/// callers can reuse their payloads unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandRequest {
    /// Command name, matched case-insensitively against [`CommandKind`].
    ///
    /// [`CommandKind`]: crate::command::CommandKind
    pub command: String,

    /// Target repository id; 0 means "unset" and falls back to
    /// `local_path` resolution.
    #[serde(default, rename = "id")]
    pub repo_id: u64,

    /// Local path of the target repository, used when `repo_id` does not
    /// resolve.
    #[serde(default)]
    pub local_path: Option<String>,

    /// Remote to push to / pull from; defaults to the repository's first
    /// remote.
    #[serde(default)]
    pub remote: Option<String>,

    /// Force flag, used by both push and pull.
    #[serde(default)]
    pub force: bool,

    #[serde(default)]
    pub push_all: bool,

    #[serde(default)]
    pub stage_all: bool,

    #[serde(default)]
    pub amend: bool,

    /// Commit message. An empty string is a valid message; only absence
    /// is an error.
    #[serde(default)]
    pub commit_msg: Option<String>,

    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub author_email: Option<String>,

    #[serde(default)]
    pub file_pattern: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub commit: Option<String>,
}

impl CommandRequest {
    /// A request carrying only a command name; the rest defaults to unset.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }
}
