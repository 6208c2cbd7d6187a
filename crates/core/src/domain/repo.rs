use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a catalog repository. Ids start at 1; the wire
/// format uses 0 to mean "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId(pub u64);

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository known to the catalog, as resolved for one command.
///
/// Owned by the catalog; the dispatcher works with a clone for the
/// duration of a single operation and never writes back. `remotes`
/// preserves catalog order - the first entry is the default remote.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoEntry {
    pub id: RepoId,
    pub name: String,
    pub local_path: PathBuf,
    pub remotes: Vec<String>,
}

impl std::fmt::Display for RepoEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.local_path.display())
    }
}
