use crate::domain::{RepoEntry, RepoId};
use anyhow::Result;

/// Port for the external repository catalog. Read-only from the
/// dispatcher's point of view: resolution queries entries but never
/// creates or mutates them.
pub trait CatalogPort: Send + Sync {
    /// Look up a repository by id.
    fn get_by_id(&self, id: RepoId) -> Result<Option<RepoEntry>>;

    /// All known repositories, in catalog order.
    fn all(&self) -> Result<Vec<RepoEntry>>;
}
