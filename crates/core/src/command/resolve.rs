use crate::command::CommandRequest;
use crate::domain::{RepoEntry, RepoId};
use crate::error::{DispatchError, Result};
use crate::ports::CatalogPort;
use std::path::Path;

/// Resolve the target repository for a request.
///
/// A positive `repo_id` takes strict precedence: when it resolves, the
/// local path is ignored entirely. Otherwise a non-empty `local_path` is
/// required and matched exactly against the full catalog. Catalog entries
/// are never created or mutated here.
pub fn resolve_repo(request: &CommandRequest, catalog: &dyn CatalogPort) -> Result<RepoEntry> {
    if request.repo_id > 0 {
        if let Some(entry) = catalog
            .get_by_id(RepoId(request.repo_id))
            .map_err(|source| DispatchError::Catalog { source })?
        {
            return Ok(entry);
        }
    }

    let local_path = request.local_path.as_deref().unwrap_or("");
    if local_path.is_empty() {
        return Err(DispatchError::RepositoryNotFound);
    }

    catalog
        .all()
        .map_err(|source| DispatchError::Catalog { source })?
        .into_iter()
        .find(|entry| entry.local_path == Path::new(local_path))
        .ok_or(DispatchError::RepositoryNotFound)
}
