use anyhow::{Context, Result};
use gitrelay_core::domain::{RepoEntry, RepoId};
use gitrelay_core::ports::CatalogPort;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One catalog record as stored on disk. Remotes are not persisted; they
/// are read from the repository itself when an entry is materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    repos: Vec<RepoRecord>,
}

/// File-based repository catalog that implements CatalogPort.
///
/// The TOML file is re-read on every query so external edits are picked
/// up without restarting; catalogs are small enough that this is cheap.
pub struct FileCatalog {
    catalog_path: PathBuf,
}

impl FileCatalog {
    pub fn with_path<P: AsRef<Path>>(catalog_path: P) -> Self {
        Self {
            catalog_path: catalog_path.as_ref().to_path_buf(),
        }
    }

    /// Write records to the catalog file, creating parent directories as
    /// needed. Used by tooling and tests; the dispatcher never writes.
    pub fn save(&self, records: &[RepoRecord]) -> Result<()> {
        let file = CatalogFile {
            repos: records.to_vec(),
        };
        let contents =
            toml::to_string_pretty(&file).context("Failed to serialize catalog to TOML")?;
        if let Some(parent) = self.catalog_path.parent() {
            fs::create_dir_all(parent).context("Failed to create catalog directory")?;
        }
        fs::write(&self.catalog_path, contents).with_context(|| {
            format!("Failed to write catalog file: {}", self.catalog_path.display())
        })?;
        Ok(())
    }

    fn load(&self) -> Result<CatalogFile> {
        if !self.catalog_path.exists() {
            debug!(path = %self.catalog_path.display(), "catalog file missing, treating as empty");
            return Ok(CatalogFile::default());
        }

        let contents = fs::read_to_string(&self.catalog_path).with_context(|| {
            format!("Failed to read catalog file: {}", self.catalog_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse catalog file: {}", self.catalog_path.display())
        })
    }

    fn materialize(record: RepoRecord) -> RepoEntry {
        RepoEntry {
            id: RepoId(record.id),
            name: record.name,
            remotes: read_remotes(&record.path),
            local_path: record.path,
        }
    }
}

/// Remote names configured on the repository, in configuration order.
/// A missing or unopenable repository yields no remotes; push/pull
/// validation will then fail with the structured no-remotes error.
fn read_remotes(path: &Path) -> Vec<String> {
    let git_repo = match git2::Repository::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not open repository for remotes");
            return Vec::new();
        }
    };

    match git_repo.remotes() {
        Ok(names) => names.iter().flatten().map(|n| n.to_string()).collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not list remotes");
            Vec::new()
        }
    }
}

impl CatalogPort for FileCatalog {
    fn get_by_id(&self, id: RepoId) -> Result<Option<RepoEntry>> {
        let file = self.load()?;
        Ok(file
            .repos
            .into_iter()
            .find(|record| record.id == id.0)
            .map(Self::materialize))
    }

    fn all(&self) -> Result<Vec<RepoEntry>> {
        let file = self.load()?;
        Ok(file.repos.into_iter().map(Self::materialize).collect())
    }
}
