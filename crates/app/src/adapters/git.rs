use anyhow::{bail, Context, Result};
use git2::build::CheckoutBuilder;
use git2::{
    BranchType, FetchOptions, IndexAddOption, ObjectType, PushOptions, RemoteCallbacks,
    Repository as GitRepository, ResetType, Signature,
};
use gitrelay_core::command::{CheckoutParams, CommitParams, PullParams, PushParams, StageParams};
use gitrelay_core::domain::RepoEntry;
use gitrelay_core::ports::{GitPort, ProgressSink};
use tracing::debug;

/// Git adapter that implements GitPort using git2. Stateless: every
/// operation opens the repository at the entry's local path.
pub struct GitAdapter;

impl GitAdapter {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, repo: &RepoEntry) -> Result<GitRepository> {
        GitRepository::open(&repo.local_path).with_context(|| {
            format!(
                "Failed to open git repository at {}",
                repo.local_path.display()
            )
        })
    }
}

impl Default for GitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GitPort for GitAdapter {
    fn push(
        &self,
        repo: &RepoEntry,
        params: &PushParams,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        progress.update("Preparing push", &params.remote, 0);
        let git_repo = self.open(repo)?;

        let mut remote = git_repo
            .find_remote(&params.remote)
            .with_context(|| format!("Remote '{}' not found", params.remote))?;

        let branch_refs: Vec<String> = if params.push_all {
            let mut refs = Vec::new();
            for branch in git_repo.branches(Some(BranchType::Local))? {
                let (branch, _) = branch?;
                if let Some(name) = branch.get().name() {
                    refs.push(name.to_string());
                }
            }
            refs
        } else {
            let head = git_repo.head().context("Failed to resolve HEAD")?;
            if !head.is_branch() {
                bail!("HEAD is detached; nothing to push");
            }
            vec![head.name().context("HEAD has no valid name")?.to_string()]
        };

        if branch_refs.is_empty() {
            bail!("No local branches to push");
        }

        // A force push is a '+'-prefixed refspec.
        let prefix = if params.force { "+" } else { "" };
        let refspecs: Vec<String> = branch_refs
            .iter()
            .map(|name| format!("{prefix}{name}:{name}"))
            .collect();

        let mut callbacks = RemoteCallbacks::new();
        callbacks.push_transfer_progress(|current, total, _bytes| {
            if total > 0 {
                let percent = (current * 100 / total) as u8;
                progress.update("Pushing", &params.remote, percent);
            }
        });
        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .push(&refspecs, Some(&mut options))
            .with_context(|| format!("Failed to push to '{}'", params.remote))?;

        progress.update("Push complete", &params.remote, 100);
        Ok(())
    }

    fn pull(
        &self,
        repo: &RepoEntry,
        params: &PullParams,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        progress.update("Fetching", &params.remote, 0);
        let git_repo = self.open(repo)?;

        let mut remote = git_repo
            .find_remote(&params.remote)
            .with_context(|| format!("Remote '{}' not found", params.remote))?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            if stats.total_objects() > 0 {
                let percent = (stats.received_objects() * 100 / stats.total_objects()) as u8;
                progress.update("Receiving objects", &params.remote, percent);
            }
            true
        });
        let mut options = FetchOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .fetch(&[] as &[&str], Some(&mut options), None)
            .with_context(|| format!("Failed to fetch from '{}'", params.remote))?;

        let fetch_head = git_repo
            .find_reference("FETCH_HEAD")
            .context("Fetch produced no FETCH_HEAD")?;
        let fetch_commit = git_repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = git_repo.merge_analysis(&[&fetch_commit])?;

        if analysis.is_up_to_date() {
            progress.update("Already up to date", &params.remote, 100);
            return Ok(());
        }

        if analysis.is_unborn() {
            // Local HEAD points at a branch with no commits yet; create it
            // at the fetched tip.
            let head = git_repo.find_reference("HEAD")?;
            let refname = head
                .symbolic_target()
                .context("Unborn HEAD is not symbolic")?
                .to_string();
            git_repo.reference(&refname, fetch_commit.id(), true, "pull: initial")?;
            git_repo.set_head(&refname)?;
            git_repo.checkout_head(Some(CheckoutBuilder::new().force()))?;
        } else if analysis.is_fast_forward() {
            progress.update("Fast-forwarding", &params.remote, 90);
            let head = git_repo.head().context("Failed to resolve HEAD")?;
            let refname = head.name().context("HEAD has no valid name")?.to_string();
            git_repo
                .find_reference(&refname)?
                .set_target(fetch_commit.id(), "pull: fast-forward")?;
            git_repo.set_head(&refname)?;
            git_repo.checkout_head(Some(CheckoutBuilder::new().force()))?;
        } else if params.force {
            // Diverged history; the force flag means take the remote's tip.
            debug!(repo = %repo.name, "pull diverged, forcing reset to fetched tip");
            let commit = git_repo.find_commit(fetch_commit.id())?;
            git_repo.reset(commit.as_object(), ResetType::Hard, None)?;
        } else {
            bail!("Pull would not fast-forward; pass force to reset to the remote tip");
        }

        progress.update("Pull complete", &params.remote, 100);
        Ok(())
    }

    fn stage(
        &self,
        repo: &RepoEntry,
        params: &StageParams,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        progress.update("Staging files", &params.pattern, 0);
        let git_repo = self.open(repo)?;

        let mut index = git_repo.index().context("Failed to open index")?;
        index
            .add_all([params.pattern.as_str()], IndexAddOption::DEFAULT, None)
            .with_context(|| format!("Failed to stage pattern '{}'", params.pattern))?;
        index.write().context("Failed to write index")?;

        progress.update("Staged", &params.pattern, 100);
        Ok(())
    }

    fn commit(
        &self,
        repo: &RepoEntry,
        params: &CommitParams,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        let git_repo = self.open(repo)?;
        let mut index = git_repo.index().context("Failed to open index")?;

        if params.stage_all {
            progress.update("Staging all changes", "", 10);
            index
                .add_all(["*"], IndexAddOption::DEFAULT, None)
                .context("Failed to stage all changes")?;
            index.write().context("Failed to write index")?;
        }

        progress.update("Committing changes", "", 50);
        let tree_id = index.write_tree().context("Failed to write tree")?;
        let tree = git_repo.find_tree(tree_id)?;

        let signature = match (&params.author_name, &params.author_email) {
            (Some(name), Some(email)) => Signature::now(name, email)
                .with_context(|| format!("Invalid author: {name} <{email}>"))?,
            _ => git_repo
                .signature()
                .context("No author given and no signature configured")?,
        };

        if params.amend {
            let head_commit = git_repo
                .head()
                .context("Cannot amend: no HEAD")?
                .peel_to_commit()
                .context("Cannot amend: HEAD is not a commit")?;
            head_commit.amend(
                Some("HEAD"),
                Some(&signature),
                Some(&signature),
                None,
                Some(&params.message),
                Some(&tree),
            )?;
        } else {
            let parent = git_repo.head().ok().and_then(|h| h.peel_to_commit().ok());
            let parents: Vec<&git2::Commit> = parent.iter().collect();
            git_repo.commit(
                Some("HEAD"),
                &signature,
                &signature,
                &params.message,
                &tree,
                &parents,
            )?;
        }

        progress.update("Commit complete", "", 100);
        Ok(())
    }

    fn checkout(
        &self,
        repo: &RepoEntry,
        params: &CheckoutParams,
        progress: &dyn ProgressSink,
    ) -> Result<()> {
        let git_repo = self.open(repo)?;

        // Commit reference takes precedence over branch when both are given.
        if let Some(spec) = &params.commit {
            progress.update("Checking out", spec, 0);
            let object = git_repo
                .revparse_single(spec)
                .with_context(|| format!("Failed to resolve commit '{spec}'"))?;
            git_repo.checkout_tree(&object, Some(&mut CheckoutBuilder::new()))?;
            git_repo.set_head_detached(object.id())?;
            progress.update("Checkout complete", spec, 100);
        } else if let Some(name) = &params.branch {
            progress.update("Checking out", name, 0);
            let branch = git_repo
                .find_branch(name, BranchType::Local)
                .with_context(|| format!("Branch '{name}' not found"))?;
            let refname = branch
                .get()
                .name()
                .context("Branch has no valid name")?
                .to_string();
            let object = branch.get().peel(ObjectType::Commit)?;
            git_repo.checkout_tree(&object, Some(&mut CheckoutBuilder::new()))?;
            git_repo.set_head(&refname)?;
            progress.update("Checkout complete", name, 100);
        } else {
            // Validation guarantees a target, but this is a public API.
            bail!("No checkout target specified");
        }

        Ok(())
    }
}
