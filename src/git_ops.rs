use anyhow::{Context, Result};
use git2::{Oid, Repository, Signature, Time};
use std::path::Path;

/// Records data-file commits in the git repository that contains the file
///
/// Remote operations are best effort: a repository without an `origin`
/// remote still gets local commits.
pub struct GitSync {
    repo: Repository,
}

impl GitSync {
    /// Find the repository containing `file_path`, if any
    pub fn discover(file_path: &Path) -> Option<Self> {
        let dir = file_path.parent().unwrap_or(file_path);
        Repository::discover(dir).ok().map(|repo| Self { repo })
    }

    /// Fast-forward to origin, commit the file, and push back
    pub fn sync(&self, file_path: &Path, message: &str) -> Result<()> {
        let has_origin = self.repo.find_remote("origin").is_ok();

        if has_origin {
            self.pull_fast_forward().context("Failed to pull changes")?;
        }

        let committed = self
            .commit_file(file_path, message)
            .context("Failed to commit changes")?;

        if has_origin && committed.is_some() {
            self.push().context("Failed to push changes")?;
        }

        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD")?;
        Ok(head
            .shorthand()
            .context("Failed to get branch name")?
            .to_string())
    }

    /// Fast-forward the current branch to origin; diverged history is an error
    fn pull_fast_forward(&self) -> Result<()> {
        let Ok(branch_name) = self.current_branch() else {
            // Unborn branch: nothing to fast-forward yet
            return Ok(());
        };

        let mut remote = self.repo.find_remote("origin")?;
        remote
            .fetch(&[&branch_name], None, None)
            .context("Failed to fetch from origin")?;

        let fetch_head = self.repo.find_reference("FETCH_HEAD")?;
        let fetch_commit = self.repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = self.repo.merge_analysis(&[&fetch_commit])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }

        if analysis.is_fast_forward() {
            let refname = format!("refs/heads/{}", branch_name);
            let mut reference = self.repo.find_reference(&refname)?;
            reference.set_target(fetch_commit.id(), "task-automator: fast-forward")?;
            self.repo.set_head(&refname)?;
            self.repo
                .checkout_head(Some(git2::build::CheckoutBuilder::default().force()))?;
            return Ok(());
        }

        anyhow::bail!("Local and remote history diverged; resolve manually before syncing")
    }

    /// Stage and commit the file; returns `None` when the tree did not change
    pub fn commit_file(&self, file_path: &Path, message: &str) -> Result<Option<Oid>> {
        let workdir = self
            .repo
            .workdir()
            .context("Repository has no working directory")?;
        let absolute = file_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
        let workdir = workdir.canonicalize()?;
        let relative_path = absolute
            .strip_prefix(&workdir)
            .context("File is not in repository")?;

        let mut index = self.repo.index()?;
        index.add_path(relative_path)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let parent_commit = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };

        if let Some(parent) = &parent_commit
            && parent.tree_id() == tree_id
        {
            tracing::debug!("data file unchanged in git, skipping commit");
            return Ok(None);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;
        let parents: Vec<_> = parent_commit.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        tracing::info!(commit = %oid, "recorded data file in git");
        Ok(Some(oid))
    }

    fn push(&self) -> Result<()> {
        let branch_name = self.current_branch()?;
        let mut remote = self.repo.find_remote("origin")?;
        let refspec = format!("refs/heads/{}", branch_name);
        remote.push(&[&refspec], None)?;
        Ok(())
    }

    fn signature(&self) -> Result<Signature<'static>> {
        let config = self.repo.config()?;
        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "task-automator".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "task-automator@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            // Some CI clocks make now() fail
            Err(_) => Signature::new(&name, &email, &Time::new(1_700_000_000, 0))
                .context("Failed to create signature with fixed time"),
        }
    }
}
