use anyhow::{Context, Result, anyhow};
use git2::{ErrorCode, Oid, Repository, Signature};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// The version-control side of a bump: stage the rewritten files, commit them
/// and tag the commit.
pub trait CommitGateway {
    /// Author and tagger identity, timestamped now.
    fn signature(&self) -> Result<Signature<'static>>;
    fn stage(&mut self, path: &Path) -> Result<()>;
    fn commit(&mut self, message: &str, author: &Signature<'_>) -> Result<Oid>;
    fn tag(&mut self, name: &str, commit: Oid, tagger: &Signature<'_>, message: &str) -> Result<()>;
}

/// Stages `files`, commits them with `version` as the message and tags the
/// commit `v{version}`.
pub fn save<G: CommitGateway + ?Sized>(gateway: &mut G, files: &[PathBuf], version: &str) -> Result<Oid> {
    let signature = gateway.signature()?;

    for file in files {
        gateway
            .stage(file)
            .with_context(|| format!("error staging a file {}", file.display()))?;
    }

    let commit = gateway
        .commit(version, &signature)
        .context("error committing changes")?;

    gateway
        .tag(&format!("v{version}"), commit, &signature, version)
        .context("error tagging changes")?;

    Ok(commit)
}

pub struct GitTracker {
    pub repository: Repository,
    root: PathBuf,
}

impl GitTracker {
    /// Opens the repository containing `root`. Paths handed to [`CommitGateway::stage`]
    /// are resolved against `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let repository = Repository::discover(root)
            .with_context(|| format!("error opening repository at {:?}", root))?;

        debug!("Opened repository at {:?}", repository.path());

        Ok(GitTracker {
            repository,
            root: root.to_path_buf(),
        })
    }

    /// Converts a scan-root relative path into one relative to the work tree.
    fn workdir_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self
            .repository
            .workdir()
            .ok_or_else(|| anyhow!("repository has no working directory"))?
            .canonicalize()?;
        let absolute = self.root.join(path).canonicalize()?;
        let relative = absolute
            .strip_prefix(&workdir)
            .with_context(|| format!("{} is outside of the repository", absolute.display()))?;
        Ok(relative.to_path_buf())
    }

    /// Gets all tags from the repository
    pub fn get_tags(&self) -> Result<Vec<String>> {
        let mut tags = Vec::new();

        self.repository.tag_foreach(|_oid, name| {
            if let Ok(name_str) = std::str::from_utf8(name) {
                let tag_name = name_str.trim_start_matches("refs/tags/");
                tags.push(tag_name.to_string());
            }
            true
        })?;

        Ok(tags)
    }
}

impl CommitGateway for GitTracker {
    fn signature(&self) -> Result<Signature<'static>> {
        self.repository
            .signature()
            .context("error retrieving git identity, please configure user.name and user.email")
    }

    fn stage(&mut self, path: &Path) -> Result<()> {
        let relative = self.workdir_path(path)?;
        let mut index = self.repository.index()?;
        index.add_path(&relative)?;
        index.write()?;

        debug!("Staged {}", relative.display());
        Ok(())
    }

    fn commit(&mut self, message: &str, author: &Signature<'_>) -> Result<Oid> {
        let mut index = self.repository.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repository.find_tree(tree_id)?;

        let parent = match self.repository.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e).context("error reading HEAD"),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let commit_id = self
            .repository
            .commit(Some("HEAD"), author, author, message, &tree, &parents)?;

        info!("Created commit: {}", commit_id);
        Ok(commit_id)
    }

    fn tag(&mut self, name: &str, commit: Oid, tagger: &Signature<'_>, message: &str) -> Result<()> {
        let target = self
            .repository
            .find_object(commit, Some(git2::ObjectType::Commit))?;

        self.repository.tag(name, &target, tagger, message, false)?;

        info!("Created tag: {}", name);
        Ok(())
    }
}
