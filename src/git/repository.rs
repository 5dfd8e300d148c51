use crate::domain::CommitRef;
use crate::error::Result;
use crate::git::TagRef;
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo, Status, StatusOptions};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Working directory, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            let annotated = match reference.target() {
                Some(oid) => self.repo.find_object(oid, None)?.kind() == Some(ObjectType::Tag),
                None => false,
            };

            // Peeling with Any stops at the first object that is not a tag.
            let peeled = reference.peel(ObjectType::Any)?;
            let target = (peeled.kind() == Some(ObjectType::Commit)).then(|| peeled.id());

            tags.push(TagRef {
                name: name.to_string(),
                target,
                annotated,
            });
        }

        Ok(tags)
    }

    fn commit(&self, id: Oid) -> Result<CommitRef> {
        let commit = self.repo.find_commit(id)?;
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

        Ok(CommitRef::new(id, message, commit.parent_ids().collect()))
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool> {
        if self.repo.is_bare() {
            return Ok(false);
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .any(|entry| !entry.status().is_empty() && !entry.status().contains(Status::IGNORED)))
    }

    fn create_annotated_tag(&self, name: &str, target: Oid, message: &str) -> Result<()> {
        let object = self.repo.find_object(target, None)?;
        let tagger = self.repo.signature()?;

        self.repo.tag(name, &object, &tagger, message, false)?;

        Ok(())
    }
}
