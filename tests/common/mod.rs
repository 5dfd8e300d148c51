// Shared fixture: a real git repository in a temporary directory
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Release Bot").unwrap();
            config.set_str("user.email", "release-bot@example.com").unwrap();
        }
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Release Bot", "release-bot@example.com").unwrap()
    }

    /// Commit a change on top of HEAD
    pub fn commit(&self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.commit_with_parents(message, &parents, true)
    }

    /// Commit with explicit parents; `update_head` moves the current branch
    pub fn commit_with_parents(&self, message: &str, parents: &[Oid], update_head: bool) -> Oid {
        self.append_to("CHANGELOG", message);

        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new("CHANGELOG")).unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let parents: Vec<Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        let sig = self.signature();
        let update_ref = if update_head { Some("HEAD") } else { None };
        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo
            .tag(name, &object, &self.signature(), &format!("Release {}", name), false)
            .unwrap();
    }

    /// Tree of the given commit, for tags that point at non-commit objects
    pub fn tree_of(&self, commit: Oid) -> Oid {
        self.repo.find_commit(commit).unwrap().tree_id()
    }

    /// Annotated tag on any object; returns the tag object's id
    pub fn annotated_tag_on(&self, name: &str, target: Oid) -> Oid {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo
            .tag(name, &object, &self.signature(), &format!("Release {}", name), false)
            .unwrap()
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    /// Modify a tracked file without staging it
    pub fn make_dirty(&self) {
        self.append_to("CHANGELOG", "uncommitted");
    }

    pub fn add_untracked(&self, name: &str) {
        fs::write(self.path().join(name), "scratch\n").unwrap();
    }

    fn append_to(&self, file: &str, line: &str) {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path().join(file))
            .unwrap();
        writeln!(handle, "{}", line).unwrap();
    }
}
