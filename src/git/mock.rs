use crate::domain::CommitRef;
use crate::error::{Result, SemverError};
use crate::git::{Repository, TagRef};
use git2::Oid;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory commit graph implementing [Repository] for tests
pub struct MockRepository {
    commits: HashMap<Oid, CommitRef>,
    tags: RefCell<Vec<TagRef>>,
    head: Option<Oid>,
    modified: bool,
    untracked: bool,
    next_seed: u64,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: RefCell::new(Vec::new()),
            head: None,
            modified: false,
            untracked: false,
            next_seed: 0,
        }
    }

    /// Record a commit with the given parents and move HEAD to it
    pub fn add_commit(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let id = fake_oid(self.next_seed);
        self.next_seed += 1;

        self.commits
            .insert(id, CommitRef::new(id, message, parents.to_vec()));
        self.head = Some(id);
        id
    }

    /// Append a commit on top of HEAD (or a root commit in an empty repository)
    pub fn commit_on_head(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = self.head.into_iter().collect();
        self.add_commit(message, &parents)
    }

    /// Register a commit id without storing the object, simulating corruption
    pub fn reference_missing_commit(&mut self, message: &str, missing_parent: Oid) -> Oid {
        self.add_commit(message, &[missing_parent])
    }

    pub fn add_annotated_tag(&mut self, name: impl Into<String>, target: Oid) {
        self.tags.get_mut().push(TagRef {
            name: name.into(),
            target: Some(target),
            annotated: true,
        });
    }

    pub fn add_lightweight_tag(&mut self, name: impl Into<String>, target: Oid) {
        self.tags.get_mut().push(TagRef {
            name: name.into(),
            target: Some(target),
            annotated: false,
        });
    }

    /// Annotated tag pointing at a tree or blob rather than a commit
    pub fn add_non_commit_tag(&mut self, name: impl Into<String>) {
        self.tags.get_mut().push(TagRef {
            name: name.into(),
            target: None,
            annotated: true,
        });
    }

    /// Simulate modified tracked files
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Simulate untracked files in the working tree
    pub fn set_untracked(&mut self, untracked: bool) {
        self.untracked = untracked;
    }

    /// Names of all tags, including those created through the trait
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.borrow().iter().map(|t| t.name.clone()).collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic, well-spread ids so abbreviated hashes look like real ones.
fn fake_oid(seed: u64) -> Oid {
    let mut bytes = [0u8; 20];
    let mut state = seed.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);

    for chunk in bytes.chunks_mut(8) {
        let word = state.to_be_bytes();
        chunk.copy_from_slice(&word[..chunk.len()]);
        state = state.rotate_left(17).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    }

    Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<Option<Oid>> {
        Ok(self.head)
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.borrow().clone())
    }

    fn commit(&self, id: Oid) -> Result<CommitRef> {
        self.commits
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                SemverError::repository(format!("object not found - no match for id ({})", id))
            })
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool> {
        Ok(self.modified || (include_untracked && self.untracked))
    }

    fn create_annotated_tag(&self, name: &str, target: Oid, _message: &str) -> Result<()> {
        if !self.commits.contains_key(&target) {
            return Err(SemverError::repository(format!(
                "object not found - no match for id ({})",
                target
            )));
        }

        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t.name == name) {
            return Err(SemverError::repository(format!(
                "tag '{}' already exists",
                name
            )));
        }

        tags.push(TagRef {
            name: name.to_string(),
            target: Some(target),
            annotated: true,
        });
        Ok(())
    }
}
