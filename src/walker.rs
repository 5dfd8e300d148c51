//! History walker: nearest version tag by graph distance and the commits since it

use crate::domain::{CommitRef, TagCandidate};
use crate::error::{Result, SemverError};
use crate::git::Repository;
use git2::Oid;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Outcome of walking back from a starting commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkResult {
    /// Nearest qualifying tag, `None` when history holds no version tag
    pub tag: Option<TagCandidate>,
    /// Commits reachable from the start but not from the tag, children before parents
    pub commits: Vec<CommitRef>,
}

impl WalkResult {
    /// Number of commits between the tag and the start
    pub fn distance(&self) -> usize {
        self.commits.len()
    }
}

/// Reverse breadth-first walker over a repository's commit graph.
///
/// Commits are loaded at most once per walk; nothing is kept between walks.
pub struct HistoryWalker<'r, R: Repository + ?Sized> {
    repo: &'r R,
    loaded: HashMap<Oid, CommitRef>,
}

impl<'r, R: Repository + ?Sized> HistoryWalker<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        HistoryWalker {
            repo,
            loaded: HashMap::new(),
        }
    }

    /// Find the tag nearest to `start` and the commits made since it.
    ///
    /// The first qualifying commit met in breadth-first order wins; several tags on
    /// that commit are resolved by [`TagCandidate::rank`]. The returned commits are
    /// every ancestor of `start` (inclusive) that is not an ancestor of the tagged
    /// commit (inclusive), each exactly once.
    ///
    /// # Errors
    /// Fails with `RepositoryAccess` when a commit on the walk cannot be read.
    pub fn nearest_tag(mut self, start: Oid, candidates: &[TagCandidate]) -> Result<WalkResult> {
        let tags_by_commit = best_tag_per_commit(candidates);

        let tag = self.find_nearest(start, &tags_by_commit)?;

        let excluded = match &tag {
            Some(tag) => self.ancestry(tag.target, &HashSet::new())?,
            None => HashSet::new(),
        };
        let members = self.ancestry(start, &excluded)?;
        let commits = self.topological_order(start, &members)?;

        debug!(
            start = %start,
            tag = tag.as_ref().map(|t| t.name.as_str()).unwrap_or("<none>"),
            distance = commits.len(),
            "walked history"
        );

        Ok(WalkResult { tag, commits })
    }

    fn find_nearest(
        &mut self,
        start: Oid,
        tags_by_commit: &HashMap<Oid, &TagCandidate>,
    ) -> Result<Option<TagCandidate>> {
        let mut queue = VecDeque::from([start]);
        let mut seen = HashSet::from([start]);

        while let Some(id) = queue.pop_front() {
            if let Some(tag) = tags_by_commit.get(&id) {
                return Ok(Some((*tag).clone()));
            }

            for parent in self.parents_of(id)? {
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(None)
    }

    /// Every commit reachable from `from` (inclusive) without entering `stop`.
    fn ancestry(&mut self, from: Oid, stop: &HashSet<Oid>) -> Result<HashSet<Oid>> {
        let mut reached = HashSet::new();
        if stop.contains(&from) {
            return Ok(reached);
        }

        let mut queue = VecDeque::from([from]);
        reached.insert(from);

        while let Some(id) = queue.pop_front() {
            for parent in self.parents_of(id)? {
                if !stop.contains(&parent) && reached.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(reached)
    }

    /// Order `members` so each commit precedes its parents, breaking ties by
    /// discovery order from `start` (first parent first).
    fn topological_order(&mut self, start: Oid, members: &HashSet<Oid>) -> Result<Vec<CommitRef>> {
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut pending_children: HashMap<Oid, usize> = HashMap::new();
        for id in members {
            for parent in self.parents_of(*id)? {
                if members.contains(&parent) {
                    *pending_children.entry(parent).or_default() += 1;
                }
            }
        }

        let mut ordered = Vec::with_capacity(members.len());
        let mut ready = VecDeque::from([start]);

        while let Some(id) = ready.pop_front() {
            let commit = self
                .loaded
                .remove(&id)
                .ok_or_else(|| SemverError::repository(format!("commit {} was not loaded", id)))?;

            for parent in &commit.parents {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(*parent);
                    }
                }
            }

            ordered.push(commit);
        }

        Ok(ordered)
    }

    fn parents_of(&mut self, id: Oid) -> Result<Vec<Oid>> {
        if let Some(commit) = self.loaded.get(&id) {
            return Ok(commit.parents.clone());
        }

        let commit = self.repo.commit(id)?;
        let parents = commit.parents.clone();
        self.loaded.insert(id, commit);
        Ok(parents)
    }
}

/// Index candidates by commit, keeping the best-ranked tag where several share one.
fn best_tag_per_commit(candidates: &[TagCandidate]) -> HashMap<Oid, &TagCandidate> {
    let mut best: HashMap<Oid, &TagCandidate> = HashMap::new();

    for candidate in candidates {
        best.entry(candidate.target)
            .and_modify(|current| {
                if candidate.rank(current).is_gt() {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    best
}

/// Convenience wrapper: walk `repo` from `start` against `candidates`.
pub fn nearest_tag<R: Repository + ?Sized>(
    repo: &R,
    start: Oid,
    candidates: &[TagCandidate],
) -> Result<WalkResult> {
    HistoryWalker::new(repo).nearest_tag(start, candidates)
}
