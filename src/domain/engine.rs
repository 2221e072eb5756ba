//! Unlock engine over a caller-owned skill tree
//!
//! The engine borrows the tree mutably for its whole lifetime and never creates,
//! removes or reorders nodes; it only flips `is_unlocked` flags.
//! The three traversals live next to this file:
//! - `tree_path`: descend an explicit index path
//! - `tree_queue`: breadth-first key search
//! - `tree_stack`: eligibility scan with an explicit stack

use serde::{Deserialize, Serialize};

use crate::domain::{SkillData, SkillPath, SkillTree};

/// Which branches the key search descends into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Enqueue children of every branch.
    #[default]
    All,
    /// Do not enqueue children of a locked branch.
    SkipLockedBranches,
}

impl From<bool> for SearchMode {
    fn from(skip_locked: bool) -> Self {
        if skip_locked {
            SearchMode::SkipLockedBranches
        } else {
            SearchMode::All
        }
    }
}

/// A locked skill whose whole ancestor chain is unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub skill: SkillData,
    pub path: SkillPath,
}

#[derive(Debug)]
pub struct UnlockEngine<'a> {
    pub(crate) tree: &'a mut SkillTree,
    pub(crate) search_mode: SearchMode,
}

impl<'a> UnlockEngine<'a> {
    pub fn new(tree: &'a mut SkillTree) -> Self {
        Self {
            tree,
            search_mode: SearchMode::default(),
        }
    }

    pub fn with_search_mode(mut self, search_mode: SearchMode) -> Self {
        self.search_mode = search_mode;
        self
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    pub fn tree(&self) -> &SkillTree {
        self.tree
    }
}
