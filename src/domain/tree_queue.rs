//! Key search: breadth-first search for the first skill matching a criterion
//!
//! Queue entries carry the skill, its children and its path. A match
//! flips the flag and stops; shallower matches win, siblings in order.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{Criterion, SearchMode, SkillData, SkillNode, SkillPath, UnlockEngine};

impl UnlockEngine<'_> {
    /// Unlock the first skill (breadth-first) whose data contains `find`.
    ///
    /// `find` must be a JSON object with exactly one pair, e.g. `{"name": "A"}`.
    /// Already unlocked skills still match, so repeating a call is idempotent.
    /// Returns the path of the skill that was set.
    pub fn set_unlocked_by_key(&mut self, find: &Value) -> DomainResult<SkillPath> {
        let criterion = Criterion::from_object(find)?;
        self.set_unlocked_matching(&criterion, true)
    }

    /// Set the flag of the first skill (breadth-first) matching `criterion` to `value`.
    #[instrument(level = "debug", skip(self, criterion), fields(criterion = %criterion))]
    pub fn set_unlocked_matching(
        &mut self,
        criterion: &Criterion,
        value: bool,
    ) -> DomainResult<SkillPath> {
        let skip_locked = self.search_mode == SearchMode::SkipLockedBranches;
        let (root_skill, root_children) = self.tree.parts_mut();

        let mut queue: VecDeque<(&mut SkillData, &mut [SkillNode], SkillPath)> = VecDeque::new();
        queue.push_back((root_skill, root_children, SkillPath::root()));

        while let Some((skill, children, path)) = queue.pop_front() {
            trace!("visit {}", path);
            if skill.matches(&criterion.key, &criterion.value) {
                skill.is_unlocked = value;
                debug!("set isUnlocked={} at {}", value, path);
                return Ok(path);
            }
            if skip_locked && !skill.is_unlocked {
                continue;
            }
            for (index, child) in children.iter_mut().enumerate() {
                let (child_skill, grandchildren) = child.parts_mut();
                queue.push_back((child_skill, grandchildren, path.child(index)));
            }
        }

        Err(DomainError::NotFound {
            key: criterion.key.clone(),
            value: criterion.value.to_string(),
        })
    }
}
