//! Eligibility scan with an explicit stack instead of recursion.
//!
//! A locked skill is reported and its subtree is not entered; an unlocked
//! skill contributes its children. Children are pushed in reverse so they
//! pop left to right, which yields pre-order.

use tracing::{debug, instrument, trace};

use crate::domain::{Candidate, SkillData, SkillNode, SkillPath, SkillTree, UnlockEngine};

impl SkillTree {
    /// Locked skills whose whole ancestor chain is unlocked, in pre-order, with paths.
    ///
    /// Pure: reflects the current flags on every call.
    #[instrument(level = "debug", skip(self))]
    pub fn possible_to_unlock(&self) -> Vec<Candidate> {
        let mut found = Vec::new();
        let mut stack: Vec<(&SkillData, &[SkillNode], SkillPath)> =
            vec![(&self.skill, self.next_skills.as_slice(), SkillPath::root())];

        while let Some((skill, children, path)) = stack.pop() {
            if !skill.is_unlocked {
                trace!("eligible {}", path);
                found.push(Candidate {
                    skill: skill.clone(),
                    path,
                });
                continue;
            }
            for (index, child) in children.iter().enumerate().rev() {
                let (child_skill, grandchildren) = child.parts();
                stack.push((child_skill, grandchildren, path.child(index)));
            }
        }

        debug!("{} skills eligible", found.len());
        found
    }
}

impl UnlockEngine<'_> {
    pub fn possible_to_unlock(&self) -> Vec<Candidate> {
        self.tree.possible_to_unlock()
    }
}
