//! Path navigation: descend an explicit index path and flip one flag

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::ROOT_MARKER;
use crate::domain::{SkillData, SkillNode, SkillTree, UnlockEngine};

/// Split off the leading root marker.
fn strip_root(path: &[usize]) -> DomainResult<&[usize]> {
    match path.split_first() {
        Some((&ROOT_MARKER, rest)) => Ok(rest),
        _ => Err(DomainError::InvalidPath { path: path.into() }),
    }
}

impl SkillTree {
    /// Validate `path` against the tree and return the child indices below the root.
    ///
    /// Fails on a missing root marker, an index past the end of a `nextSkills`
    /// list, or indices left after a leaf. Every index in the returned route
    /// is in bounds and only the last one may name a leaf.
    fn route<'p>(&self, path: &'p [usize]) -> DomainResult<&'p [usize]> {
        let rest = strip_root(path)?;
        let mut current = self;
        for (depth, &index) in rest.iter().enumerate() {
            let len = current.next_skills.len();
            trace!(depth, index, len, "descend");
            match current.next_skills.get(index) {
                None => {
                    return Err(DomainError::PathOutOfBounds {
                        path: path.into(),
                        depth: depth + 1,
                        index,
                        len,
                    })
                }
                Some(SkillNode::Leaf(_)) if depth + 1 < rest.len() => {
                    return Err(DomainError::PathTooLong {
                        path: path.into(),
                        depth: depth + 1,
                    })
                }
                Some(SkillNode::Leaf(_)) => break,
                Some(SkillNode::Branch(branch)) => current = branch,
            }
        }
        Ok(rest)
    }

    /// Skill at `path`, where `path[0]` is the root marker.
    ///
    /// `[0]` is the root's own skill.
    pub fn get(&self, path: &[usize]) -> DomainResult<&SkillData> {
        let route = self.route(path)?;
        let mut current = self;
        for &index in route {
            match &current.next_skills[index] {
                SkillNode::Leaf(data) => return Ok(data),
                SkillNode::Branch(branch) => current = branch,
            }
        }
        Ok(&current.skill)
    }

    /// Mutable counterpart of [`SkillTree::get`]. The whole path is validated
    /// before the reference is handed out, so a failed lookup never touches the tree.
    pub fn get_mut(&mut self, path: &[usize]) -> DomainResult<&mut SkillData> {
        let route = self.route(path)?;
        let mut current = self;
        for &index in route {
            match &mut current.next_skills[index] {
                SkillNode::Leaf(data) => return Ok(data),
                SkillNode::Branch(branch) => current = branch,
            }
        }
        Ok(&mut current.skill)
    }
}

impl UnlockEngine<'_> {
    /// Set the unlock flag of the node at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn set_unlocked_by_path(&mut self, path: &[usize], value: bool) -> DomainResult<()> {
        let skill = self.tree.get_mut(path)?;
        skill.is_unlocked = value;
        debug!("set isUnlocked={} at {:?}", value, path);
        Ok(())
    }

    /// Read back the skill at `path`.
    pub fn skill_at(&self, path: &[usize]) -> DomainResult<&SkillData> {
        self.tree.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::sample_tree;
    use rstest::rstest;

    #[rstest]
    #[case(vec![])]
    #[case(vec![3])]
    #[case(vec![0, 2])]
    #[case(vec![0, 0, 2])]
    #[case(vec![0, 1, 0])]
    #[case(vec![0, 0, 1, 0])]
    fn given_invalid_path_when_reading_and_writing_then_same_error(#[case] path: Vec<usize>) {
        let mut tree = sample_tree();

        let read = tree.get(&path).map(|_| ()).unwrap_err();
        let write = tree.get_mut(&path).map(|_| ()).unwrap_err();

        assert_eq!(read, write);
    }

    #[rstest]
    #[case(vec![0], "root")]
    #[case(vec![0, 0], "A")]
    #[case(vec![0, 0, 1], "A2")]
    #[case(vec![0, 1], "B")]
    fn given_valid_path_when_reading_and_writing_then_same_skill(
        #[case] path: Vec<usize>,
        #[case] expected: &str,
    ) {
        let mut tree = sample_tree();

        assert_eq!(tree.get(&path).unwrap().label("name"), expected);
        assert_eq!(tree.get_mut(&path).unwrap().label("name"), expected);
    }
}
