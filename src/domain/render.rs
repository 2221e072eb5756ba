/*
Conversion into termtree::Tree for display.

Kept as a trait so callers can render either a whole tree or a single
subtree node the same way.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{SkillData, SkillNode, SkillTree};

pub trait SkillTreeConvert {
    /// Render with `[x]`/`[ ]` unlock markers, labelled by `label_field`.
    fn to_tree_string(&self, label_field: &str) -> Tree<String>;
}

fn marker(skill: &SkillData, label_field: &str) -> String {
    let mark = if skill.is_unlocked { "[x]" } else { "[ ]" };
    format!("{} {}", mark, skill.label(label_field))
}

impl SkillTreeConvert for SkillTree {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self, label_field: &str) -> Tree<String> {
        let leaves: Vec<_> = self
            .next_skills
            .iter()
            .map(|c| c.to_tree_string(label_field))
            .collect();

        Tree::new(marker(&self.skill, label_field)).with_leaves(leaves)
    }
}

impl SkillTreeConvert for SkillNode {
    fn to_tree_string(&self, label_field: &str) -> Tree<String> {
        match self {
            SkillNode::Branch(tree) => tree.to_tree_string(label_field),
            SkillNode::Leaf(data) => Tree::new(marker(data, label_field)),
        }
    }
}
