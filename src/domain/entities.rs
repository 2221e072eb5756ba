//! Domain entities: skill payloads and the tree that gates them

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::SkillPath;

/// Field name under which the unlock flag is (de)serialized.
pub const UNLOCKED_FIELD: &str = "isUnlocked";

/// Terminal payload of a skill: caller-defined fields plus the unlock flag.
///
/// Identity is structural; callers that need an id put one into `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(rename = "isUnlocked")]
    pub is_unlocked: bool,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl SkillData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a caller-defined field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn unlocked(mut self, is_unlocked: bool) -> Self {
        self.is_unlocked = is_unlocked;
        self
    }

    /// Field value by name. The unlock flag is visible as a boolean field.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == UNLOCKED_FIELD {
            Some(Value::Bool(self.is_unlocked))
        } else {
            self.fields.get(key).cloned()
        }
    }

    /// True if the field `key` exists and equals `value`.
    ///
    /// Numbers compare by numeric value, so `1` matches `1.0`; other values
    /// must be equal JSON values of the same type.
    pub fn matches(&self, key: &str, value: &Value) -> bool {
        self.get(key).is_some_and(|v| values_equal(&v, value))
    }

    /// Display label: the string (or scalar) under `field`, else all fields.
    pub fn label(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => self.to_string(),
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

impl fmt::Display for SkillData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// A branch: its own skill gating an ordered list of children.
///
/// The root of every tree is a branch. Keys of a branch object other than
/// `skill` and `nextSkills` are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTree {
    pub skill: SkillData,
    #[serde(rename = "nextSkills")]
    pub next_skills: Vec<SkillNode>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Child of a branch.
///
/// On the wire a branch is recognised by its `skill`/`nextSkills` keys;
/// every other object is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillNode {
    Branch(SkillTree),
    Leaf(SkillData),
}

impl SkillNode {
    pub fn skill(&self) -> &SkillData {
        match self {
            SkillNode::Branch(tree) => &tree.skill,
            SkillNode::Leaf(data) => data,
        }
    }

    pub fn skill_mut(&mut self) -> &mut SkillData {
        match self {
            SkillNode::Branch(tree) => &mut tree.skill,
            SkillNode::Leaf(data) => data,
        }
    }

    /// Children of a branch; leaves have none.
    pub fn children(&self) -> &[SkillNode] {
        match self {
            SkillNode::Branch(tree) => &tree.next_skills,
            SkillNode::Leaf(_) => &[],
        }
    }

    /// Skill and children borrowed disjointly.
    pub fn parts(&self) -> (&SkillData, &[SkillNode]) {
        match self {
            SkillNode::Branch(tree) => tree.parts(),
            SkillNode::Leaf(data) => (data, &[]),
        }
    }

    pub fn parts_mut(&mut self) -> (&mut SkillData, &mut [SkillNode]) {
        match self {
            SkillNode::Branch(tree) => tree.parts_mut(),
            SkillNode::Leaf(data) => (data, Default::default()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SkillNode::Leaf(_))
    }
}

impl From<SkillTree> for SkillNode {
    fn from(tree: SkillTree) -> Self {
        SkillNode::Branch(tree)
    }
}

impl From<SkillData> for SkillNode {
    fn from(data: SkillData) -> Self {
        SkillNode::Leaf(data)
    }
}

impl SkillTree {
    pub fn new(skill: SkillData) -> Self {
        Self {
            skill,
            next_skills: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_branch(mut self, branch: SkillTree) -> Self {
        self.next_skills.push(SkillNode::Branch(branch));
        self
    }

    pub fn with_leaf(mut self, leaf: SkillData) -> Self {
        self.next_skills.push(SkillNode::Leaf(leaf));
        self
    }

    pub fn parts(&self) -> (&SkillData, &[SkillNode]) {
        (&self.skill, &self.next_skills)
    }

    pub fn parts_mut(&mut self) -> (&mut SkillData, &mut [SkillNode]) {
        (&mut self.skill, &mut self.next_skills)
    }

    /// Number of levels, the root alone counting as one.
    pub fn depth(&self) -> usize {
        1 + self
            .next_skills
            .iter()
            .map(|child| match child {
                SkillNode::Branch(tree) => tree.depth(),
                SkillNode::Leaf(_) => 1,
            })
            .max()
            .unwrap_or(0)
    }

    /// Total number of skills, root included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a tree has at least its root skill.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pre-order walk yielding every skill with its path.
    pub fn iter(&self) -> SkillIter<'_> {
        SkillIter::new(self)
    }
}

/// Pre-order iterator over `(path, skill)` pairs.
pub struct SkillIter<'a> {
    stack: Vec<(&'a SkillData, &'a [SkillNode], SkillPath)>,
}

impl<'a> SkillIter<'a> {
    fn new(tree: &'a SkillTree) -> Self {
        Self {
            stack: vec![(&tree.skill, tree.next_skills.as_slice(), SkillPath::root())],
        }
    }
}

impl<'a> Iterator for SkillIter<'a> {
    type Item = (SkillPath, &'a SkillData);

    fn next(&mut self) -> Option<Self::Item> {
        let (skill, children, path) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for (index, child) in children.iter().enumerate().rev() {
            let (child_skill, grandchildren) = child.parts();
            self.stack.push((child_skill, grandchildren, path.child(index)));
        }
        Some((path, skill))
    }
}
