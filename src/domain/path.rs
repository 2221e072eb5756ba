//! Root-relative index paths

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Index of the root marker every path starts with.
pub const ROOT_MARKER: usize = 0;

/// Route from the root to a node: the root marker followed by one child index per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillPath(Vec<usize>);

impl SkillPath {
    /// Path of the root skill: `[0]`.
    pub fn root() -> Self {
        Self(vec![ROOT_MARKER])
    }

    /// Path of the `index`-th child of the node at `self`.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Render with a custom separator, e.g. `0/1/2`.
    pub fn join(&self, separator: &str) -> String {
        self.0.iter().join(separator)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SkillPath {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<usize>> for SkillPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for SkillPath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for SkillPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.join("."))
    }
}

impl FromStr for SkillPath {
    type Err = DomainError;

    /// Parses `0.1.2`, `0/1/2` or `0,1,2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        if trimmed.trim().is_empty() {
            return Err(DomainError::MalformedPath(s.to_string()));
        }
        trimmed
            .split(['.', '/', ','])
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| DomainError::MalformedPath(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
