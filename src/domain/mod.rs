//! Domain layer: skill tree entities and the unlock engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod criterion;
pub mod engine;
pub mod entities;
pub mod error;
pub mod path;
pub mod render;
mod tree_path;
mod tree_queue;
mod tree_stack;

pub use criterion::Criterion;
pub use engine::{Candidate, SearchMode, UnlockEngine};
pub use entities::{SkillData, SkillIter, SkillNode, SkillTree, UNLOCKED_FIELD};
pub use error::{DomainError, DomainResult};
pub use path::SkillPath;
pub use render::SkillTreeConvert;
