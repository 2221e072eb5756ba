//! Skill tree service
//!
//! Loads skill trees from JSON files, applies batches of unlock operations
//! through the domain engine and prepares results for display.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    Candidate, Criterion, SearchMode, SkillData, SkillPath, SkillTree, SkillTreeConvert, UnlockEngine,
};
use crate::infrastructure::traits::FileSystem;

/// One mutation of an unlock flag.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockOp {
    /// Set the flag of the skill at an explicit path.
    Path { path: SkillPath, value: bool },
    /// Set the flag of the first skill (breadth-first) matching a criterion.
    Key { criterion: Criterion, value: bool },
}

/// Service for loading skill trees and running the unlock engine on them.
pub struct SkillTreeService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl SkillTreeService {
    /// Create a new skill tree service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// The tree file to operate on: the explicit one, else `default_tree` from settings.
    pub fn resolve_tree_path(&self, explicit: Option<&Path>) -> ApplicationResult<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.settings.default_tree.clone())
            .ok_or(ApplicationError::NoTree)
    }

    /// Load a skill tree from a JSON file.
    ///
    /// serde_json limits nesting to 128 levels, which allows trees about 64
    /// branches deep (each branch nests an object and an array); deeper files
    /// fail with a `TreeFormat` error.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<SkillTree> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::TreeNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::TreeFormat {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read skill tree", path)?;
        let tree: SkillTree =
            serde_json::from_str(&content).map_err(|e| ApplicationError::TreeFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!("loaded {} skills from {}", tree.len(), path.display());
        Ok(tree)
    }

    /// Apply operations in order with the configured search mode.
    pub fn apply(&self, tree: &mut SkillTree, ops: &[UnlockOp]) -> ApplicationResult<Vec<SkillPath>> {
        self.apply_with(tree, ops, self.search_mode())
    }

    /// Apply operations in order and return the path each one touched.
    ///
    /// Stops at the first failing operation; operations before it stay applied.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn apply_with(
        &self,
        tree: &mut SkillTree,
        ops: &[UnlockOp],
        search_mode: SearchMode,
    ) -> ApplicationResult<Vec<SkillPath>> {
        let mut engine = UnlockEngine::new(tree).with_search_mode(search_mode);
        let mut touched = Vec::with_capacity(ops.len());
        for op in ops {
            let path = match op {
                UnlockOp::Path { path, value } => {
                    engine.set_unlocked_by_path(path, *value)?;
                    path.clone()
                }
                UnlockOp::Key { criterion, value } => {
                    engine.set_unlocked_matching(criterion, *value)?
                }
            };
            touched.push(path);
        }
        Ok(touched)
    }

    /// Skills that can be unlocked next.
    pub fn eligible(&self, tree: &SkillTree) -> Vec<Candidate> {
        tree.possible_to_unlock()
    }

    /// Search mode from settings.
    pub fn search_mode(&self) -> SearchMode {
        SearchMode::from(self.settings.search.skip_locked)
    }

    /// Tree drawing with unlock markers.
    pub fn render(&self, tree: &SkillTree) -> String {
        tree.to_tree_string(&self.settings.display.label_field)
            .to_string()
    }

    /// Display label of a skill.
    pub fn label(&self, skill: &SkillData) -> String {
        skill.label(&self.settings.display.label_field)
    }

    /// Path joined with the configured separator, e.g. `0.1`.
    pub fn format_path(&self, path: &SkillPath) -> String {
        path.join(&self.settings.display.path_separator)
    }

    /// Path and label of a candidate, e.g. `0.1  Fireball`.
    pub fn describe(&self, candidate: &Candidate) -> String {
        format!(
            "{}  {}",
            self.format_path(&candidate.path),
            self.label(&candidate.skill)
        )
    }

    /// Pretty JSON for trees and candidate lists.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> ApplicationResult<String> {
        serde_json::to_string_pretty(value).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize to JSON".to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use crate::util::testing::sample_tree;

    fn service() -> SkillTreeService {
        SkillTreeService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
    }

    #[test]
    fn given_path_and_key_ops_when_applying_then_returns_touched_paths() {
        let mut tree = sample_tree();
        let ops = vec![
            UnlockOp::Path {
                path: SkillPath::root(),
                value: true,
            },
            UnlockOp::Key {
                criterion: Criterion::new("name", "B"),
                value: true,
            },
        ];

        let touched = service().apply(&mut tree, &ops).unwrap();

        assert_eq!(touched, vec![SkillPath::root(), SkillPath::from(vec![0, 1])]);
        assert!(tree.skill.is_unlocked);
        assert!(tree.get(&[0, 1]).unwrap().is_unlocked);
    }

    #[test]
    fn given_failing_op_when_applying_then_keeps_earlier_ops() {
        let mut tree = sample_tree();
        let ops = vec![
            UnlockOp::Path {
                path: SkillPath::root(),
                value: true,
            },
            UnlockOp::Path {
                path: SkillPath::from(vec![0, 9]),
                value: true,
            },
        ];

        let result = service().apply(&mut tree, &ops);

        assert!(matches!(result, Err(ApplicationError::Domain(_))));
        assert!(tree.skill.is_unlocked);
    }

    #[test]
    fn given_no_tree_and_no_default_when_resolving_then_fails() {
        assert!(matches!(
            service().resolve_tree_path(None),
            Err(ApplicationError::NoTree)
        ));
    }

    #[test]
    fn given_custom_separator_when_formatting_path_then_joins_with_it() {
        let mut settings = Settings::default();
        settings.display.path_separator = "/".into();
        let svc = SkillTreeService::new(Arc::new(RealFileSystem), Arc::new(settings));

        assert_eq!(svc.format_path(&SkillPath::from(vec![0, 1, 2])), "0/1/2");
        assert_eq!(service().format_path(&SkillPath::root()), "0");
    }

    #[test]
    fn given_candidate_when_describing_then_uses_separator_and_label() {
        let mut tree = sample_tree();
        tree.skill.is_unlocked = true;
        let svc = service();
        let lines: Vec<String> = svc.eligible(&tree).iter().map(|c| svc.describe(c)).collect();
        assert_eq!(lines, vec!["0.0  A".to_string(), "0.1  B".to_string()]);
    }
}
