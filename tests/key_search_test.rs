//! Tests for unlocking by key/value match (breadth-first, first match wins)

use rstest::rstest;
use serde_json::json;

use skilltree::domain::{
    Criterion, DomainError, SearchMode, SkillData, SkillPath, SkillTree, UnlockEngine,
};
use skilltree::util::testing::{init_test_setup, named, sample_tree};

#[rstest]
#[case("root", vec![0])]
#[case("A", vec![0, 0])]
#[case("B", vec![0, 1])]
#[case("A2", vec![0, 0, 1])]
fn given_name_when_unlocking_by_key_then_sets_matching_skill(
    #[case] name: &str,
    #[case] expected: Vec<usize>,
) {
    init_test_setup();
    let mut tree = sample_tree();

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_by_key(&json!({ "name": name }))
        .unwrap();

    assert_eq!(path, SkillPath::from(expected.clone()));
    assert!(tree.get(&expected).unwrap().is_unlocked);
    assert_eq!(tree.iter().filter(|(_, s)| s.is_unlocked).count(), 1);
}

#[test]
fn given_duplicate_names_when_unlocking_by_key_then_shallower_match_wins() {
    // root -> [branch X -> [leaf "dup"], leaf "dup"]
    let mut tree = SkillTree::new(named("root"))
        .with_branch(SkillTree::new(named("X")).with_leaf(named("dup").with("depth", 2)))
        .with_leaf(named("dup").with("depth", 1));

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_by_key(&json!({"name": "dup"}))
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 1]));
    assert!(tree.get(&[0, 1]).unwrap().is_unlocked);
    assert!(!tree.get(&[0, 0, 0]).unwrap().is_unlocked);
}

#[test]
fn given_duplicate_siblings_when_unlocking_by_key_then_first_sibling_wins() {
    let mut tree = SkillTree::new(named("root"))
        .with_leaf(SkillData::new().with("tier", 1).with("slot", "left"))
        .with_leaf(SkillData::new().with("tier", 1).with("slot", "right"));

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_by_key(&json!({"tier": 1}))
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 0]));
    assert!(!tree.get(&[0, 1]).unwrap().is_unlocked);
}

#[test]
fn given_already_unlocked_match_when_unlocking_again_then_is_idempotent() {
    let mut tree = sample_tree();
    let mut engine = UnlockEngine::new(&mut tree);

    let first = engine.set_unlocked_by_key(&json!({"name": "A"})).unwrap();
    let second = engine.set_unlocked_by_key(&json!({"name": "A"})).unwrap();

    assert_eq!(first, second);
    assert!(engine.skill_at(&first).unwrap().is_unlocked);
}

#[test]
fn given_unknown_value_when_unlocking_by_key_then_returns_not_found_and_leaves_tree() {
    let mut tree = sample_tree();
    let before = tree.clone();

    let result = UnlockEngine::new(&mut tree).set_unlocked_by_key(&json!({"name": "X"}));

    assert_eq!(
        result,
        Err(DomainError::NotFound {
            key: "name".to_string(),
            value: "\"X\"".to_string(),
        })
    );
    assert_eq!(tree, before);
}

#[test]
fn given_value_of_other_type_when_unlocking_by_key_then_does_not_match() {
    let mut tree = SkillTree::new(named("root")).with_leaf(named("L").with("level", 3));

    let result = UnlockEngine::new(&mut tree).set_unlocked_by_key(&json!({"level": "3"}));

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[rstest]
#[case(json!(1), json!({"level": 1.0}))]
#[case(json!(1.0), json!({"level": 1}))]
#[case(json!(2.5), json!({"level": 2.5}))]
fn given_same_number_in_other_form_when_unlocking_by_key_then_matches(
    #[case] stored: serde_json::Value,
    #[case] find: serde_json::Value,
) {
    let mut tree = SkillTree::new(named("root")).with_leaf(named("L").with("level", stored));

    let path = UnlockEngine::new(&mut tree).set_unlocked_by_key(&find).unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 0]));
    assert!(tree.get(&[0, 0]).unwrap().is_unlocked);
}

#[rstest]
#[case(json!({"name": "A", "tier": 1}), 2)]
#[case(json!({}), 0)]
fn given_wrong_number_of_keys_when_unlocking_by_key_then_returns_multiple_keys(
    #[case] find: serde_json::Value,
    #[case] found: usize,
) {
    let mut tree = sample_tree();
    let before = tree.clone();

    let result = UnlockEngine::new(&mut tree).set_unlocked_by_key(&find);

    assert_eq!(result, Err(DomainError::MultipleKeys { found }));
    assert_eq!(tree, before);
}

#[test]
fn given_criterion_with_false_when_matching_then_locks_skill() {
    let mut tree = sample_tree();
    tree.get_mut(&[0, 1]).unwrap().is_unlocked = true;

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_matching(&Criterion::new("name", "B"), false)
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 1]));
    assert!(!tree.get(&[0, 1]).unwrap().is_unlocked);
}

#[test]
fn given_unlock_flag_as_key_when_searching_then_matches_first_locked_skill() {
    let mut tree = sample_tree();
    tree.skill.is_unlocked = true;

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_by_key(&json!({"isUnlocked": false}))
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 0]));
}

// ============================================================
// Skip locked branches
// ============================================================

#[test]
fn given_locked_branch_and_skip_mode_when_searching_below_then_not_found() {
    let mut tree = sample_tree();
    tree.skill.is_unlocked = true;

    let result = UnlockEngine::new(&mut tree)
        .with_search_mode(SearchMode::SkipLockedBranches)
        .set_unlocked_by_key(&json!({"name": "A1"}));

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert!(!tree.get(&[0, 0, 0]).unwrap().is_unlocked);
}

#[test]
fn given_locked_branch_and_skip_mode_when_searching_branch_itself_then_found() {
    let mut tree = sample_tree();
    tree.skill.is_unlocked = true;

    let path = UnlockEngine::new(&mut tree)
        .with_search_mode(SearchMode::SkipLockedBranches)
        .set_unlocked_by_key(&json!({"name": "A"}))
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 0]));
}

#[test]
fn given_locked_branch_and_default_mode_when_searching_below_then_found() {
    let mut tree = sample_tree();

    let path = UnlockEngine::new(&mut tree)
        .set_unlocked_by_key(&json!({"name": "A1"}))
        .unwrap();

    assert_eq!(path, SkillPath::from(vec![0, 0, 0]));
}
