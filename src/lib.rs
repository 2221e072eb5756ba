//! Skill tree unlock engine.
//!
//! A skill tree gates skills behind their parents: a skill becomes eligible
//! once every ancestor is unlocked. The engine in [`domain`] borrows a
//! caller-owned [`domain::SkillTree`] and
//!
//! - unlocks a skill by an explicit index path ([`domain::UnlockEngine::set_unlocked_by_path`]),
//! - unlocks the first breadth-first match of a key/value pair
//!   ([`domain::UnlockEngine::set_unlocked_by_key`]),
//! - lists every locked skill reachable through unlocked ancestors
//!   ([`domain::UnlockEngine::possible_to_unlock`]).
//!
//! The remaining layers load trees from JSON files, read settings and drive the CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
