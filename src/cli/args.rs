//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::{Criterion, SkillPath};

/// Skill tree unlock engine: unlock by path or key, list what can be unlocked next
#[derive(Parser, Debug)]
#[command(name = "skilltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "SKILLTREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw the tree with unlock markers
    Show {
        /// Skill tree JSON file (default: default_tree from config)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
    },

    /// List skills that can be unlocked next
    Eligible {
        /// Skill tree JSON file (default: default_tree from config)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unlock (or lock) skills and print the resulting tree
    ///
    /// Path operations run first, then key operations, each in the given order.
    /// The tree file is not modified.
    Unlock {
        /// Skill tree JSON file (default: default_tree from config)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
        /// Path of a skill, e.g. 0.1.0
        #[arg(short, long = "path", value_name = "PATH")]
        paths: Vec<SkillPath>,
        /// Field match, e.g. name=Fireball
        #[arg(short, long = "key", value_name = "KEY=VALUE")]
        keys: Vec<Criterion>,
        /// Lock instead of unlock
        #[arg(long)]
        lock: bool,
        /// Do not search below locked branches
        #[arg(long)]
        skip_locked: bool,
        /// Print the resulting tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config template
    Template,
    /// Print the global config file location
    Path,
}
