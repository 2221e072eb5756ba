use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{SkillData, SkillTree};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Skill with a `name` field, locked.
pub fn named(name: &str) -> SkillData {
    SkillData::new().with("name", name)
}

// root
// ├── A
// │   ├── A1
// │   └── A2
// └── B
/// Fully locked tree: root -> [branch A -> [A1, A2], leaf B].
pub fn sample_tree() -> SkillTree {
    SkillTree::new(named("root"))
        .with_branch(
            SkillTree::new(named("A"))
                .with_leaf(named("A1"))
                .with_leaf(named("A2")),
        )
        .with_leaf(named("B"))
}

/// JSON rendering of [`sample_tree`] in the on-disk format.
pub const SAMPLE_TREE_JSON: &str = r#"{
  "skill": { "name": "root", "isUnlocked": false },
  "nextSkills": [
    {
      "skill": { "name": "A", "isUnlocked": false },
      "nextSkills": [
        { "name": "A1", "isUnlocked": false },
        { "name": "A2", "isUnlocked": false }
      ]
    },
    { "name": "B", "isUnlocked": false }
  ]
}"#;
