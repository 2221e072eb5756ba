//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/skilltree/skilltree.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `SKILLTREE__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Key search settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Do not search below locked branches
    pub skip_locked: bool,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Skill field used as the display label
    pub label_field: String,
    /// Separator between path indices
    pub path_separator: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            label_field: "name".into(),
            path_separator: ".".into(),
        }
    }
}

/// Unified configuration for skilltree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tree: Option<PathBuf>,
    pub search: SearchSettings,
    pub display: DisplaySettings,
}

/// Get the XDG config directory for skilltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "skilltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("skilltree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
fn expand_env_vars(input: &str) -> String {
    shellexpand::full(input)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given explicitly; must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), local)
    }

    /// Load settings from explicit global and local files, then `SKILLTREE__*` env vars.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("search.skip_locked", defaults.search.skip_locked)
            .map_err(config_err)?
            .set_default("display.label_field", defaults.display.label_field.clone())
            .map_err(config_err)?
            .set_default(
                "display.path_separator",
                defaults.display.path_separator.clone(),
            )
            .map_err(config_err)?;

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(local_path) = local {
            debug!("local config: {}", local_path.display());
            builder = builder.add_source(File::from(local_path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SKILLTREE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(tree) = &self.default_tree {
            self.default_tree = Some(PathBuf::from(expand_env_vars(
                tree.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# skilltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/skilltree/skilltree.toml
#   Local:  file passed with --config
#   Env:    SKILLTREE__* environment variables, e.g. SKILLTREE__SEARCH__SKIP_LOCKED=true

# Tree file used when no tree is given on the command line (~ and $VAR expanded)
# default_tree = "~/skills.json"

[search]
# Do not look for key matches below branches that are still locked
# skip_locked = false

[display]
# Skill field shown as label
# label_field = "name"

# Separator between path indices
# path_separator = "."
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_defaulting_then_uses_name_label_and_dot_separator() {
        let settings = Settings::default();
        assert_eq!(settings.default_tree, None);
        assert!(!settings.search.skip_locked);
        assert_eq!(settings.display.label_field, "name");
        assert_eq!(settings.display.path_separator, ".");
    }

    #[test]
    fn given_tilde_in_default_tree_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            default_tree: Some(PathBuf::from("~/skills.json")),
            ..Settings::default()
        };
        settings.expand_paths();
        let expanded = settings.default_tree.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("skills.json"));
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_default_settings_when_to_toml_then_omits_default_tree() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(!rendered.contains("default_tree"));
        assert!(rendered.contains("[search]"));
        assert!(rendered.contains("skip_locked = false"));
    }
}
