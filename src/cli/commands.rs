//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{SkillTreeService, UnlockOp};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Candidate, Criterion, SearchMode, SkillPath};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::Usage("no command given, see --help".into()))?;

    if let Commands::Completion { shell } = command {
        clap_complete::generate(*shell, &mut Cli::command(), "skilltree", &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    let service = container.skill_tree_service();

    match command {
        Commands::Show { tree } => cmd_show(&service, tree.as_deref()),
        Commands::Eligible { tree, json } => cmd_eligible(&service, tree.as_deref(), *json),
        Commands::Unlock {
            tree,
            paths,
            keys,
            lock,
            skip_locked,
            json,
        } => cmd_unlock(
            &service,
            tree.as_deref(),
            paths,
            keys,
            !*lock,
            *skip_locked,
            *json,
        ),
        Commands::Config { command } => cmd_config(&container.settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip(service))]
fn cmd_show(service: &SkillTreeService, tree: Option<&Path>) -> CliResult<()> {
    let path = service.resolve_tree_path(tree)?;
    let tree = service.load(&path)?;
    output::info(service.render(&tree).trim_end());
    Ok(())
}

#[instrument(level = "debug", skip(service))]
fn cmd_eligible(service: &SkillTreeService, tree: Option<&Path>, json: bool) -> CliResult<()> {
    let path = service.resolve_tree_path(tree)?;
    let tree = service.load(&path)?;
    let candidates = service.eligible(&tree);

    if json {
        output::info(&service.to_json(&candidates)?);
        return Ok(());
    }
    print_candidates(service, &candidates);
    Ok(())
}

fn print_candidates(service: &SkillTreeService, candidates: &[Candidate]) {
    if candidates.is_empty() {
        output::success("nothing left to unlock");
        return;
    }
    output::header("Eligible skills:");
    for candidate in candidates {
        output::detail(&service.describe(candidate));
    }
}

#[instrument(level = "debug", skip(service))]
fn cmd_unlock(
    service: &SkillTreeService,
    tree: Option<&Path>,
    paths: &[SkillPath],
    keys: &[Criterion],
    value: bool,
    skip_locked: bool,
    json: bool,
) -> CliResult<()> {
    if paths.is_empty() && keys.is_empty() {
        return Err(CliError::InvalidArgs(
            "give at least one --path or --key".into(),
        ));
    }

    let file = service.resolve_tree_path(tree)?;
    let mut tree = service.load(&file)?;

    let ops: Vec<UnlockOp> = paths
        .iter()
        .map(|path| UnlockOp::Path {
            path: path.clone(),
            value,
        })
        .chain(keys.iter().map(|criterion| UnlockOp::Key {
            criterion: criterion.clone(),
            value,
        }))
        .collect();

    let search_mode = if skip_locked {
        SearchMode::SkipLockedBranches
    } else {
        service.search_mode()
    };
    let touched = service.apply_with(&mut tree, &ops, search_mode)?;

    if json {
        output::info(&service.to_json(&tree)?);
        return Ok(());
    }

    let verb = if value { "unlocked" } else { "locked" };
    for path in &touched {
        let label = tree
            .get(path)
            .map(|skill| service.label(skill))
            .unwrap_or_default();
        output::success(&format!("{verb} {} {label}", service.format_path(path)));
    }
    output::info(service.render(&tree).trim_end());

    print_candidates(service, &service.eligible(&tree));
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config unavailable"),
        },
    }
    Ok(())
}
