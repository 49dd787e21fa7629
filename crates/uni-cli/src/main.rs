use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("uni error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;

    if let cli::Commands::Init(args) = &cli.command {
        return commands::init::handle(args, &flags, config).await;
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;

    let command = cli.command;
    let write_lock = write_lock_holder(&command)
        .map(|holder| write_lock::WriteLock::acquire(&project_root, &holder))
        .transpose()?;

    let ctx = context::AppContext::init(&project_root, config)
        .await
        .context("failed to initialize unison application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("UNISON_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = context::strip_unison_dir(PathBuf::from(path));
        if explicit.join(context::UNISON_DIR).is_dir() {
            return Ok(explicit);
        }
        anyhow::bail!(
            "invalid --project '{}': no {} directory found. Run 'uni init' there first.",
            explicit.display(),
            context::UNISON_DIR
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a unison project (no .unison directory found). Run 'uni init' first.")
}

/// The command line recorded in the write lock, or `None` for read-only commands.
fn write_lock_holder(command: &cli::Commands) -> Option<String> {
    use crate::cli::subcommands::{ProjectCommands, RuleTypeCommands, SchemeCommands};

    match command {
        cli::Commands::Scheme { action } => match action {
            SchemeCommands::Create { name, .. } => Some(format!("scheme create {name}")),
            SchemeCommands::Delete { dry_run: false, .. } => Some("scheme delete".into()),
            SchemeCommands::Delete { .. }
            | SchemeCommands::List { .. }
            | SchemeCommands::Get { .. } => None,
        },
        cli::Commands::Project { action } => match action {
            ProjectCommands::Create { key, .. } => Some(format!("project create {key}")),
            ProjectCommands::Assign { project, .. } => Some(format!("project assign {project}")),
            ProjectCommands::List => None,
        },
        cli::Commands::RuleType { action } => match action {
            RuleTypeCommands::Add { id, .. } => Some(format!("rule-type add {id}")),
            RuleTypeCommands::List { .. } => None,
        },
        cli::Commands::Merge(args) if !args.dry_run => Some(
            args.scope
                .category
                .as_deref()
                .map_or_else(|| "merge".to_string(), |category| format!("merge {category}")),
        ),
        cli::Commands::Merge(_)
        | cli::Commands::Distill(_)
        | cli::Commands::Compare(_)
        | cli::Commands::Audit(_)
        | cli::Commands::Init(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::write_lock_holder;
    use crate::cli::Cli;

    fn holder(args: &[&str]) -> Option<String> {
        let cli = Cli::try_parse_from(args).expect("cli should parse");
        write_lock_holder(&cli.command)
    }

    #[test]
    fn mutating_commands_name_themselves_in_the_lock() {
        assert_eq!(
            holder(&["uni", "merge", "--category", "permission", "--all"]).as_deref(),
            Some("merge permission")
        );
        assert_eq!(holder(&["uni", "merge", "--all"]).as_deref(), Some("merge"));
        assert_eq!(
            holder(&["uni", "project", "assign", "HSP", "--scheme", "sch-1"]).as_deref(),
            Some("project assign HSP")
        );
        assert_eq!(
            holder(&["uni", "rule-type", "add", "--id", "X", "--label", "X"]).as_deref(),
            Some("rule-type add X")
        );
        assert_eq!(
            holder(&["uni", "scheme", "delete", "--unassociated"]).as_deref(),
            Some("scheme delete")
        );
    }

    #[test]
    fn read_only_commands_skip_the_lock() {
        assert_eq!(holder(&["uni", "merge", "--all", "--dry-run"]), None);
        assert_eq!(holder(&["uni", "scheme", "delete", "sch-1", "--dry-run"]), None);
        assert_eq!(holder(&["uni", "distill"]), None);
        assert_eq!(holder(&["uni", "compare", "--filter", "all"]), None);
        assert_eq!(holder(&["uni", "scheme", "list"]), None);
        assert_eq!(holder(&["uni", "project", "list"]), None);
        assert_eq!(holder(&["uni", "audit", "--action", "attached"]), None);
    }
}
