//! zet - a Zettelkasten kept in a Git repository

pub mod cli;
pub mod domain;
pub mod infra;
pub mod lifecycle;
pub mod repo;
pub mod search;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Workspace, handle_add, handle_clean, handle_completions, handle_edit, handle_grep,
        handle_info, handle_init, handle_list, handle_pull, handle_push, handle_query,
        handle_remote, handle_rm, handle_sample_config, handle_show, handle_status, handle_tags,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    infra::logging::init(cli.verbose);

    match &cli.command {
        Command::SampleConfig(args) => return handle_sample_config(args.kind),
        Command::Completions(args) => return handle_completions(args.shell),
        _ => {}
    }

    let config = Config::load(cli.config.as_deref(), repo_override(&cli).as_deref())?;

    if let Command::Init(args) = &cli.command {
        return handle_init(args, &config.repo);
    }

    let ws = Workspace::open(config)?;
    match &cli.command {
        Command::Add => handle_add(&ws),
        Command::Edit(args) => handle_edit(args, &ws),
        Command::Rm(args) => handle_rm(args, &ws),
        Command::Show(args) => handle_show(args, &ws),
        Command::List(args) => handle_list(args, ws.repo()),
        Command::Tags(args) => handle_tags(args, ws.repo()),
        Command::Clean(args) => handle_clean(args, ws.repo()),
        Command::Grep(args) => handle_grep(args, ws.git()),
        Command::Query(args) => handle_query(args, &ws),
        Command::Status(args) => handle_status(args, ws.git()),
        Command::Pull => handle_pull(ws.git()),
        Command::Push(args) => handle_push(args, ws.git()),
        Command::Remote(args) => handle_remote(args, ws.git()),
        Command::Info => handle_info(&ws),
        Command::Init(_) | Command::SampleConfig(_) | Command::Completions(_) => Ok(()),
    }
}

/// `init PATH` takes precedence over `--repo`.
fn repo_override(cli: &Cli) -> Option<PathBuf> {
    match &cli.command {
        Command::Init(args) if args.path.is_some() => args.path.clone(),
        _ => cli.repo.clone(),
    }
}
