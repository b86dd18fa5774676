//! Handlers that forward to plain git commands.

use anyhow::Result;

use crate::cli::{GitPassArgs, RemoteArgs};
use crate::infra::Git;

pub fn handle_status(args: &GitPassArgs, git: &Git) -> Result<()> {
    forward(git, "status", &args.options)
}

pub fn handle_push(args: &GitPassArgs, git: &Git) -> Result<()> {
    forward(git, "push", &args.options)
}

/// Pulls with `--rebase` to keep history linear.
pub fn handle_pull(git: &Git) -> Result<()> {
    forward(git, "pull", &["--rebase".to_string()])
}

pub fn handle_remote(args: &RemoteArgs, git: &Git) -> Result<()> {
    println!("{}", git.remote_url(&args.name)?);
    Ok(())
}

fn forward(git: &Git, command: &str, options: &[String]) -> Result<()> {
    let args: Vec<&str> = std::iter::once(command)
        .chain(options.iter().map(String::as_str))
        .collect();
    git.call(&args)?;
    Ok(())
}
