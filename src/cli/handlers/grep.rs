//! Grep command handler.

use anyhow::Result;

use crate::cli::GrepArgs;
use crate::infra::Git;
use crate::search::{self, DisplayOptions};

pub fn handle_grep(args: &GrepArgs, git: &Git) -> Result<()> {
    let opts = DisplayOptions {
        ignore_case: args.ignore_case,
        title: args.title,
        flags: args.flags.clone(),
    };
    if !search::display(git, &args.patterns, &opts)? {
        println!("No zettels found!");
    }
    Ok(())
}
