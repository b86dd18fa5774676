//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;
pub mod sample_config;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// Default branch for `init` and zettel URLs.
pub const DEFAULT_BRANCH: &str = "main";

/// Default remote for `remote` and zettel URLs.
pub const DEFAULT_REMOTE: &str = "origin";

/// zet - a Zettelkasten kept in a Git repository
#[derive(Parser, Debug)]
#[command(name = "zet", version, about, long_about = None)]
pub struct Cli {
    /// Zettelkasten repository (overrides the config file)
    #[arg(short, long)]
    pub repo: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a Git repository for zettels
    Init(InitArgs),

    /// Add a new zettel
    Add,

    /// Edit an existing zettel (the latest one by default)
    Edit(TargetArgs),

    /// Remove a zettel
    Rm(RmArgs),

    /// Show a zettel as text, Markdown link or URL
    #[command(alias = "print")]
    Show(ShowArgs),

    /// List all zettels
    List(ListArgs),

    /// List all tags with their counts
    Tags(TagsArgs),

    /// Delete empty folders in the notes directory
    Clean(CleanArgs),

    /// Run 'git grep' over zettels; all patterns must match
    Grep(GrepArgs),

    /// Open a zettel whose title matches all patterns
    Query(QueryArgs),

    /// Run 'git status' in the repository
    Status(GitPassArgs),

    /// Run 'git pull --rebase' in the repository
    Pull,

    /// Run 'git push' in the repository
    Push(GitPassArgs),

    /// Print the URL of a remote
    Remote(RemoteArgs),

    /// Show statistics about the repository
    Info,

    /// Print a sample config file
    SampleConfig(SampleConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Create the repository here instead of the configured path
    pub path: Option<PathBuf>,

    /// Initial branch name
    #[arg(short = 'b', long, default_value = DEFAULT_BRANCH)]
    pub initial_branch: String,
}

/// How selected zettels are listed during interactive selection.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Use a prettier format for date and time
    #[arg(short, long)]
    pub pretty: bool,

    /// Show tags for each zettel
    #[arg(short, long)]
    pub tags: bool,
}

/// Arguments for commands that pick one zettel
#[derive(Parser, Debug, Default)]
pub struct TargetArgs {
    /// Zettel ID, or grep patterns that must all match
    pub target: Vec<String>,

    /// Case insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Zettel ID, or grep patterns that must all match
    #[arg(required = true)]
    pub target: Vec<String>,

    /// Case insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Representation used by `show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Zettel content framed by a header with its ID
    #[default]
    Text,
    /// Relative Markdown link
    Mdlink,
    /// Web URL of the zettel folder on the remote host
    Url,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Representation to print
    #[arg(short = 'f', long, value_enum, default_value_t = ShowFormat::Text)]
    pub format: ShowFormat,

    /// Remote used to build the URL
    #[arg(long, default_value = DEFAULT_REMOTE)]
    pub name: String,

    /// Branch used to build the URL
    #[arg(short = 'b', long, default_value = DEFAULT_BRANCH)]
    pub branch: String,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub style: StyleArgs,

    /// Print zettels as relative Markdown links
    #[arg(short, long)]
    pub link: bool,

    /// Newest first
    #[arg(short, long)]
    pub reverse: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug, Default)]
pub struct TagsArgs {
    /// Most used first
    #[arg(short, long)]
    pub reverse: bool,

    /// Print only the total number of tags
    #[arg(short, long)]
    pub count: bool,
}

/// Arguments for the `clean` command
#[derive(Parser, Debug, Default)]
pub struct CleanArgs {
    /// List what would be deleted without deleting it
    #[arg(short, long)]
    pub dry_run: bool,

    /// Actually delete the folders
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `query` command
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Case insensitive regexes; titles must match all of them
    #[arg(required = true)]
    pub patterns: Vec<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the `grep` command
#[derive(Parser, Debug)]
pub struct GrepArgs {
    /// Patterns; only zettels matching all of them are shown
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Case insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Also print the title of each matching zettel
    #[arg(short, long)]
    pub title: bool,

    /// Extra 'git grep' options, given after '--'
    #[arg(last = true)]
    pub flags: Vec<String>,
}

/// Options passed straight to a git command
#[derive(Parser, Debug, Default)]
pub struct GitPassArgs {
    /// Git options, given after '--'
    #[arg(last = true)]
    pub options: Vec<String>,
}

/// Arguments for the `remote` command
#[derive(Parser, Debug)]
pub struct RemoteArgs {
    /// Name of the remote
    #[arg(long, default_value = DEFAULT_REMOTE)]
    pub name: String,
}

/// Platform of the sample config
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKind {
    Unix,
    Windows,
}

/// Arguments for the `sample-config` command
#[derive(Parser, Debug)]
pub struct SampleConfigArgs {
    #[arg(value_enum)]
    pub kind: ConfigKind,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
