use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "quarry",
    about = "Fetch data from software development sources",
    long_about = "A launcher for pluggable data-fetch backends. The first positional argument \
names the backend; everything after it is handed to that backend untouched.",
    after_help = "Backends:\n  \
git       Fetch commits from a Git repository\n  \
github    Fetch issues from a GitHub repository\n\n\
Run 'quarry <backend> --help' for the options of a specific backend.",
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub backend: Option<BackendInvocation>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Print version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Enable debug logging
    #[arg(short = 'g', long)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum BackendInvocation {
    // Backend name followed by its own arguments, captured verbatim.
    #[command(external_subcommand)]
    Backend(Vec<String>),
}
