use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use scaffolder::layout::Mode;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,

    /// The path to a scaffolder.toml config file (otherwise SCAFFOLDER_BASE alone is used)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Increase logging verbosity level (0: warn; 1: info; 2: debug; 3: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a layout beneath a directory of the configured root
    Apply {
        /// The directory to create the layout in, relative to the root
        target: String,

        /// A file containing the layout (standard input if not given)
        prompt_file: Option<Utf8PathBuf>,

        /// How to read the layout: auto, tree, yaml or json
        #[arg(short, long, default_value = "auto")]
        mode: Mode,

        /// Replace the content of files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Only print what would be created
        #[arg(long)]
        dry_run: bool,
    },

    /// Process a JSON request of the form {"prompt": ..., "target_path": ..., ...}
    Request {
        /// A file containing the request (standard input if not given)
        request_file: Option<Utf8PathBuf>,
    },

    /// Print examples of the accepted layout forms
    Template,
}
