use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("REFOLD_GIT_HASH");
    const IS_RELEASE: &str = env!("REFOLD_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "refold", version = get_version())]
#[command(about = "Inspect and maintain a project's saved code folds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root (defaults to the nearest ancestor with a .js-folds directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the .js-folds directory in the project root
    Init,

    /// List tracked files and how many folds each has
    #[command(alias = "ls")]
    List,

    /// Show the saved folds of one file
    Show {
        /// File path as the editor reports it
        path: String,
    },

    /// Move saved folds from one path to another
    #[command(alias = "mv")]
    Rename { old: String, new: String },

    /// Report inconsistencies between the mapping and record files
    Doctor,

    /// Print config.json, or a single key from it
    Config { key: Option<String> },
}
