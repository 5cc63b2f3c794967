use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "structdata", bin_name = "structdata", version = get_version())]
#[command(about = "Typed columns, filter lines and value formatting for wiki data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file with type alias rows
    #[arg(long, global = true, value_name = "JSON")]
    pub aliases: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Current user, for %user%
    #[arg(long, global = true, default_value = "")]
    pub user: String,

    /// Groups of the current user, for %groups% (comma separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Active language
    #[arg(long, global = true, default_value = "en")]
    pub lang: String,

    /// Id of the page being rendered
    #[arg(long, global = true, default_value = "")]
    pub id: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a column token and print its descriptor
    #[command(alias = "col")]
    Column {
        /// Column token (e.g. authors_pages)
        token: String,
    },

    /// Validate and normalize a value for a type
    Clean {
        /// Type tag or alias name (e.g. dt, url, page)
        #[arg(value_name = "TYPE")]
        type_tag: String,

        value: String,
    },

    /// Parse filter lines and print the predicates
    #[command(alias = "f")]
    Filter {
        /// Filter lines (e.g. "price>=10")
        #[arg(required = true, num_args = 1..)]
        lines: Vec<String>,
    },

    /// Format a stored value as HTML
    Format {
        /// Column token
        column: String,

        /// Stored value, entries separated by newlines
        value: String,
    },
}
