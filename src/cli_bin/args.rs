//! Command-line argument definitions and parsing
//!
//! Argument structs stay free of library types; `commands` turns them into
//! library calls.

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "notevault",
    version,
    about = "Query and edit a vault of Markdown notes",
    long_about = "notevault lists, searches and edits the Markdown notes of a vault. \
                  Notes can be filtered by front matter, edited in place with exact \
                  string replacement, and opened in the companion app or $EDITOR."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault name (defaults to the one saved with set-default)
    #[arg(short = 'v', long, global = true, value_name = "NAME")]
    pub vault: Option<String>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Open a note in the companion app (use @daily for the daily note)
    #[command(visible_alias = "o")]
    Open(OpenArgs),
    /// Open today's daily note
    #[command(visible_alias = "d")]
    Daily,
    /// Fuzzy-find a note and open it
    #[command(visible_alias = "s")]
    Search(SearchArgs),
    /// Search note names and content, printing the chosen note path
    #[command(name = "search-content", visible_alias = "sc")]
    SearchContent(SearchContentArgs),
    /// List files and folders in the vault
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Print the contents of a note
    #[command(visible_alias = "p")]
    Print(PrintArgs),
    /// Create a note (reads stdin when --content is absent)
    #[command(visible_alias = "c")]
    Create(CreateArgs),
    /// Append text to an existing note (reads stdin when content is absent)
    #[command(visible_alias = "a")]
    Append(AppendArgs),
    /// Replace an exact string in a note
    Edit(EditArgs),
    /// Print, set or delete front matter keys
    #[command(visible_alias = "fm")]
    Frontmatter(FrontmatterArgs),
    /// Save the default vault name
    SetDefault(SetDefaultArgs),
    /// Print the default vault name and its path
    PrintDefault(PrintDefaultArgs),
    /// Save the daily-note pattern, e.g. daily/YYYY-MM-DD
    SetDailyPattern(SetDailyPatternArgs),
}

/// Arguments for the open command
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Note name, relative to the vault root
    pub note: String,

    /// Heading to open within the note (case-sensitive)
    #[arg(short, long)]
    pub section: Option<String>,

    /// Create an empty note if it does not exist
    #[arg(long)]
    pub create_if_not_exist: bool,
}

/// Metadata filter options shared by list and search
#[derive(Args, Debug, Clone, Default)]
pub struct MetaOptions {
    /// Filter by front matter (key=value, repeatable)
    #[arg(short, long = "meta", value_name = "KEY=VALUE")]
    pub meta: Vec<String>,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub meta: MetaOptions,

    /// Open in $EDITOR instead of the companion app
    #[arg(short, long)]
    pub editor: bool,
}

/// Arguments for the search-content command
#[derive(Args, Debug)]
pub struct SearchContentArgs {
    /// Text to look for (case-insensitive)
    pub term: String,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory or glob pattern, relative to the vault root
    #[arg(default_value = "")]
    pub path: String,

    #[command(flatten)]
    pub meta: MetaOptions,

    /// Print the full filesystem path of each entry
    #[arg(long)]
    pub full_path: bool,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    pub note: String,

    /// Include linked mentions at the end
    #[arg(short, long)]
    pub mentions: bool,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    pub note: String,

    /// Text to put in the note (escape sequences like \n are honoured)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Overwrite an existing note
    #[arg(short, long, conflicts_with = "append")]
    pub overwrite: bool,

    /// Append to an existing note
    #[arg(short, long)]
    pub append: bool,

    /// Open the note afterwards
    #[arg(long)]
    pub open: bool,

    /// Open in $EDITOR instead of the companion app (with --open)
    #[arg(short, long, requires = "open")]
    pub editor: bool,
}

/// Arguments for the append command
#[derive(Args, Debug)]
pub struct AppendArgs {
    pub note: String,

    /// Text to append (escape sequences like \n are honoured)
    pub content: Option<String>,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    pub note: String,
    pub old_string: String,
    pub new_string: String,

    /// Replace every occurrence
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the frontmatter command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("action").required(true).args(["print", "set", "delete"])))]
pub struct FrontmatterArgs {
    pub note: String,

    /// Print the front matter block
    #[arg(short, long)]
    pub print: bool,

    /// Set KEY to VALUE ("true"/"false" become booleans, "[a, b]" a list)
    #[arg(short, long, num_args = 2, value_names = ["KEY", "VALUE"])]
    pub set: Option<Vec<String>>,

    /// Delete KEY
    #[arg(short, long, value_name = "KEY")]
    pub delete: Option<String>,
}

/// Arguments for the set-default command
#[derive(Args, Debug)]
pub struct SetDefaultArgs {
    pub name: String,
}

/// Arguments for the print-default command
#[derive(Args, Debug)]
pub struct PrintDefaultArgs {
    /// Print only the vault path
    #[arg(long)]
    pub path_only: bool,
}

/// Arguments for the set-daily-pattern command
#[derive(Args, Debug)]
pub struct SetDailyPatternArgs {
    /// Tokens: YYYY, YY, MMMM, MMM, MM, DD
    pub pattern: String,
}
