use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rt", about = concat!("rota v", env!("CARGO_PKG_VERSION"), " - keyed Google Tasks from your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their keys
    Ls(LsArgs),
    /// Create a task
    Add(AddArgs),
    /// Complete a task, or delete it with --force
    Rm(RmArgs),
    /// Replace a task's title
    Edit(EditArgs),
    /// Move SRC to position DST (works across levels: `rt mv 4 3a`, `rt mv 2a 3`)
    Mv(MvArgs),
    /// Show all task lists
    Lists,
    /// Set the active task list
    Use(UseArgs),
    /// Create a task list
    Mklist(MklistArgs),
    /// Delete a task list (defaults to the active list)
    Rmlist(RmlistArgs),
}

#[derive(Args)]
pub struct LsArgs {
    /// Include completed tasks
    #[arg(short = 'a', long = "all")]
    pub all: bool,
    /// Output as a Markdown checklist
    #[arg(short = 'm', long)]
    pub markdown: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub text: String,
    /// Due date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task key, e.g. 3 or 2a
    pub key: String,
    /// Hard delete instead of marking complete
    #[arg(short = 'f', long)]
    pub force: bool,
    /// Include completed tasks when resolving KEY (matches `ls -a` numbering)
    #[arg(short = 'a', long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task key, e.g. 3 or 2a
    pub key: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Key of the task to move
    pub src: String,
    /// Destination key; one past the last sibling appends
    pub dst: String,
}

#[derive(Args)]
pub struct UseArgs {
    /// Task list ID (from `rt lists`)
    pub list_id: String,
}

#[derive(Args)]
pub struct MklistArgs {
    /// Name for the new list
    pub name: String,
}

#[derive(Args)]
pub struct RmlistArgs {
    /// Task list ID; omit to delete the active list
    pub list_id: Option<String>,
}
