//! Command handlers: one `cmd_*` per subcommand, dispatched from main.
//!
//! Every handler follows the same shape: load config, connect, fetch the
//! full task collection, build a fresh tree, resolve or plan against it,
//! then issue at most one write. Nothing is cached between invocations.

use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::{self, TaskListJson};
use crate::io::config_io;
use crate::model::config::Config;
use crate::model::task::{NewTask, TaskPatch};
use crate::ops::move_plan::plan_move;
use crate::ops::tree::{build_tree, resolve};
use crate::remote::TasksClient;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        // Read commands
        Commands::Ls(args) => cmd_ls(args, json),
        Commands::Lists => cmd_lists(json),

        // Write commands
        Commands::Add(args) => cmd_add(args),
        Commands::Rm(args) => cmd_rm(args),
        Commands::Edit(args) => cmd_edit(args),
        Commands::Mv(args) => cmd_mv(args),

        // List management and config
        Commands::Use(args) => cmd_use(args),
        Commands::Mklist(args) => cmd_mklist(args),
        Commands::Rmlist(args) => cmd_rmlist(args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config() -> Result<(PathBuf, Config), Box<dyn std::error::Error>> {
    let dir = config_io::config_dir();
    let config = config_io::load_config(&dir)?;
    Ok((dir, config))
}

/// The active list id, or an actionable error telling the user how to pick one
fn require_list(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    config.list_id.clone().ok_or_else(|| {
        "no task list selected\n\
         Run 'rt lists' to see available lists, then 'rt use LIST_ID'."
            .into()
    })
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_ls(args: LsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, config) = load_config()?;
    let list_id = require_list(&config)?;
    let client = TasksClient::connect(&dir)?;

    let list = client.get_tasklist(&list_id)?;
    let tree = build_tree(client.list_tasks(&list_id, args.all)?);

    if json {
        let payload = output::tree_json(&list.title, &tree, args.all);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        output::print_tree(&list.title, &tree, args.all, args.markdown);
    }
    Ok(())
}

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, config) = load_config()?;
    let list_id = require_list(&config)?;
    let client = TasksClient::connect(&dir)?;

    client.insert_task(&list_id, &NewTask::new(args.text, args.due.as_deref()))?;
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, config) = load_config()?;
    let list_id = require_list(&config)?;
    let client = TasksClient::connect(&dir)?;

    // Resolve against the same numbering the user is looking at: `rm -a`
    // matches `ls -a`.
    let tree = build_tree(client.list_tasks(&list_id, args.all)?);
    let task = resolve(&tree, &args.key)?;

    if args.force {
        client.delete_task(&list_id, &task.id)?;
    } else {
        client.patch_task(&list_id, &task.id, &TaskPatch::completed())?;
    }
    Ok(())
}

fn cmd_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, config) = load_config()?;
    let list_id = require_list(&config)?;
    let client = TasksClient::connect(&dir)?;

    let tree = build_tree(client.list_tasks(&list_id, false)?);
    let task = resolve(&tree, &args.key)?;
    client.patch_task(&list_id, &task.id, &TaskPatch::title(args.title))?;
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, config) = load_config()?;
    let list_id = require_list(&config)?;
    let client = TasksClient::connect(&dir)?;

    let tree = build_tree(client.list_tasks(&list_id, false)?);

    // Planning is pure; the single remote write below only happens once a
    // fully valid plan exists.
    let plan = plan_move(&tree, &args.src, &args.dst)?;
    client.move_task(
        &list_id,
        &plan.task_id,
        plan.parent_id.as_deref(),
        plan.previous_id.as_deref(),
    )?;
    Ok(())
}

fn cmd_lists(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _config) = load_config()?;
    let client = TasksClient::connect(&dir)?;

    let lists = client.list_tasklists()?;
    if json {
        let payload: Vec<TaskListJson> = lists
            .into_iter()
            .map(|l| TaskListJson {
                id: l.id,
                title: l.title,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for list in lists {
            println!("{:<30} {}", list.title, list.id);
        }
    }
    Ok(())
}

fn cmd_use(args: UseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut config) = load_config()?;
    config.list_id = Some(args.list_id);
    config_io::save_config(&dir, &config)?;
    Ok(())
}

fn cmd_mklist(args: MklistArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _config) = load_config()?;
    let client = TasksClient::connect(&dir)?;

    let list = client.insert_tasklist(&args.name)?;
    println!("{:<30} {}", list.title, list.id);
    Ok(())
}

fn cmd_rmlist(args: RmlistArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, mut config) = load_config()?;
    let list_id = match args.list_id {
        Some(id) => id,
        None => require_list(&config)?,
    };
    let client = TasksClient::connect(&dir)?;

    let list = client.get_tasklist(&list_id)?;
    client.delete_tasklist(&list_id)?;
    println!("Deleted: {}", list.title);

    // Losing the active list also clears it from config
    if config.list_id.as_deref() == Some(list_id.as_str()) {
        config.list_id = None;
        config_io::save_config(&dir, &config)?;
    }
    Ok(())
}
