//! Building the two-level task tree and resolving keys against it.
//!
//! The remote model is strictly two levels deep: top-level tasks and their
//! direct subtasks. The tree is rebuilt from a fresh fetch on every command
//! and never cached across invocations.

use std::collections::HashMap;

use crate::model::task::Task;
use crate::parse::key::{KeyError, parse_key};

/// One top-level task paired with its subtasks, both in position order
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub task: Task,
    pub children: Vec<Task>,
}

/// The whole visible tree: top-level entries in position order
pub type Tree = Vec<TreeEntry>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error(transparent)]
    Key(#[from] KeyError),
    /// The key's top index exceeds the number of top-level tasks
    #[error("'{key}' out of range ({count} top-level task(s))")]
    TopOutOfRange {
        key: String,
        index: usize,
        count: usize,
    },
    /// The key's letter suffix exceeds the parent's subtask count
    #[error("'{key}' out of range (task {top} has {count} subtask(s))")]
    SubOutOfRange {
        key: String,
        /// 1-based position of the parent, as the user typed it
        top: usize,
        count: usize,
    },
    /// A move destination names a parent slot that does not exist
    #[error("'{key}': no parent task at position {top}")]
    NoParentAt { key: String, top: usize },
}

/// Group a flat task collection into the two-level tree.
///
/// Tasks without a parent become top-level entries; tasks with a parent are
/// bucketed under it. Both levels sort ascending by the opaque `position`
/// token (string compare; a missing token sorts first). Children whose
/// parent id matches no top-level task are dropped: with only two levels
/// there is no coordinate that could reach them.
pub fn build_tree(tasks: Vec<Task>) -> Tree {
    let mut buckets: HashMap<String, Vec<Task>> = HashMap::new();
    let mut top: Vec<Task> = Vec::new();

    for task in tasks {
        // An empty parent string counts as no parent at all
        let pid = task
            .parent
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        match pid {
            Some(pid) => buckets.entry(pid).or_default().push(task),
            None => top.push(task),
        }
    }

    top.sort_by(|a, b| a.position_key().cmp(b.position_key()));
    for children in buckets.values_mut() {
        children.sort_by(|a, b| a.position_key().cmp(b.position_key()));
    }

    top.into_iter()
        .map(|task| {
            let children = buckets.remove(&task.id).unwrap_or_default();
            TreeEntry { task, children }
        })
        .collect()
}

/// Look up the task a key designates. Strict: any index past the tree's
/// current shape is an error (contrast with the move planner, which clamps
/// its destination).
pub fn resolve<'a>(tree: &'a [TreeEntry], key: &str) -> Result<&'a Task, TreeError> {
    let (top, sub) = parse_key(key)?;
    resolve_coordinate(tree, key, top, sub)
}

/// Shared lookup for an already-parsed coordinate. `key` is only used for
/// error context.
pub(crate) fn resolve_coordinate<'a>(
    tree: &'a [TreeEntry],
    key: &str,
    top: usize,
    sub: Option<usize>,
) -> Result<&'a Task, TreeError> {
    let entry = tree.get(top).ok_or_else(|| TreeError::TopOutOfRange {
        key: key.to_string(),
        index: top,
        count: tree.len(),
    })?;
    match sub {
        None => Ok(&entry.task),
        Some(si) => entry
            .children
            .get(si)
            .ok_or_else(|| TreeError::SubOutOfRange {
                key: key.to_string(),
                top: top + 1,
                count: entry.children.len(),
            }),
    }
}
