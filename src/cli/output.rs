//! Rendering the tree for humans, Markdown, and `--json`.

use serde::Serialize;

use crate::model::task::Task;
use crate::ops::tree::TreeEntry;
use crate::parse::key::format_key;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub key: String,
    pub id: String,
    pub title: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TreeJson {
    pub list: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub id: String,
    pub title: String,
}

fn task_json(key: String, task: &Task, subtasks: Vec<TaskJson>) -> TaskJson {
    TaskJson {
        key,
        id: task.id.clone(),
        title: task.title.clone(),
        done: task.is_completed(),
        due: task.due.clone(),
        subtasks,
    }
}

/// Build the `--json` payload for `ls`, applying the same completed-task
/// filter as the plain renderer so keys line up between the two.
pub fn tree_json(list_title: &str, tree: &[TreeEntry], show_all: bool) -> TreeJson {
    let mut tasks = Vec::new();
    for (ti, entry) in tree.iter().enumerate() {
        if !show_all && entry.task.is_completed() {
            continue;
        }
        let subtasks = entry
            .children
            .iter()
            .enumerate()
            .filter(|(_, sub)| show_all || !sub.is_completed())
            .map(|(si, sub)| task_json(format_key(ti, Some(si)), sub, Vec::new()))
            .collect();
        tasks.push(task_json(format_key(ti, None), &entry.task, subtasks));
    }
    TreeJson {
        list: list_title.to_string(),
        tasks,
    }
}

// ---------------------------------------------------------------------------
// Plain / Markdown rendering
// ---------------------------------------------------------------------------

/// One output line: `KEY  TITLE [done]` with two-space indent per level,
/// or a `- [ ]` checklist item in markdown mode.
pub fn print_row(key: &str, title: &str, done: bool, depth: usize, markdown: bool) {
    let indent = "  ".repeat(depth);
    if markdown {
        let tick = if done { "x" } else { " " };
        println!("{}- [{}] {}", indent, tick, title);
    } else {
        let tag = if done { " [done]" } else { "" };
        println!("{}{}  {}{}", indent, key, title, tag);
    }
}

/// Render the whole tree to stdout
pub fn print_tree(list_title: &str, tree: &[TreeEntry], show_all: bool, markdown: bool) {
    let task_depth = if markdown {
        println!("- {}", list_title);
        1
    } else {
        println!("{}", list_title);
        println!("{}", "-".repeat(list_title.chars().count()));
        0
    };

    for (ti, entry) in tree.iter().enumerate() {
        if !show_all && entry.task.is_completed() {
            continue;
        }
        print_row(
            &format_key(ti, None),
            &entry.task.title,
            entry.task.is_completed(),
            task_depth,
            markdown,
        );
        for (si, sub) in entry.children.iter().enumerate() {
            if !show_all && sub.is_completed() {
                continue;
            }
            print_row(
                &format_key(ti, Some(si)),
                &sub.title,
                sub.is_completed(),
                task_depth + 1,
                markdown,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;
    use crate::ops::tree::build_tree;

    fn task(id: &str, parent: Option<&str>, position: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("title {}", id),
            status: if done {
                TaskStatus::Completed
            } else {
                TaskStatus::NeedsAction
            },
            parent: parent.map(str::to_string),
            position: Some(position.to_string()),
            due: None,
        }
    }

    #[test]
    fn test_tree_json_keys_and_filtering() {
        let tree = build_tree(vec![
            task("A", None, "a", false),
            task("B", None, "b", true),
            task("S", Some("A"), "a", false),
        ]);

        let json = tree_json("errands", &tree, false);
        assert_eq!(json.tasks.len(), 1);
        assert_eq!(json.tasks[0].key, "1");
        assert_eq!(json.tasks[0].subtasks[0].key, "1a");

        // Keys stay tied to tree indices even when completed rows show
        let all = tree_json("errands", &tree, true);
        assert_eq!(all.tasks.len(), 2);
        assert_eq!(all.tasks[1].key, "2");
        assert!(all.tasks[1].done);
    }
}
