//! Translating "move SRC to DST" into the remote reordering primitive.
//!
//! The service keeps sibling order linked-list style: a move names the new
//! parent (or none, for top level) and the sibling that should immediately
//! precede the task (or none, for first place). This module computes that
//! triple; it performs no mutation itself, so a planning failure never
//! leaves the remote list half-edited.

use crate::ops::tree::{TreeEntry, TreeError, resolve_coordinate};
use crate::parse::key::parse_key;

/// The edit the remote `move` call needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub task_id: String,
    /// New parent; `None` explicitly clears the parent (promotion to top level)
    pub parent_id: Option<String>,
    /// Sibling to land after; `None` means first among peers
    pub previous_id: Option<String>,
}

/// Plan relocating the task at `src_key` to the slot `dst_key` names,
/// possibly across levels.
///
/// The destination index is permissive where [`crate::ops::tree::resolve`]
/// is strict: it clamps into `[0, peers]`, so "one past the last subtask"
/// is a valid way to say "append". Peers are computed with the source task
/// already removed, which makes planning a move onto the task's own current
/// slot a no-op edit rather than an error.
pub fn plan_move(
    tree: &[TreeEntry],
    src_key: &str,
    dst_key: &str,
) -> Result<MovePlan, TreeError> {
    let (src_top, src_sub) = parse_key(src_key)?;
    let (dst_top, dst_sub) = parse_key(dst_key)?;

    let source = resolve_coordinate(tree, src_key, src_top, src_sub)?;
    let task_id = source.id.clone();

    let (parent_id, peers, dst_index) = match dst_sub {
        None => {
            // Destination: top level. Clearing the parent promotes the task.
            let peers: Vec<&str> = tree
                .iter()
                .map(|e| e.task.id.as_str())
                .filter(|id| *id != task_id)
                .collect();
            (None, peers, dst_top)
        }
        Some(si) => {
            // Destination: subtask of the task at dst_top. This can fail even
            // when the source resolved, so the error names the destination.
            let entry = tree.get(dst_top).ok_or_else(|| TreeError::NoParentAt {
                key: dst_key.to_string(),
                top: dst_top + 1,
            })?;
            let peers: Vec<&str> = entry
                .children
                .iter()
                .map(|t| t.id.as_str())
                .filter(|id| *id != task_id)
                .collect();
            (Some(entry.task.id.clone()), peers, si)
        }
    };

    let index = dst_index.min(peers.len());
    let previous_id = if index > 0 {
        Some(peers[index - 1].to_string())
    } else {
        None
    };

    Ok(MovePlan {
        task_id,
        parent_id,
        previous_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Task, TaskStatus};
    use crate::ops::tree::build_tree;
    use crate::parse::key::KeyError;
    use pretty_assertions::assert_eq;

    fn task(id: &str, parent: Option<&str>, position: &str) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            status: TaskStatus::NeedsAction,
            parent: parent.map(str::to_string),
            position: Some(position.to_string()),
            due: None,
        }
    }

    /// Top level [T1, T2, T3]; T3 has subtasks [S1, S2]
    fn sample_tree() -> Vec<TreeEntry> {
        build_tree(vec![
            task("T1", None, "a"),
            task("T2", None, "b"),
            task("T3", None, "c"),
            task("S1", Some("T3"), "a"),
            task("S2", Some("T3"), "b"),
        ])
    }

    #[test]
    fn test_demote_top_level_to_first_subtask() {
        let plan = plan_move(&sample_tree(), "1", "3a").unwrap();
        assert_eq!(
            plan,
            MovePlan {
                task_id: "T1".to_string(),
                parent_id: Some("T3".to_string()),
                previous_id: None,
            }
        );
    }

    #[test]
    fn test_promote_subtask_to_top_level() {
        // "2" is 0-based index 1 at top level: lands after T1
        let plan = plan_move(&sample_tree(), "3b", "2").unwrap();
        assert_eq!(
            plan,
            MovePlan {
                task_id: "S2".to_string(),
                parent_id: None,
                previous_id: Some("T1".to_string()),
            }
        );
    }

    #[test]
    fn test_reorder_within_top_level() {
        // Move T1 to position 3: peers without T1 are [T2, T3], index 2 → after T3
        let plan = plan_move(&sample_tree(), "1", "3").unwrap();
        assert_eq!(plan.parent_id, None);
        assert_eq!(plan.previous_id.as_deref(), Some("T3"));
    }

    #[test]
    fn test_reorder_within_subtasks() {
        let plan = plan_move(&sample_tree(), "3b", "3a").unwrap();
        assert_eq!(plan.task_id, "S2");
        assert_eq!(plan.parent_id.as_deref(), Some("T3"));
        assert_eq!(plan.previous_id, None);
    }

    #[test]
    fn test_destination_index_clamps_to_append() {
        // Way past the end: clamped to "after the last peer", never an error
        let plan = plan_move(&sample_tree(), "1", "9").unwrap();
        assert_eq!(plan.previous_id.as_deref(), Some("T3"));

        let plan = plan_move(&sample_tree(), "1", "3z").unwrap();
        assert_eq!(plan.parent_id.as_deref(), Some("T3"));
        assert_eq!(plan.previous_id.as_deref(), Some("S2"));
    }

    #[test]
    fn test_move_to_own_slot_is_noop_edit() {
        // T2 back to position 2: peers without T2 are [T1, T3], index 1 → after T1,
        // which is exactly T2's current predecessor
        let plan = plan_move(&sample_tree(), "2", "2").unwrap();
        assert_eq!(plan.previous_id.as_deref(), Some("T1"));

        let plan = plan_move(&sample_tree(), "3b", "3b").unwrap();
        assert_eq!(plan.previous_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_empty_destination_bucket() {
        // T1 has no subtasks; any sub index lands first
        let plan = plan_move(&sample_tree(), "2", "1c").unwrap();
        assert_eq!(plan.parent_id.as_deref(), Some("T1"));
        assert_eq!(plan.previous_id, None);
    }

    #[test]
    fn test_single_peer_position_one() {
        let tree = build_tree(vec![
            task("T1", None, "a"),
            task("S1", Some("T1"), "a"),
            task("S2", Some("T1"), "b"),
        ]);
        let plan = plan_move(&tree, "1b", "1a").unwrap();
        assert_eq!(plan.previous_id, None);
    }

    #[test]
    fn test_source_out_of_range_names_source() {
        let err = plan_move(&sample_tree(), "4", "1").unwrap_err();
        assert_eq!(
            err,
            TreeError::TopOutOfRange {
                key: "4".to_string(),
                index: 3,
                count: 3,
            }
        );
    }

    #[test]
    fn test_destination_parent_missing_names_destination() {
        let err = plan_move(&sample_tree(), "1", "4a").unwrap_err();
        assert_eq!(
            err,
            TreeError::NoParentAt {
                key: "4a".to_string(),
                top: 4,
            }
        );
        assert_eq!(err.to_string(), "'4a': no parent task at position 4");
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(
            plan_move(&sample_tree(), "0", "1").unwrap_err(),
            TreeError::Key(KeyError::InvalidKey(_))
        ));
        assert!(matches!(
            plan_move(&sample_tree(), "1", "2A").unwrap_err(),
            TreeError::Key(KeyError::InvalidKey(_))
        ));
    }
}
