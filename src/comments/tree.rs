//! Copy-on-write operations over a comment tree.
//!
//! Every function takes the current roots by reference and returns a new
//! `Vec<Comment>`. Nothing is mutated in place. Looking up an id that is not
//! in the tree is not an error: the returned tree is equal to the input.

use tracing::{debug, trace};

use super::model::Comment;

// =============================================================================
// MUTATIONS
// =============================================================================

/// Prepends `reply` to the replies of the comment with `parent_id`, at any depth.
pub fn add_reply(tree: &[Comment], parent_id: &str, reply: Comment) -> Vec<Comment> {
    let reply_id = reply.id.clone();
    let mut reply = Some(reply);
    apply_or_clone(tree, parent_id, "add_reply", &mut |parent| {
        if let Some(r) = reply.take() {
            parent.replies.insert(0, r);
        }
    })
    .inspect_found(|| debug!(parent_id, reply_id = %reply_id, "reply added"))
}

/// Flips `resolved` on the first comment (pre-order) whose id matches.
pub fn toggle_resolved(tree: &[Comment], id: &str) -> Vec<Comment> {
    apply_or_clone(tree, id, "toggle_resolved", &mut |c| c.resolved = !c.resolved)
        .inspect_found(|| debug!(id, "resolved toggled"))
}

/// Sets `resolved` on the first comment whose id matches.
pub fn set_resolved(tree: &[Comment], id: &str, resolved: bool) -> Vec<Comment> {
    apply_or_clone(tree, id, "set_resolved", &mut |c| c.resolved = resolved)
        .inspect_found(|| debug!(id, resolved, "resolved set"))
}

/// Replaces the content of the first comment whose id matches.
pub fn update_content(tree: &[Comment], id: &str, content: &str) -> Vec<Comment> {
    apply_or_clone(tree, id, "update_content", &mut |c| c.content = content.to_string())
        .inspect_found(|| debug!(id, "content updated"))
}

// =============================================================================
// QUERIES
// =============================================================================

/// Keeps every comment that matches `predicate` or has a kept descendant.
///
/// Kept comments carry only their kept replies.
pub fn filter<P>(tree: &[Comment], predicate: P) -> Vec<Comment>
where
    P: Fn(&Comment) -> bool,
{
    filter_nodes(tree, &predicate)
}

/// Total number of comments at all depths.
pub fn count_all(tree: &[Comment]) -> usize {
    tree.iter().map(|c| 1 + count_all(&c.replies)).sum()
}

/// Finds a comment by id at any depth.
pub fn find<'a>(tree: &'a [Comment], id: &str) -> Option<&'a Comment> {
    for comment in tree {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// All ids in pre-order.
pub fn ids(tree: &[Comment]) -> Vec<&str> {
    let mut out = Vec::with_capacity(count_all(tree));
    collect_ids(tree, &mut out);
    out
}

// =============================================================================
// INTERNALS
// =============================================================================

/// Outcome of a targeted rebuild: the new roots and whether the id was found.
struct Rebuilt {
    tree: Vec<Comment>,
    found: bool,
}

impl Rebuilt {
    fn inspect_found(self, f: impl FnOnce()) -> Vec<Comment> {
        if self.found {
            f();
        }
        self.tree
    }
}

fn apply_or_clone(
    tree: &[Comment],
    id: &str,
    op: &'static str,
    f: &mut dyn FnMut(&mut Comment),
) -> Rebuilt {
    match rebuild(tree, id, f) {
        Some(tree) => Rebuilt { tree, found: true },
        None => {
            trace!(id, op, "comment not found; tree unchanged");
            Rebuilt {
                tree: tree.to_vec(),
                found: false,
            }
        }
    }
}

/// Rebuilds the path from the roots down to the first node with `id`,
/// applying `f` to a copy of that node. Returns `None` on a miss.
fn rebuild(nodes: &[Comment], id: &str, f: &mut dyn FnMut(&mut Comment)) -> Option<Vec<Comment>> {
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            let mut updated = node.clone();
            f(&mut updated);
            Some(updated)
        } else {
            rebuild(&node.replies, id, f).map(|replies| with_replies(node, replies))
        };

        if let Some(updated) = replacement {
            let mut out = Vec::with_capacity(nodes.len());
            out.extend_from_slice(&nodes[..index]);
            out.push(updated);
            out.extend_from_slice(&nodes[index + 1..]);
            return Some(out);
        }
    }
    None
}

fn filter_nodes(nodes: &[Comment], predicate: &dyn Fn(&Comment) -> bool) -> Vec<Comment> {
    nodes
        .iter()
        .filter_map(|node| {
            let replies = filter_nodes(&node.replies, predicate);
            if predicate(node) || !replies.is_empty() {
                Some(with_replies(node, replies))
            } else {
                None
            }
        })
        .collect()
}

/// Copies a node's own fields and attaches a new reply list.
fn with_replies(node: &Comment, replies: Vec<Comment>) -> Comment {
    Comment {
        id: node.id.clone(),
        author: node.author.clone(),
        created_at: node.created_at,
        content: node.content.clone(),
        resolved: node.resolved,
        replies,
    }
}

fn collect_ids<'a>(nodes: &'a [Comment], out: &mut Vec<&'a str>) {
    for node in nodes {
        out.push(node.id.as_str());
        collect_ids(&node.replies, out);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::comments::model::FilterMode;

    fn sample() -> Vec<Comment> {
        vec![
            Comment::new("a", "Ada", "root a")
                .with_created_at(1)
                .with_reply(
                    Comment::new("a1", "Bob", "reply a1")
                        .with_created_at(2)
                        .with_reply(Comment::new("a1x", "Cy", "deep").with_created_at(3)),
                )
                .with_reply(Comment::new("a2", "Dee", "reply a2").with_created_at(4)),
            Comment::new("b", "Eve", "root b").with_created_at(5),
        ]
    }

    #[test]
    fn test_add_reply_prepends_at_root() {
        let tree = sample();
        let out = add_reply(&tree, "a", Comment::new("new", "Fay", "hi"));
        let a = find(&out, "a").unwrap();
        assert_eq!(a.replies.len(), 3);
        assert_eq!(a.replies[0].id, "new");
        // input untouched
        assert_eq!(find(&tree, "a").unwrap().replies.len(), 2);
    }

    #[test]
    fn test_add_reply_reaches_nested() {
        let tree = sample();
        let out = add_reply(&tree, "a1x", Comment::new("deeper", "Fay", "hi"));
        let deep = find(&out, "a1x").unwrap();
        assert_eq!(deep.replies[0].id, "deeper");
        assert_eq!(count_all(&out), count_all(&tree) + 1);
    }

    #[test]
    fn test_add_reply_unknown_parent_is_noop() {
        let tree = sample();
        let out = add_reply(&tree, "missing", Comment::new("new", "Fay", "hi"));
        assert_eq!(out, tree);
    }

    #[test]
    fn test_ids_unique_after_creates_and_replies() {
        let mut tree: Vec<Comment> = Vec::new();
        for i in 0..5 {
            tree.insert(0, Comment::create("Ada", &format!("root {i}")));
        }
        let root_ids: Vec<String> = tree.iter().map(|c| c.id.clone()).collect();
        for parent in &root_ids {
            tree = add_reply(&tree, parent, Comment::create("Bob", "r"));
            let child = find(&tree, parent).unwrap().replies[0].id.clone();
            tree = add_reply(&tree, &child, Comment::create("Cy", "rr"));
        }

        let all = ids(&tree);
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), 15);
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_toggle_resolved_only_target() {
        let tree = sample();
        let out = toggle_resolved(&tree, "a1");
        assert!(find(&out, "a1").unwrap().resolved);
        assert!(!find(&out, "a").unwrap().resolved);
        assert!(!find(&out, "a1x").unwrap().resolved);
        assert!(!find(&out, "a2").unwrap().resolved);
    }

    #[test]
    fn test_toggle_resolved_twice_is_identity() {
        let tree = sample();
        for id in ids(&tree) {
            let twice = toggle_resolved(&toggle_resolved(&tree, id), id);
            assert_eq!(twice, tree, "id {id}");
        }
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let tree = sample();
        assert_eq!(toggle_resolved(&tree, "nope"), tree);
    }

    #[test]
    fn test_set_resolved() {
        let tree = toggle_resolved(&sample(), "b");
        let out = set_resolved(&tree, "b", false);
        assert!(!find(&out, "b").unwrap().resolved);
        let again = set_resolved(&out, "b", false);
        assert_eq!(again, out);
    }

    #[test]
    fn test_update_content_nested() {
        let tree = sample();
        let out = update_content(&tree, "a1x", "edited");
        assert_eq!(find(&out, "a1x").unwrap().content, "edited");
        assert_eq!(find(&tree, "a1x").unwrap().content, "deep");
        assert_eq!(update_content(&tree, "zzz", "x"), tree);
    }

    #[test]
    fn test_filter_keeps_ancestor_of_match() {
        let tree = toggle_resolved(&sample(), "a1x");
        let out = filter(&tree, |c| FilterMode::Resolved.matches(c));

        assert_eq!(out.len(), 1);
        let a = &out[0];
        assert_eq!(a.id, "a");
        assert!(!a.resolved);
        assert_eq!(a.replies.len(), 1);
        assert_eq!(a.replies[0].id, "a1");
        assert_eq!(a.replies[0].replies.len(), 1);
        assert_eq!(a.replies[0].replies[0].id, "a1x");
        assert_eq!(count_all(&out), 3);
    }

    #[test]
    fn test_filter_prunes_unmatched_leaves() {
        let tree = toggle_resolved(&sample(), "a2");
        let out = filter(&tree, |c| FilterMode::Unresolved.matches(c));
        let a = find(&out, "a").unwrap();
        assert!(find(&out, "a2").is_none());
        assert_eq!(a.replies.len(), 1);
        assert!(find(&out, "b").is_some());
    }

    #[test]
    fn test_filter_all_is_identity() {
        let tree = sample();
        let out = filter(&tree, |_| true);
        assert_eq!(out, tree);
        assert_eq!(count_all(&out), count_all(&tree));
    }

    #[test]
    fn test_filter_none_is_empty() {
        assert!(filter(&sample(), |_| false).is_empty());
    }

    #[test]
    fn test_count_all() {
        assert_eq!(count_all(&[]), 0);
        assert_eq!(count_all(&sample()), 5);
    }
}
