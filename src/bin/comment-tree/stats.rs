//! Summary numbers for a comment tree.

use editorial::comments::{tree, Comment};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub threads: usize,
    pub total: usize,
    pub resolved: usize,
    pub max_depth: usize,
}

impl TreeStats {
    pub fn collect(comments: &[Comment]) -> Self {
        let mut stats = TreeStats {
            threads: comments.len(),
            total: tree::count_all(comments),
            ..TreeStats::default()
        };
        for comment in comments {
            stats.visit(comment, 1);
        }
        stats
    }

    fn visit(&mut self, comment: &Comment, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        if comment.resolved {
            self.resolved += 1;
        }
        for reply in &comment.replies {
            self.visit(reply, depth + 1);
        }
    }

    pub fn unresolved(&self) -> usize {
        self.total - self.resolved
    }

    pub fn print(&self, label: &str) {
        eprintln!("{label}:");
        eprintln!("  Threads:    {}", self.threads);
        eprintln!("  Comments:   {}", self.total);
        eprintln!("  Resolved:   {}", self.resolved);
        eprintln!("  Unresolved: {}", self.unresolved());
        eprintln!("  Max depth:  {}", self.max_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect() {
        let comments = vec![
            Comment::new("a", "Ada", "root")
                .with_reply(Comment::new("b", "Alan", "reply").with_resolved(true)),
            Comment::new("c", "Grace", "other"),
        ];
        let stats = TreeStats::collect(&comments);
        assert_eq!(
            stats,
            TreeStats {
                threads: 2,
                total: 3,
                resolved: 1,
                max_depth: 2,
            }
        );
        assert_eq!(stats.unresolved(), 2);
        assert_eq!(TreeStats::collect(&[]), TreeStats::default());
    }
}
