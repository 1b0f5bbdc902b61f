//! Unreplied-comment detection for the admin dashboard.
//!
//! A project "needs a reply" when any of its top-level comment threads was
//! last spoken in by someone other than the admin. The dashboard shows the
//! number of such projects, not the number of comments.
//!
//! Comments form an explicit two-level tree: top-level comments with a flat
//! list of replies. Deeper nesting is not representable here on purpose; if
//! the product ever allows it, this module needs a redesign, not a patch.

use crate::types::{DbId, Timestamp};

/// The slice of a comment row the detector needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadComment {
    pub id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A top-level comment with its direct replies.
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub root: ThreadComment,
    pub replies: Vec<ThreadComment>,
}

impl CommentThread {
    /// The most recent reply, newest `created_at` first.
    ///
    /// Equal timestamps tie-break by descending id, so the result is
    /// deterministic regardless of input order.
    pub fn latest_reply(&self) -> Option<&ThreadComment> {
        self.replies
            .iter()
            .max_by_key(|r| (r.created_at, r.id))
    }

    /// Whether this thread is waiting on the admin.
    ///
    /// No replies: counts iff the root was written by someone other than
    /// the admin. With replies: counts iff the most recent reply was not
    /// the admin's (the client spoke last).
    pub fn needs_admin_attention(&self, admin_id: DbId) -> bool {
        match self.latest_reply() {
            None => self.root.author_id != admin_id,
            Some(last) => last.author_id != admin_id,
        }
    }
}

/// Partition one project's comments into two-level threads.
///
/// Replies whose parent is missing from the input are dropped; the
/// detector only reasons about complete threads.
pub fn build_threads(comments: &[ThreadComment]) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = comments
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(|root| CommentThread {
            root: root.clone(),
            replies: Vec::new(),
        })
        .collect();

    for comment in comments {
        if let Some(parent_id) = comment.parent_id {
            if let Some(thread) = threads.iter_mut().find(|t| t.root.id == parent_id) {
                thread.replies.push(comment.clone());
            }
        }
    }

    threads
}

/// Whether a single project (given all its comments) is waiting on the admin.
pub fn project_needs_reply(comments: &[ThreadComment], admin_id: DbId) -> bool {
    build_threads(comments)
        .iter()
        .any(|t| t.needs_admin_attention(admin_id))
}

/// Count how many projects are waiting on an admin reply.
///
/// Each item of `projects` is the full comment list of one project.
pub fn count_projects_needing_reply<'a, I>(projects: I, admin_id: DbId) -> usize
where
    I: IntoIterator<Item = &'a [ThreadComment]>,
{
    projects
        .into_iter()
        .filter(|comments| project_needs_reply(comments, admin_id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const ADMIN: DbId = 1;
    const CLIENT: DbId = 2;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn comment(id: DbId, author_id: DbId, parent_id: Option<DbId>, secs: i64) -> ThreadComment {
        ThreadComment {
            id,
            author_id,
            parent_id,
            created_at: at(secs),
        }
    }

    #[test]
    fn test_unanswered_client_comment_counts() {
        let comments = vec![comment(10, CLIENT, None, 0)];
        assert_eq!(
            count_projects_needing_reply([comments.as_slice()], ADMIN),
            1
        );
    }

    #[test]
    fn test_admin_reply_clears_the_project() {
        let comments = vec![
            comment(10, CLIENT, None, 0),
            comment(11, ADMIN, Some(10), 60),
        ];
        assert_eq!(
            count_projects_needing_reply([comments.as_slice()], ADMIN),
            0
        );
    }

    #[test]
    fn test_client_speaking_last_reopens_the_project() {
        let comments = vec![
            comment(10, CLIENT, None, 0),
            comment(11, ADMIN, Some(10), 60),
            comment(12, CLIENT, Some(10), 120),
        ];
        assert_eq!(
            count_projects_needing_reply([comments.as_slice()], ADMIN),
            1
        );
    }

    #[test]
    fn test_admin_initiated_thread_without_replies_does_not_count() {
        let comments = vec![comment(10, ADMIN, None, 0)];
        assert_eq!(
            count_projects_needing_reply([comments.as_slice()], ADMIN),
            0
        );
    }

    #[test]
    fn test_count_is_per_project_not_per_comment() {
        // Two open threads in one project still count as one project.
        let project_a = vec![comment(10, CLIENT, None, 0), comment(11, CLIENT, None, 5)];
        let project_b = vec![
            comment(20, CLIENT, None, 0),
            comment(21, ADMIN, Some(20), 60),
        ];
        let projects = [project_a.as_slice(), project_b.as_slice()];
        assert_eq!(count_projects_needing_reply(projects, ADMIN), 1);
    }

    #[test]
    fn test_equal_timestamps_tie_break_by_id() {
        // Two replies at the same instant: the one with the larger id wins.
        let comments = vec![
            comment(10, CLIENT, None, 0),
            comment(11, ADMIN, Some(10), 60),
            comment(12, CLIENT, Some(10), 60),
        ];
        let threads = build_threads(&comments);
        assert_eq!(threads[0].latest_reply().unwrap().id, 12);
        assert!(threads[0].needs_admin_attention(ADMIN));
    }

    #[test]
    fn test_orphan_replies_are_ignored() {
        // Reply pointing at a comment that is not in this project.
        let comments = vec![
            comment(10, ADMIN, None, 0),
            comment(11, CLIENT, Some(999), 60),
        ];
        assert!(!project_needs_reply(&comments, ADMIN));
    }

    #[test]
    fn test_empty_projects_count_zero() {
        let empty: Vec<ThreadComment> = Vec::new();
        assert_eq!(count_projects_needing_reply([empty.as_slice()], ADMIN), 0);
    }
}
