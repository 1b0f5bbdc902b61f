//! Per-request access-control evaluator.
//!
//! [`can_access`] is a pure function: callers look up the ownership facts
//! (who owns the project, who wrote the comment) and pass them in via
//! [`Action`]. Nothing here touches storage and nothing is cached between
//! requests, since ownership can change underneath a session.
//!
//! The rule table is deliberately hard-coded for the two-role system.
//! Denial means HTTP 403 at the handler; handlers still return 404 first
//! when the resource itself does not exist.

use crate::roles::Role;
use crate::types::DbId;

/// An authenticated identity, resolved once per request from the JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }
}

/// An action on a resource, carrying the ownership facts the rules need.
///
/// `project_client_id` is always the `client_id` of the project the
/// resource belongs to, as currently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read a project and its child collections.
    ViewProject { project_client_id: DbId },
    /// Add a comment (or reply) to a project.
    CommentOnProject { project_client_id: DbId },
    /// Create, update, or delete a project. Admin-only.
    ManageProject,
    /// Create, update, or delete a feature. Admin-only regardless of
    /// project ownership.
    ManageFeature,
    /// Update a task (client feedback / status).
    UpdateTask { project_client_id: DbId },
    /// Delete a comment. Clients may only delete their own comments, and
    /// only within a project they own; admins may delete any.
    DeleteComment {
        comment_author_id: DbId,
        project_client_id: DbId,
    },
    /// Upload or list project files.
    AccessFiles { project_client_id: DbId },
    /// List, create, or delete user accounts. Admin-only.
    ManageUsers,
}

/// Decide whether `actor` may perform `action`.
///
/// Admins pass every check. Client rules are keyed on project ownership
/// (and authorship, for comment deletion). The match is exhaustive so a
/// new action variant cannot silently fall through to "allowed".
pub fn can_access(actor: &Actor, action: &Action) -> bool {
    if actor.role.is_admin() {
        return true;
    }

    match *action {
        Action::ViewProject { project_client_id }
        | Action::CommentOnProject { project_client_id }
        | Action::UpdateTask { project_client_id }
        | Action::AccessFiles { project_client_id } => project_client_id == actor.id,

        Action::DeleteComment {
            comment_author_id,
            project_client_id,
        } => comment_author_id == actor.id && project_client_id == actor.id,

        Action::ManageProject | Action::ManageFeature | Action::ManageUsers => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: Actor = Actor {
        id: 1,
        role: Role::Admin,
    };
    const CLIENT: Actor = Actor {
        id: 7,
        role: Role::Client,
    };

    /// Every action variant, parameterized on whether the facts point at
    /// the client actor (id 7) or at someone else (id 99).
    fn all_actions(owned: bool) -> Vec<Action> {
        let owner = if owned { CLIENT.id } else { 99 };
        vec![
            Action::ViewProject {
                project_client_id: owner,
            },
            Action::CommentOnProject {
                project_client_id: owner,
            },
            Action::ManageProject,
            Action::ManageFeature,
            Action::UpdateTask {
                project_client_id: owner,
            },
            Action::DeleteComment {
                comment_author_id: owner,
                project_client_id: owner,
            },
            Action::AccessFiles {
                project_client_id: owner,
            },
            Action::ManageUsers,
        ]
    }

    #[test]
    fn test_admin_passes_every_action() {
        for action in all_actions(false) {
            assert!(can_access(&ADMIN, &action), "admin denied: {action:?}");
        }
    }

    #[test]
    fn test_client_never_passes_on_unowned_resources() {
        for action in all_actions(false) {
            assert!(
                !can_access(&CLIENT, &action),
                "client passed on foreign resource: {action:?}"
            );
        }
    }

    #[test]
    fn test_client_ownership_rules() {
        assert!(can_access(
            &CLIENT,
            &Action::ViewProject {
                project_client_id: CLIENT.id
            }
        ));
        assert!(can_access(
            &CLIENT,
            &Action::CommentOnProject {
                project_client_id: CLIENT.id
            }
        ));
        assert!(can_access(
            &CLIENT,
            &Action::UpdateTask {
                project_client_id: CLIENT.id
            }
        ));
        assert!(can_access(
            &CLIENT,
            &Action::AccessFiles {
                project_client_id: CLIENT.id
            }
        ));
    }

    #[test]
    fn test_client_admin_only_gates() {
        assert!(!can_access(&CLIENT, &Action::ManageProject));
        assert!(!can_access(&CLIENT, &Action::ManageFeature));
        assert!(!can_access(&CLIENT, &Action::ManageUsers));
    }

    #[test]
    fn test_client_cannot_delete_others_comment_in_owned_project() {
        // Owned project, but a comment authored by someone else.
        let action = Action::DeleteComment {
            comment_author_id: 99,
            project_client_id: CLIENT.id,
        };
        assert!(!can_access(&CLIENT, &action));
    }

    #[test]
    fn test_client_deletes_own_comment_in_owned_project() {
        let action = Action::DeleteComment {
            comment_author_id: CLIENT.id,
            project_client_id: CLIENT.id,
        };
        assert!(can_access(&CLIENT, &action));
    }

    #[test]
    fn test_evaluator_is_deterministic() {
        let action = Action::ViewProject {
            project_client_id: CLIENT.id,
        };
        let first = can_access(&CLIENT, &action);
        for _ in 0..10 {
            assert_eq!(can_access(&CLIENT, &action), first);
        }
    }
}
